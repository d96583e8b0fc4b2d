//! Streaming status feed shown in the hero section.
//!
//! Replays a fixed seed of log lines forever, each after its own delay, and keeps
//! only the most recent few on screen.

use crate::constants::BUILD_LOG_CAPACITY;
use crate::types::{LogLevel, LogSeed};
use std::collections::VecDeque;
use uuid::Uuid;

/// Shortest gap between two lines; zero seed delays are raised to this.
const MIN_LINE_DELAY: f64 = 0.016;

/// Unique identifier of an emitted line.
pub type LineId = Uuid;

/// A line that has been emitted.
#[derive(Debug, Clone, PartialEq)]
pub struct LogLine {
    /// Unique per emitted line, even when the text repeats
    pub id: LineId,
    /// Severity
    pub level: LogLevel,
    /// Text
    pub text: String,
    /// Emission time in seconds since the app started (not wall-clock time)
    pub at: f64,
}

impl LogLine {
    /// `mm:ss` elapsed since the app started, not a time of day.
    pub fn timestamp(&self) -> String {
        let secs = self.at.max(0.0) as u64;
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

/// Glyph shown in front of a line of the given level.
pub fn level_marker(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Ok => "✓",
        LogLevel::Warn => "!",
        LogLevel::Info => "•",
    }
}

/// The feed itself.
#[derive(Debug, Clone)]
pub struct BuildLog {
    seed: Vec<LogSeed>,
    lines: VecDeque<LogLine>,
    next: usize,
    due_at: Option<f64>,
    running: bool,
    capacity: usize,
}

impl BuildLog {
    /// Creates a running feed over `seed`.
    pub fn new(seed: Vec<LogSeed>) -> Self {
        Self {
            running: !seed.is_empty(),
            seed,
            lines: VecDeque::with_capacity(BUILD_LOG_CAPACITY),
            next: 0,
            due_at: None,
            capacity: BUILD_LOG_CAPACITY,
        }
    }

    /// Lines currently shown, oldest first.
    pub fn lines(&self) -> impl Iterator<Item = &LogLine> {
        self.lines.iter()
    }

    /// Number of lines currently shown.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True before the first line appears.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// True until [`BuildLog::stop`] is called.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stops emitting lines. Lines already shown stay.
    pub fn stop(&mut self) {
        self.running = false;
        self.due_at = None;
    }

    fn delay_of(&self, index: usize) -> f64 {
        (self.seed[index % self.seed.len()].delay_ms as f64 / 1000.0).max(MIN_LINE_DELAY)
    }

    /// Emits every line that became due by `now` (seconds) and returns how many.
    ///
    /// The first call only arms the timer for the first seed line. At most one
    /// screenful of lines is emitted per call; after a longer stall the backlog is
    /// dropped and the timer restarts from `now`.
    pub fn tick(&mut self, now: f64) -> usize {
        if !self.running {
            return 0;
        }
        let mut due = match self.due_at {
            Some(due) => due,
            None => {
                self.due_at = Some(now + self.delay_of(self.next));
                return 0;
            }
        };

        let mut emitted = 0;
        while due <= now {
            let seed = &self.seed[self.next % self.seed.len()];
            self.lines.push_back(LogLine {
                id: Uuid::new_v4(),
                level: seed.level,
                text: seed.text.clone(),
                at: due,
            });
            while self.lines.len() > self.capacity {
                self.lines.pop_front();
            }
            self.next = self.next.wrapping_add(1);
            due += self.delay_of(self.next);
            emitted += 1;
            if emitted >= self.capacity && due <= now {
                due = now + self.delay_of(self.next);
                break;
            }
        }
        self.due_at = Some(due);
        emitted
    }

    /// Seconds until the next line, if the feed is running and armed.
    pub fn next_due_in(&self, now: f64) -> Option<f64> {
        self.due_at.map(|due| (due - now).max(0.0))
    }
}
