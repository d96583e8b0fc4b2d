//! Core data types for the portfolio site.
//!
//! These records are static content: they are built once at startup (either from the
//! built-in defaults or a JSON file) and handed to the components that render them.
//! Nothing in here is mutated after construction.

use serde::{Deserialize, Serialize};

/// Identifier of a project record.
pub type ProjectId = String;

/// Identifier of a page section that navigation effects can scroll to.
pub type SectionId = String;

/// A headline number shown in the hero section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Highlight {
    /// Short figure, e.g. "3x"
    pub kpi: String,
    /// What the figure measures
    pub label: String,
}

/// External profile links.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProfileLinks {
    /// GitHub profile URL
    pub github: String,
    /// LinkedIn profile URL
    pub linkedin: String,
    /// Resume URL
    pub resume: String,
}

/// The person the site is about.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    /// Display name
    pub name: String,
    /// One-line role description
    pub title: String,
    /// Location and availability
    pub location: String,
    /// Hero tagline
    pub tagline: String,
    /// Contact address used by the email action
    pub email: String,
    /// External profile links
    pub links: ProfileLinks,
    /// Headline numbers for the hero section
    #[serde(default)]
    pub highlights: Vec<Highlight>,
}

/// Four 0-100 scores rendered by the detail view's signal dashboard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectMetrics {
    /// Performance score
    pub perf: u8,
    /// User experience score
    pub ux: u8,
    /// Reliability score
    pub reliability: u8,
    /// Complexity score
    pub complexity: u8,
}

impl ProjectMetrics {
    /// Returns the labelled dimensions in display order, each clamped to 0..=100.
    pub fn dimensions(&self) -> [(&'static str, u8); 4] {
        [
            ("Perf", self.perf.min(100)),
            ("UX", self.ux.min(100)),
            ("Reliability", self.reliability.min(100)),
            ("Complexity", self.complexity.min(100)),
        ]
    }
}

/// Links attached to a project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProjectLinks {
    /// Live demo URL
    pub demo: String,
    /// Source code URL
    pub code: String,
}

/// Preview media for a project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Media {
    /// Relative or absolute image location
    pub src: String,
    /// Alternative text
    pub alt: String,
}

/// A showcased project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    /// Stable identifier
    pub id: ProjectId,
    /// Display name
    pub name: String,
    /// One-line description
    pub blurb: String,
    /// Technology tags used by the filter
    pub tags: Vec<String>,
    /// Ordered impact statements
    pub impact: Vec<String>,
    /// Dashboard scores
    pub metrics: ProjectMetrics,
    /// External links
    pub links: ProjectLinks,
    /// Optional preview media
    #[serde(default)]
    pub media: Option<Media>,
}

impl Project {
    /// Returns true when `tag` is one of this project's tags (exact match).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// A group of related skills.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillGroup {
    /// Group heading
    pub group: String,
    /// Skills in the group
    pub items: Vec<String>,
}

/// One step of the career timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineEntry {
    /// Year label
    pub year: String,
    /// Role title
    pub title: String,
    /// Short description
    pub text: String,
}

/// Side effect bound to a command palette action.
///
/// Effects are plain data; an [`crate::palette::EffectRunner`] decides what running one means.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effect {
    /// Scroll the page so the given section is at the top
    ScrollTo {
        /// Target section
        section: SectionId,
    },
    /// Open the mail client addressed to the given recipient
    Email {
        /// Recipient address
        address: String,
    },
    /// Open an external link in a new browsing context
    OpenLink {
        /// Link target
        url: String,
    },
}

/// A command palette item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Action {
    /// Text shown in the palette and matched by the query
    pub label: String,
    /// Effect run when the item is selected
    pub effect: Effect,
}

impl Action {
    /// Creates a new action.
    pub fn new(label: impl Into<String>, effect: Effect) -> Self {
        Self {
            label: label.into(),
            effect,
        }
    }
}

/// Severity of a status feed line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Neutral progress
    Info,
    /// Successful check
    Ok,
    /// Something to keep an eye on
    Warn,
}

/// One entry of the status feed seed, replayed cyclically.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogSeed {
    /// Line severity
    pub level: LogLevel,
    /// Line text
    pub text: String,
    /// Delay before this line appears, in milliseconds
    pub delay_ms: u64,
}

/// All static content rendered by the site.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteContent {
    /// Person the site is about
    pub profile: Profile,
    /// Ordered project showcase
    pub projects: Vec<Project>,
    /// Skill groups
    pub skills: Vec<SkillGroup>,
    /// Career timeline, newest first
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
    /// Command palette items in display order
    pub actions: Vec<Action>,
    /// Status feed seed
    #[serde(default)]
    pub build_log: Vec<LogSeed>,
}

impl SiteContent {
    /// Serializes the content to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes content from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
