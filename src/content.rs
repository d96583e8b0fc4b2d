//! Built-in site content and the optional JSON override.
//!
//! The site ships with a complete set of placeholder content. On native targets the
//! `PORTFOLIO_CONTENT` environment variable can point at a JSON file with the same
//! shape as [`SiteContent`] to replace it without recompiling.

use crate::types::*;

/// Environment variable naming a JSON content file.
pub const CONTENT_ENV_VAR: &str = "PORTFOLIO_CONTENT";

/// Section identifier of the project showcase.
pub const PROJECTS_SECTION: &str = "projects";
/// Section identifier of the skills and timeline section.
pub const ABOUT_SECTION: &str = "about";
/// Section identifier of the page top.
pub const TOP_SECTION: &str = "top";

/// Returns the content the site should render.
///
/// Falls back to [`builtin`] when no override is configured or the override
/// cannot be read or parsed.
pub fn load() -> SiteContent {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Ok(path) = std::env::var(CONTENT_ENV_VAR) {
            match load_file(&path) {
                Ok(content) => {
                    log::info!("Loaded site content from {path}");
                    return content;
                }
                Err(err) => {
                    log::warn!("Ignoring {CONTENT_ENV_VAR}={path}: {err}");
                }
            }
        }
    }
    builtin()
}

/// Reads and parses a content file.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_file(path: &str) -> Result<SiteContent, String> {
    let json = std::fs::read_to_string(path).map_err(|e| format!("read failed: {e}"))?;
    SiteContent::from_json(&json).map_err(|e| format!("invalid content: {e}"))
}

/// Builds the built-in content.
pub fn builtin() -> SiteContent {
    let profile = builtin_profile();
    let actions = builtin_actions(&profile);
    SiteContent {
        profile,
        projects: builtin_projects(),
        skills: builtin_skills(),
        timeline: builtin_timeline(),
        actions,
        build_log: builtin_build_log(),
    }
}

fn builtin_profile() -> Profile {
    Profile {
        name: "Alex Chen".into(),
        title: "Full-Stack Engineer • Performance + Product".into(),
        location: "NYC • Open to remote".into(),
        tagline: "I build fast, reliable, user-obsessed systems, then measure the results \
                  like a scientist with a keyboard."
            .into(),
        email: "alex@example.com".into(),
        links: ProfileLinks {
            github: "https://github.com/".into(),
            linkedin: "https://www.linkedin.com/".into(),
            resume: "#".into(),
        },
        highlights: vec![
            highlight("−42%", "p95 latency via caching + query plans"),
            highlight("0→1", "SOC2-aligned controls + audit trails"),
            highlight("10M+", "events/day processed w/ idempotent pipeline"),
            highlight("3x", "conversion lift via experimentation"),
        ],
    }
}

fn highlight(kpi: &str, label: &str) -> Highlight {
    Highlight {
        kpi: kpi.into(),
        label: label.into(),
    }
}

fn builtin_projects() -> Vec<Project> {
    vec![
        Project {
            id: "nebula".into(),
            name: "NebulaOps".into(),
            blurb: "Real-time incident copilot with streaming ingestion + LLM triage.".into(),
            tags: strings(&["React", "Node", "Postgres", "Kafka", "LLM", "Observability"]),
            impact: strings(&[
                "Cut MTTR by 31% by correlating logs/metrics/traces into one timeline.",
                "Built idempotent ingestion with exactly-once-ish semantics + retries.",
                "Added cost guardrails: token budgets, caching, and prompt telemetry.",
            ]),
            metrics: ProjectMetrics {
                perf: 92,
                ux: 88,
                reliability: 95,
                complexity: 62,
            },
            links: ProjectLinks {
                demo: "https://example.com".into(),
                code: "https://github.com/".into(),
            },
            media: Some(Media {
                src: "media/nebula.jpg".into(),
                alt: "NebulaOps preview".into(),
            }),
        },
        Project {
            id: "atlas".into(),
            name: "Atlas Billing".into(),
            blurb: "Usage-based billing engine with auditability and reconciliation.".into(),
            tags: strings(&["TypeScript", "Go", "Stripe", "Postgres", "Redis", "Kubernetes"]),
            impact: strings(&[
                "Prevented double-charges with ledger model + deterministic replays.",
                "Reconciled 99.97% of invoices automatically via rule engine.",
                "Reduced support tickets 24% with transparent invoice breakdowns.",
            ]),
            metrics: ProjectMetrics {
                perf: 86,
                ux: 80,
                reliability: 97,
                complexity: 74,
            },
            links: ProjectLinks {
                demo: "https://example.com".into(),
                code: "https://github.com/".into(),
            },
            media: Some(Media {
                src: "media/atlas.jpg".into(),
                alt: "Atlas Billing preview".into(),
            }),
        },
        Project {
            id: "quanta".into(),
            name: "Quanta Search".into(),
            blurb: "Vector + keyword hybrid search with relevance tuning tools.".into(),
            tags: strings(&["Python", "FastAPI", "Vector DB", "React", "MLOps", "AWS"]),
            impact: strings(&[
                "Improved NDCG +19% using hybrid retrieval + reranking experiments.",
                "Built offline eval harness with golden sets + regression tracking.",
                "Shipped admin UI for relevance tuning without redeploys.",
            ]),
            metrics: ProjectMetrics {
                perf: 84,
                ux: 83,
                reliability: 90,
                complexity: 69,
            },
            links: ProjectLinks {
                demo: "https://example.com".into(),
                code: "https://github.com/".into(),
            },
            media: None,
        },
    ]
}

fn builtin_skills() -> Vec<SkillGroup> {
    vec![
        skill_group(
            "Frontend",
            &["React", "TypeScript", "Accessibility", "Animations", "Performance"],
        ),
        skill_group(
            "Backend",
            &["Node", "Go", "Python", "Postgres", "Redis", "Queues/Streams"],
        ),
        skill_group("Infra", &["Docker", "K8s", "CI/CD", "Observability", "AWS/GCP"]),
        skill_group(
            "Craft",
            &["Testing", "Design docs", "Incident response", "Mentoring"],
        ),
    ]
}

fn skill_group(group: &str, items: &[&str]) -> SkillGroup {
    SkillGroup {
        group: group.into(),
        items: strings(items),
    }
}

fn builtin_timeline() -> Vec<TimelineEntry> {
    [
        (
            "2025",
            "Senior Engineer",
            "Led reliability + performance initiatives; shipped billing + observability.",
        ),
        (
            "2023",
            "Full-Stack Engineer",
            "Owned core UX flows; built experiment platform + data pipelines.",
        ),
        (
            "2021",
            "Engineer",
            "Shipped APIs and UI; learned to love tests and fear production.",
        ),
    ]
    .into_iter()
    .map(|(year, title, text)| TimelineEntry {
        year: year.into(),
        title: title.into(),
        text: text.into(),
    })
    .collect()
}

fn builtin_actions(profile: &Profile) -> Vec<Action> {
    vec![
        Action::new(
            "Go to Projects",
            Effect::ScrollTo {
                section: PROJECTS_SECTION.into(),
            },
        ),
        Action::new(
            "Go to Skills + Story",
            Effect::ScrollTo {
                section: ABOUT_SECTION.into(),
            },
        ),
        Action::new(
            "Email",
            Effect::Email {
                address: profile.email.clone(),
            },
        ),
        Action::new(
            "Open GitHub",
            Effect::OpenLink {
                url: profile.links.github.clone(),
            },
        ),
        Action::new(
            "Open LinkedIn",
            Effect::OpenLink {
                url: profile.links.linkedin.clone(),
            },
        ),
    ]
}

fn builtin_build_log() -> Vec<LogSeed> {
    [
        (LogLevel::Info, "Bootstrapping repo…", 350),
        (LogLevel::Ok, "Running tests (unit + API)…", 700),
        (LogLevel::Ok, "p95 latency check: 182ms ✅", 650),
        (LogLevel::Warn, "Bundle size watch: 214kb (ok)", 550),
        (LogLevel::Ok, "Deploy preview built.", 600),
        (LogLevel::Info, "Warming caches…", 520),
        (LogLevel::Ok, "Observability hooks attached.", 520),
    ]
    .into_iter()
    .map(|(level, text, delay_ms)| LogSeed {
        level,
        text: text.into(),
        delay_ms,
    })
    .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
