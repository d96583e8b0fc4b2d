//! Project filtering and detail selection.

use crate::constants::MAX_TAG_FILTERS;
use crate::types::{Project, ProjectId};
use std::collections::BTreeSet;

/// Label of the sentinel filter that shows every project.
pub const ALL_TAGS: &str = "All";

/// The active tag filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TagFilter {
    /// Show everything
    #[default]
    All,
    /// Show projects carrying this tag
    Tag(String),
}

impl TagFilter {
    /// Parses a pill label; [`ALL_TAGS`] maps to [`TagFilter::All`].
    pub fn from_label(label: &str) -> Self {
        if label == ALL_TAGS {
            TagFilter::All
        } else {
            TagFilter::Tag(label.to_string())
        }
    }

    /// Text shown on the filter pill.
    pub fn label(&self) -> &str {
        match self {
            TagFilter::All => ALL_TAGS,
            TagFilter::Tag(tag) => tag.as_str(),
        }
    }

    /// True if `project` passes this filter.
    pub fn matches(&self, project: &Project) -> bool {
        match self {
            TagFilter::All => true,
            TagFilter::Tag(tag) => project.has_tag(tag),
        }
    }
}

/// Projects passing `filter`, in content order.
pub fn visible_projects<'a>(projects: &'a [Project], filter: &TagFilter) -> Vec<&'a Project> {
    projects.iter().filter(|p| filter.matches(p)).collect()
}

/// Filter pills: "All" followed by the sorted distinct tags, capped at
/// [`MAX_TAG_FILTERS`] entries in total.
pub fn tag_filters(projects: &[Project]) -> Vec<TagFilter> {
    let tags: BTreeSet<&str> = projects
        .iter()
        .flat_map(|p| p.tags.iter().map(String::as_str))
        .collect();
    std::iter::once(TagFilter::All)
        .chain(tags.into_iter().map(|t| TagFilter::Tag(t.to_string())))
        .take(MAX_TAG_FILTERS)
        .collect()
}

/// What the preview area shows for a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaPreview<'a> {
    /// The project has media
    Image {
        /// Image location
        src: &'a str,
        /// Alternative text
        alt: &'a str,
    },
    /// The project has no (usable) media
    Placeholder {
        /// Name of the project, shown in the placeholder
        name: &'a str,
    },
}

impl<'a> MediaPreview<'a> {
    /// Picks the preview for `project`; empty sources count as missing.
    pub fn for_project(project: &'a Project) -> Self {
        match &project.media {
            Some(media) if !media.src.trim().is_empty() => MediaPreview::Image {
                src: &media.src,
                alt: &media.alt,
            },
            _ => MediaPreview::Placeholder {
                name: &project.name,
            },
        }
    }
}

/// Filter and detail selection state of the project showcase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectBrowser {
    filter: TagFilter,
    active_detail: Option<ProjectId>,
}

impl ProjectBrowser {
    /// Creates a browser showing everything with no detail open.
    pub fn new() -> Self {
        Self::default()
    }

    /// The active filter.
    pub fn filter(&self) -> &TagFilter {
        &self.filter
    }

    /// Replaces the active filter.
    pub fn set_filter(&mut self, filter: TagFilter) {
        self.filter = filter;
    }

    /// Projects passing the active filter.
    pub fn visible<'a>(&self, projects: &'a [Project]) -> Vec<&'a Project> {
        visible_projects(projects, &self.filter)
    }

    /// Opens the detail view for `project`, replacing any open one.
    pub fn open_detail(&mut self, project: &Project) {
        self.active_detail = Some(project.id.clone());
    }

    /// Closes the detail view.
    pub fn close_detail(&mut self) {
        self.active_detail = None;
    }

    /// Identifier of the project whose detail is open.
    pub fn active_detail_id(&self) -> Option<&str> {
        self.active_detail.as_deref()
    }

    /// The project whose detail is open, resolved against `projects`.
    pub fn active_detail<'a>(&self, projects: &'a [Project]) -> Option<&'a Project> {
        let id = self.active_detail.as_deref()?;
        projects.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Media, ProjectLinks, ProjectMetrics};

    fn project(id: &str, tags: &[&str]) -> Project {
        Project {
            id: id.into(),
            name: id.to_uppercase(),
            blurb: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            impact: Vec::new(),
            metrics: ProjectMetrics {
                perf: 50,
                ux: 50,
                reliability: 50,
                complexity: 50,
            },
            links: ProjectLinks::default(),
            media: None,
        }
    }

    fn projects() -> Vec<Project> {
        vec![
            project("a", &["Go", "Redis"]),
            project("b", &["React"]),
            project("c", &["Go", "React"]),
        ]
    }

    fn ids(list: &[&Project]) -> Vec<String> {
        list.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn all_returns_everything() {
        let all = projects();
        assert_eq!(ids(&visible_projects(&all, &TagFilter::All)), vec!["a", "b", "c"]);
    }

    #[test]
    fn tag_filter_keeps_order() {
        let all = projects();
        let go = TagFilter::from_label("Go");
        assert_eq!(ids(&visible_projects(&all, &go)), vec!["a", "c"]);
        let none = TagFilter::from_label("Rust");
        assert!(visible_projects(&all, &none).is_empty());
    }

    #[test]
    fn tag_match_is_exact() {
        let all = projects();
        assert!(visible_projects(&all, &TagFilter::from_label("go")).is_empty());
    }

    #[test]
    fn all_label_round_trips() {
        assert_eq!(TagFilter::from_label("All"), TagFilter::All);
        assert_eq!(TagFilter::All.label(), "All");
        assert_eq!(TagFilter::from_label("Go").label(), "Go");
    }

    #[test]
    fn filter_pills_are_sorted_unique_and_capped() {
        let pills: Vec<String> = tag_filters(&projects())
            .iter()
            .map(|f| f.label().to_string())
            .collect();
        assert_eq!(pills, vec!["All", "Go", "React", "Redis"]);

        let many = vec![project(
            "x",
            &["k", "j", "i", "h", "g", "f", "e", "d", "c", "b", "a"],
        )];
        let pills = tag_filters(&many);
        assert_eq!(pills.len(), MAX_TAG_FILTERS);
        assert_eq!(pills[1].label(), "a");
    }

    #[test]
    fn detail_selection_replaces_and_clears() {
        let all = projects();
        let mut browser = ProjectBrowser::new();
        assert!(browser.active_detail(&all).is_none());

        browser.open_detail(&all[0]);
        browser.open_detail(&all[2]);
        assert_eq!(browser.active_detail(&all).map(|p| p.id.as_str()), Some("c"));

        browser.close_detail();
        assert_eq!(browser.active_detail_id(), None);
    }

    #[test]
    fn changing_the_filter_does_not_touch_the_detail() {
        let all = projects();
        let mut browser = ProjectBrowser::new();
        browser.open_detail(&all[1]);
        browser.set_filter(TagFilter::from_label("Go"));
        assert_eq!(ids(&browser.visible(&all)), vec!["a", "c"]);
        assert_eq!(browser.active_detail_id(), Some("b"));
    }

    #[test]
    fn missing_media_falls_back_to_placeholder() {
        let mut p = project("a", &[]);
        assert_eq!(MediaPreview::for_project(&p), MediaPreview::Placeholder { name: "A" });

        p.media = Some(Media {
            src: " ".into(),
            alt: "x".into(),
        });
        assert_eq!(MediaPreview::for_project(&p), MediaPreview::Placeholder { name: "A" });

        p.media = Some(Media {
            src: "media/a.jpg".into(),
            alt: "A preview".into(),
        });
        assert_eq!(
            MediaPreview::for_project(&p),
            MediaPreview::Image {
                src: "media/a.jpg",
                alt: "A preview"
            }
        );
    }
}
