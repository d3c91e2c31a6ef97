use pathfinder_core::{AppViewModel, CatalogStatus};

pub const TITLE: &str = "Personalized Learning Path Recommendation";

pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec![format!("== {TITLE} ==")];

    if view.loading {
        lines.push("Loading...".to_string());
    }
    if let Some(error) = &view.catalog_error {
        lines.push(format!("[catalog] {error}"));
    }
    if let Some(error) = &view.submission_error {
        lines.push(format!("[request] {error}"));
    }

    if view.catalog_status == CatalogStatus::Loaded {
        lines.push(format!(
            "{} concepts available (type `list`)",
            view.concept_titles.len()
        ));
    }
    lines.push(format!("Known:  {}", join_or_none(&view.known_concepts)));
    lines.push(format!(
        "Target: {}",
        view.target_concept.as_deref().unwrap_or("(none)")
    ));

    if view.shows_path() {
        lines.push("Recommended path:".to_string());
        lines.extend(
            view.recommended_path
                .iter()
                .enumerate()
                .map(|(i, id)| format!("  {}. {}", i + 1, id)),
        );
    }
    lines
}

/// The selectable concepts with their 1-based numbers and selection marks.
pub fn render_catalog(view: &AppViewModel) -> Vec<String> {
    if view.concept_titles.is_empty() {
        return vec!["No concepts available.".to_string()];
    }
    view.concept_titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            let known = if view.known_concepts.contains(title) {
                "x"
            } else {
                " "
            };
            let target = if view.target_concept.as_deref() == Some(title.as_str()) {
                "  <- target"
            } else {
                ""
            };
            format!("{:>3}. [{known}] {title}{target}", i + 1)
        })
        .collect()
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}
