//! Project tile markup and layout.

use crate::content::{ColorPair, Project, Projects};
use crate::dom::escape_html;

/// Renders one content item into a markup fragment.
pub trait TileTemplate: Send + Sync {
    fn render(&self, item: &Project, primary: &str, secondary: &str, extra: Option<&str>) -> String;
}

/// Default card markup; every piece of content text is escaped.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardTemplate;

impl TileTemplate for CardTemplate {
    fn render(
        &self,
        item: &Project,
        primary: &str,
        secondary: &str,
        extra: Option<&str>,
    ) -> String {
        let mut html = format!(
            r#"<div class="tile-face" style="--tile-primary: {}; --tile-secondary: {}">"#,
            escape_html(primary),
            escape_html(secondary)
        );
        if let Some(image) = item.image.as_deref().filter(|src| !src.trim().is_empty()) {
            html.push_str(&format!(
                r#"<img class="tile-image" src="{}" alt="" loading="lazy">"#,
                escape_html(image)
            ));
        }
        let name = escape_html(&item.name);
        match item.url.as_deref().filter(|url| !url.trim().is_empty()) {
            Some(url) => html.push_str(&format!(
                r#"<h3 class="tile-title"><a href="{}" rel="noopener">{name}</a></h3>"#,
                escape_html(url)
            )),
            None => html.push_str(&format!(r#"<h3 class="tile-title">{name}</h3>"#)),
        }
        html.push_str(&format!(
            r#"<p class="tile-description">{}</p>"#,
            escape_html(&item.description)
        ));
        if !item.tags.is_empty() {
            html.push_str(r#"<ul class="tile-tags">"#);
            for tag in &item.tags {
                html.push_str(&format!("<li>{}</li>", escape_html(tag)));
            }
            html.push_str("</ul>");
        }
        html.push_str("</div>");
        if let Some(extra) = extra {
            html.push_str(extra);
        }
        html
    }
}

/// Accent pairs handed out by position when a project has no override.
pub const DEFAULT_PALETTE: &[(&str, &str)] = &[
    ("#007aff", "#5ac8fa"),
    ("#ff2d55", "#ff9500"),
    ("#34c759", "#30b0c7"),
    ("#af52de", "#5856d6"),
    ("#ff9f0a", "#ffd60a"),
    ("#64d2ff", "#0a84ff"),
];

pub fn resolve_colors(projects: &Projects, project: &Project, index: usize) -> ColorPair {
    if let Some(pair) = projects.colors.get(&project.name) {
        return pair.clone();
    }
    let (primary, secondary) = DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()];
    ColorPair {
        primary: primary.to_string(),
        secondary: secondary.to_string(),
    }
}

/// Whether a row started with `remaining` tiles left is laid out as three
/// equal columns. Four remaining deliberately yields two rows of two.
pub fn should_force_triple_row(remaining: usize) -> bool {
    remaining >= 3 && (remaining == 3 || remaining >= 5)
}

/// Tile counts per row for `count` tiles.
pub fn plan_rows(count: usize) -> Vec<usize> {
    let mut rows = Vec::new();
    let mut remaining = count;
    while remaining > 0 {
        let take = if should_force_triple_row(remaining) {
            3
        } else {
            remaining.min(2)
        };
        rows.push(take);
        remaining -= take;
    }
    rows
}

/// Hidden overlay listing a project's details.
pub fn details_markup(details: &str) -> String {
    format!(
        r#"<div class="tile-details" role="region"><p>{}</p></div>"#,
        escape_html(details)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_rule_keeps_the_four_remaining_case() {
        assert_eq!(plan_rows(0), Vec::<usize>::new());
        assert_eq!(plan_rows(1), vec![1]);
        assert_eq!(plan_rows(3), vec![3]);
        assert_eq!(plan_rows(4), vec![2, 2]);
        assert_eq!(plan_rows(5), vec![3, 2]);
        assert_eq!(plan_rows(6), vec![3, 3]);
        assert_eq!(plan_rows(7), vec![3, 2, 2]);
        assert!(!should_force_triple_row(4));
    }

    #[test]
    fn overrides_win_over_the_palette() {
        let mut projects = Projects::default();
        projects.colors.insert(
            "Atlas".to_string(),
            ColorPair {
                primary: "#101010".to_string(),
                secondary: "#202020".to_string(),
            },
        );
        let atlas = Project {
            name: "Atlas".to_string(),
            ..Project::default()
        };
        let other = Project {
            name: "Other".to_string(),
            ..Project::default()
        };
        assert_eq!(resolve_colors(&projects, &atlas, 0).primary, "#101010");
        assert_eq!(
            resolve_colors(&projects, &other, DEFAULT_PALETTE.len() + 1).primary,
            DEFAULT_PALETTE[1].0
        );
    }

    #[test]
    fn card_template_escapes_content() {
        let project = Project {
            name: "<Atlas>".to_string(),
            description: "A & B".to_string(),
            url: Some("https://example.com/?a=1&b=2".to_string()),
            tags: vec!["rust".to_string()],
            ..Project::default()
        };
        let html = CardTemplate.render(&project, "#007aff", "#5ac8fa", Some("<hr>"));
        assert!(html.contains("&lt;Atlas&gt;"));
        assert!(html.contains("A &amp; B"));
        assert!(html.contains(r#"href="https://example.com/?a=1&amp;b=2""#));
        assert!(html.ends_with("<hr>"));
    }
}
