// HTML fragments of the gallery page
//
// Each document becomes a card link, each group a markdown heading followed
// by a `<div class="list">` of cards.

use crate::gallery::{Document, Gallery, VisibleGroup};
use std::collections::HashSet;

/// Separator between rendered groups
pub const GROUP_SEPARATOR: &str = "\n\n\n";

/// Escape text for HTML content and double-quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render the card linking to one document
pub fn render_card(doc: &Document) -> String {
    let href = escape_html(&doc.id);
    let title = escape_html(&doc.title);

    match (&doc.light, &doc.dark) {
        (Some(light), Some(dark)) => format!(
            "<a href=\"{href}\"><picture>\
             <source srcset=\"{}\" media=\"(prefers-color-scheme: dark)\">\
             <img src=\"{}\" loading=\"lazy\">\
             </picture><q>{title}</q></a>",
            escape_html(dark),
            escape_html(light)
        ),
        (Some(thumb), None) | (None, Some(thumb)) => format!(
            "<a href=\"{href}\"><img src=\"{}\" loading=\"lazy\"><q>{title}</q></a>",
            escape_html(thumb)
        ),
        (None, None) => format!("<a href=\"{href}\"><q>{title}</q></a>"),
    }
}

/// Render a group heading, its description and its cards
pub fn render_group(visible: &VisibleGroup<'_>) -> String {
    let group = visible.group;
    let mut out = format!("## {}\n\n", group.title);

    if let Some(description) = group.description.as_deref().filter(|d| !d.is_empty()) {
        out.push_str(&format!("\n\n{description}\n\n"));
    }

    let cards: Vec<String> = visible.documents.iter().map(|doc| render_card(doc)).collect();
    out.push_str("<div class=\"list\">\n");
    out.push_str(&cards.join("\n"));
    out.push_str("\n</div>");
    out
}

/// Render all groups of the gallery, each document in its first group only
pub fn render_groups(gallery: &Gallery) -> String {
    gallery
        .visible_groups()
        .iter()
        .map(render_group)
        .collect::<Vec<_>>()
        .join(GROUP_SEPARATOR)
}

/// Plain listing of every group's document ids, for checking categories.
///
/// Unlike the cards, this listing shows groups that ended up empty.
pub fn render_debug(gallery: &Gallery) -> String {
    let mut seen = HashSet::new();
    gallery
        .groups()
        .iter()
        .map(|group| {
            let ids: Vec<String> = group
                .members
                .iter()
                .filter_map(|short_id| gallery.document(*short_id))
                .filter(|doc| seen.insert(doc.id.as_str()))
                .map(|doc| serde_json::Value::from(doc.id.as_str()).to_string())
                .collect();
            format!("*{}*\n\n{}", group.word, ids.join(", <br>"))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
