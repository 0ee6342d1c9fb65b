//! GitHub-flavored markdown anchor/slug generation for the member index.

/// Link `label` to the anchor GitHub generates for `heading`.
pub fn render_toc_link(label: &str, heading: &str) -> String {
    format!("[{}](#{})", label, github_slug(heading))
}

/// Generate a TOC list item.
pub fn render_toc_item(label: &str, heading: &str) -> String {
    format!("* {}", render_toc_link(label, heading))
}

/// GitHub heading anchor slug generation.
///
/// - lowercase
/// - remove all chars that aren't alphanumeric, space or hyphen
///   (so `.`, `_`, backticks and emoji go)
/// - replace spaces with hyphens
pub fn github_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() || c == ' ' || c == '-' {
            slug.push(c);
        }
    }
    slug.replace(' ', "-")
}
