//! GitHub-flavored markdown renderer.
//!
//! One document per namespace: a title, an index of anchor links, then one
//! block per member sorted by display name. Class fields and nested
//! namespace members are rendered one heading level deeper.

use crate::model::*;
use crate::render::Renderer;
use crate::toc;
use anyhow::Result;

pub struct MarkdownRenderer;

const VARIATION_SELECTOR: &str = "\u{FE0F}";

/// Category word to display symbol.
const SYMBOLS: &[(&str, &str)] = &[
    ("function", "\u{25B6}"),
    ("class", "\u{1F39B}"),
    ("method", "\u{23E9}"),
    ("static", "\u{2744}"),
    ("prop", "\u{1F521}"),
    ("const", "\u{1F512}"),
    ("var", "\u{1F520}"),
    ("generator", "\u{267E}"),
];

const OTHER_SYMBOL: &str = "\u{1F523}";

/// Deepest markdown heading.
const MAX_LEVEL: usize = 6;

impl Renderer for MarkdownRenderer {
    fn render(&self, namespace: &Namespace) -> Result<String> {
        let mut output = format!("# {}\n", namespace.title());

        if !namespace.doc.synopsis.is_empty() {
            output.push('\n');
            output.push_str(&namespace.doc.synopsis);
            output.push('\n');
        }

        let members = sorted(&namespace.members);
        if !members.is_empty() {
            output.push_str("\n## Index\n\n");
            for member in &members {
                let name = member.doc().display_name();
                output.push_str(&toc::render_toc_item(name, &heading_text(member)));
                output.push('\n');
            }
            output.push('\n');
        }

        for member in members {
            render_reference(&mut output, member, 2);
        }

        Ok(output)
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

/// Symbol for a category; only the first word counts.
pub fn symbol_for(category: &str) -> String {
    let word = category.split(' ').next().unwrap_or_default();
    match SYMBOLS.iter().find(|(name, _)| *name == word) {
        Some((_, symbol)) => format!("{}{}", symbol, VARIATION_SELECTOR),
        None => OTHER_SYMBOL.to_string(),
    }
}

fn sorted(references: &[Reference]) -> Vec<&Reference> {
    let mut sorted: Vec<&Reference> = references.iter().collect();
    sorted.sort_by(|a, b| a.doc().display_name().cmp(b.doc().display_name()));
    sorted
}

fn heading_text(reference: &Reference) -> String {
    let doc = reference.doc();
    format!("{} `{}`", symbol_for(&doc.category), doc.display_name())
}

fn render_reference(output: &mut String, reference: &Reference, level: usize) {
    let doc = reference.doc();
    let hashes = "#".repeat(level.min(MAX_LEVEL));

    output.push_str(&format!("{} {}\n", hashes, heading_text(reference)));
    output.push_str(&format!("`{}`", doc.category));
    if !doc.synopsis.trim().is_empty() {
        output.push_str(&format!(" \u{00B7} {}", doc.synopsis));
    }
    output.push('\n');

    if let Reference::Class(Class {
        base: Some(base), ..
    }) = reference
    {
        output.push_str(&format!("\nExtends `{}`\n", base));
    }

    let parameters = reference.parameters();
    if !parameters.is_empty() {
        output.push_str("\n**Parameters:**\n");
        for parameter in parameters {
            output.push_str(&render_parameter(parameter));
            output.push('\n');
        }
    }

    if let Some(returns) = reference.returns().filter(|r| !r.is_void()) {
        if returns.description.trim().is_empty() {
            output.push_str(&format!("\n**Returns:** `{}`\n", returns.type_name));
        } else {
            output.push_str(&format!(
                "\n**Returns:** `{}` \u{00B7} {}\n",
                returns.type_name, returns.description
            ));
        }
    }

    output.push('\n');

    for child in sorted(reference.children()) {
        render_reference(output, child, level + 1);
    }
}

fn render_parameter(parameter: &Parameter) -> String {
    let mut type_annotation = format!("`{}`", parameter.type_name);
    if let Some(default) = &parameter.default_value {
        type_annotation.push_str(&format!(" = `{}`", default));
    }

    let description = parameter.description.trim();
    if description.is_empty() {
        format!("* **`{}`** ({})", parameter.identifier, type_annotation)
    } else {
        format!(
            "* **`{}`** ({}): {}",
            parameter.identifier, type_annotation, description
        )
    }
}
