//! JSON renderer for tooling integration.
//!
//! Serializes the namespace tree directly; every reference carries a
//! `kind` tag.

use crate::model::Namespace;
use crate::render::Renderer;
use anyhow::{Context, Result};

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, namespace: &Namespace) -> Result<String> {
        let mut out = serde_json::to_string_pretty(namespace)
            .with_context(|| format!("serializing namespace `{}`", namespace.title()))?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    #[test]
    fn renders_tree() {
        let namespaces = parser::parse(
            "/*\n  @name Shape\n  @type class\n*/\nclass Shape {\n  /* @name Shape.area */\n  area() {}\n}\n",
        );
        let out = JsonRenderer.render(&namespaces[0]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["identifier"], "");
        assert_eq!(value["members"][0]["kind"], "class");
        assert_eq!(value["members"][0]["fields"][0]["kind"], "function");
        assert_eq!(value["members"][0]["fields"][0]["path"], "Shape.area");
        assert!(out.ends_with("}\n"));
    }
}
