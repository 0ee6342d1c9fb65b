//! Reference tree produced by a scan. Format-agnostic and serializable.

use crate::parser::comment::DecodeError;
use serde::Serialize;

/// A parameter declared by `@param` (or recovered from a signature).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub identifier: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub description: String,
    /// Only set when the comment spelled out a default in the type bracket.
    #[serde(rename = "defaultValue", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

/// Return value declared by `@returns`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Return {
    #[serde(rename = "type")]
    pub type_name: String,
    pub description: String,
}

/// Return type meaning "no value".
pub const VOID_TYPE: &str = "undefined";

impl Default for Return {
    fn default() -> Self {
        Self {
            type_name: VOID_TYPE.to_string(),
            description: String::new(),
        }
    }
}

impl Return {
    pub fn is_void(&self) -> bool {
        self.type_name == VOID_TYPE
    }
}

/// Fields shared by every reference kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Doc {
    /// Identifier as declared in the source.
    pub identifier: String,
    /// The comment's `@name` path, e.g. `tools.Widget.resize`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// `@type` text, or the construct's default category word.
    pub category: String,
    pub synopsis: String,
}

impl Doc {
    /// Name used for headings and sorting: the `@name` path when given.
    pub fn display_name(&self) -> &str {
        match self.path.as_deref() {
            Some(path) if !path.trim().is_empty() => path,
            _ => &self.identifier,
        }
    }
}

/// A namespace wrapper, or the implicit global namespace (empty identifier).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Namespace {
    #[serde(flatten)]
    pub doc: Doc,
    pub members: Vec<Reference>,
}

impl Namespace {
    pub fn global() -> Self {
        Self {
            doc: Doc {
                category: "namespace".to_string(),
                ..Doc::default()
            },
            members: Vec::new(),
        }
    }

    pub fn is_global(&self) -> bool {
        self.doc.identifier.trim().is_empty()
    }

    /// Heading text; `(global)` for the unnamed namespace.
    pub fn title(&self) -> &str {
        if self.is_global() {
            "(global)"
        } else {
            &self.doc.identifier
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Class {
    #[serde(flatten)]
    pub doc: Doc,
    /// Constructor parameters.
    pub parameters: Vec<Parameter>,
    pub returns: Return,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    pub fields: Vec<Reference>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Function {
    #[serde(flatten)]
    pub doc: Doc,
    pub parameters: Vec<Parameter>,
    pub returns: Return,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    #[serde(flatten)]
    pub doc: Doc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessorKind {
    Get,
    Set,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Accessor {
    #[serde(flatten)]
    pub doc: Doc,
    pub accessor: AccessorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variable {
    #[serde(flatten)]
    pub doc: Doc,
    #[serde(rename = "readOnly")]
    pub read_only: bool,
}

/// One documentable entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Reference {
    Namespace(Namespace),
    Class(Class),
    Function(Function),
    Property(Property),
    Accessor(Accessor),
    Variable(Variable),
}

impl Reference {
    pub fn doc(&self) -> &Doc {
        match self {
            Reference::Namespace(r) => &r.doc,
            Reference::Class(r) => &r.doc,
            Reference::Function(r) => &r.doc,
            Reference::Property(r) => &r.doc,
            Reference::Accessor(r) => &r.doc,
            Reference::Variable(r) => &r.doc,
        }
    }

    /// Nested references: namespace members or class fields.
    pub fn children(&self) -> &[Reference] {
        match self {
            Reference::Namespace(r) => &r.members,
            Reference::Class(r) => &r.fields,
            _ => &[],
        }
    }

    pub fn parameters(&self) -> &[Parameter] {
        match self {
            Reference::Class(r) => &r.parameters,
            Reference::Function(r) => &r.parameters,
            _ => &[],
        }
    }

    pub fn returns(&self) -> Option<&Return> {
        match self {
            Reference::Class(r) => Some(&r.returns),
            Reference::Function(r) => Some(&r.returns),
            _ => None,
        }
    }
}

/// A reference skipped because its comment failed to decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub identifier: String,
    pub error: DecodeError,
}

/// Result of scanning one source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scan {
    /// Namespaces in source order; the global namespace is last.
    pub namespaces: Vec<Namespace>,
    pub diagnostics: Vec<Diagnostic>,
}
