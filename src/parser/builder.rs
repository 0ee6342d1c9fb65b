//! Reference builder: pairs matched declarations with their doc comments.
//!
//! Walks the match forest one sibling list at a time. A block comment that
//! carries an `@name` tag cues the next sibling match; if that match is a
//! declaration, the pair becomes a [`Reference`]. Generic blocks drop the
//! cue, line comments are transparent.

use super::catalog::{Construct, Slot};
use super::comment::{self, CommentAnnotation, DecodeError, ANY_TYPE};
use super::engine::Match;
use super::tokenizer;
use crate::model::*;
use tracing::{debug, warn};

/// Category of a `this.x` member assigned a function inside a method body.
const PROPERTY_CATEGORY: &str = "prop";

/// Where the references of one sibling list end up.
enum Scope<'a> {
    /// Top level: namespace wrappers are hoisted into the given list.
    Global(&'a mut Vec<Namespace>),
    Namespace,
    Class,
    /// Body of a class method; only `this.x` properties are kept.
    MethodBody,
}

struct Builder<'s> {
    source: &'s str,
    diagnostics: Vec<Diagnostic>,
}

/// Build the namespace list for `forest`, matched over `source`.
///
/// Declarations outside any namespace wrapper go to the global namespace,
/// which is always present and always last.
pub fn build(source: &str, forest: &[Match<'_>]) -> Scan {
    let mut builder = Builder {
        source,
        diagnostics: Vec::new(),
    };
    let mut namespaces = Vec::new();
    let mut global = Namespace::global();
    global.members = builder.walk(forest, Scope::Global(&mut namespaces));
    namespaces.push(global);

    Scan {
        namespaces,
        diagnostics: builder.diagnostics,
    }
}

impl Builder<'_> {
    fn walk(&mut self, matches: &[Match<'_>], mut scope: Scope<'_>) -> Vec<Reference> {
        let mut members = Vec::new();
        let mut cue: Option<Result<CommentAnnotation, DecodeError>> = None;

        for m in matches {
            match m.spec.construct {
                Construct::LineComment => {}
                Construct::Comment => {
                    let body = m.body_text(self.source);
                    cue = comment::is_documentation(body).then(|| comment::decode(body));
                }
                Construct::Block => cue = None,
                Construct::Namespace => {
                    let identifier = m.text_of(Slot::Name, self.source).unwrap_or_default();
                    let annotation = self.accept(identifier, cue.take());
                    let namespace = self.namespace(m, identifier, annotation);
                    match &mut scope {
                        Scope::Global(hoisted) => hoisted.push(namespace),
                        _ => members.push(Reference::Namespace(namespace)),
                    }
                }
                construct => {
                    let cued = cue.take();
                    let construct = match scope {
                        Scope::MethodBody
                            if construct == Construct::Function
                                && assigns_to_this(m, self.source) =>
                        {
                            Construct::Property
                        }
                        _ => construct,
                    };
                    if !matches!(scope, Scope::MethodBody) || construct == Construct::Property {
                        members.extend(self.declaration(m, construct, cued));
                    }
                    if construct == Construct::Method && matches!(scope, Scope::Class) {
                        members.extend(self.walk(&m.children, Scope::MethodBody));
                    }
                }
            }
        }

        members
    }

    /// Unwrap a cue, recording a diagnostic when it failed to decode.
    fn accept(
        &mut self,
        identifier: &str,
        cue: Option<Result<CommentAnnotation, DecodeError>>,
    ) -> Option<CommentAnnotation> {
        match cue? {
            Ok(annotation) => Some(annotation),
            Err(error) => {
                warn!("skipping `{}`: {}", identifier, error);
                self.diagnostics.push(Diagnostic {
                    identifier: identifier.to_string(),
                    error,
                });
                None
            }
        }
    }

    fn namespace(
        &mut self,
        m: &Match<'_>,
        identifier: &str,
        annotation: Option<CommentAnnotation>,
    ) -> Namespace {
        let annotation = annotation.unwrap_or_default();
        debug!("namespace `{}`", identifier);
        Namespace {
            doc: Doc {
                identifier: identifier.to_string(),
                path: annotation.name,
                category: annotation
                    .category
                    .unwrap_or_else(|| m.spec.category.to_string()),
                synopsis: annotation.synopsis,
            },
            members: self.walk(&m.children, Scope::Namespace),
        }
    }

    fn declaration(
        &mut self,
        m: &Match<'_>,
        construct: Construct,
        cue: Option<Result<CommentAnnotation, DecodeError>>,
    ) -> Option<Reference> {
        let identifier = m
            .text_of(Slot::Name, self.source)
            .filter(|name| !name.is_empty())?;
        let annotation = self.accept(identifier, cue)?;
        self.reference(m, construct, identifier, annotation)
    }

    fn reference(
        &mut self,
        m: &Match<'_>,
        construct: Construct,
        identifier: &str,
        annotation: CommentAnnotation,
    ) -> Option<Reference> {
        let default_category = if construct == m.spec.construct {
            m.spec.category
        } else {
            PROPERTY_CATEGORY
        };
        let doc = Doc {
            identifier: identifier.to_string(),
            path: annotation.name,
            category: annotation
                .category
                .unwrap_or_else(|| default_category.to_string()),
            synopsis: annotation.synopsis,
        };
        let returns = annotation.returns.unwrap_or_default();

        let reference = match construct {
            Construct::Class => Reference::Class(Class {
                doc,
                parameters: annotation.parameters,
                returns,
                base: m.text_of(Slot::Base, self.source).map(str::to_string),
                fields: self.walk(&m.children, Scope::Class),
            }),
            Construct::Function | Construct::Method => {
                let parameters = if annotation.parameters.is_empty() {
                    signature_parameters(m)
                } else {
                    annotation.parameters
                };
                Reference::Function(Function {
                    doc,
                    parameters,
                    returns,
                })
            }
            Construct::Property => Reference::Property(Property { doc }),
            Construct::Getter => Reference::Accessor(Accessor {
                doc,
                accessor: AccessorKind::Get,
            }),
            Construct::Setter => Reference::Accessor(Accessor {
                doc,
                accessor: AccessorKind::Set,
            }),
            Construct::Variable { read_only } => Reference::Variable(Variable { doc, read_only }),
            Construct::Comment | Construct::LineComment | Construct::Namespace | Construct::Block => {
                return None
            }
        };
        debug!("reference `{}`", reference.doc().display_name());
        Some(reference)
    }
}

/// Whether the match is the right-hand side of a `this.<name> =` assignment.
fn assigns_to_this(m: &Match<'_>, source: &str) -> bool {
    source
        .get(..m.span.start)
        .and_then(|before| before.trim_end().strip_suffix('.'))
        .is_some_and(|before| {
            before
                .trim_end()
                .strip_suffix("this")
                .is_some_and(|rest| !rest.ends_with(tokenizer::is_identifier_char))
        })
}

/// Parameter names from a gathered signature, untyped.
///
/// Splits on top-level commas and takes the first identifier of each
/// segment, so defaults and rest markers are skipped.
fn signature_parameters(m: &Match<'_>) -> Vec<Parameter> {
    let Some(capture) = m.capture(Slot::Params) else {
        return Vec::new();
    };

    let mut parameters = Vec::new();
    let mut depth = 0usize;
    let mut at_start = true;

    for token in &capture.tokens {
        match token.as_str() {
            "(" | "[" | "{" => {
                depth += 1;
                at_start = false;
            }
            ")" | "]" | "}" => depth = depth.saturating_sub(1),
            "," if depth == 0 => at_start = true,
            "..." if at_start => {}
            text => {
                if at_start && tokenizer::is_identifier(text) {
                    parameters.push(Parameter {
                        identifier: text.to_string(),
                        type_name: ANY_TYPE.to_string(),
                        description: String::new(),
                        default_value: None,
                    });
                }
                at_start = false;
            }
        }
    }

    parameters
}
