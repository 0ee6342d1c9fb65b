//! Comment decoder for the `@` annotation mini-language.
//!
//! Works on the raw interior of a block comment (delimiters excluded):
//!
//! ```text
//! @name <identifier-or-dotted-path>
//! @type <category-word> [<datatype-text>]
//! @param <type[ = default]> <identifier> [description...]
//! @returns <type> [description...]
//! <any other line>          appended to the synopsis
//! ```
//!
//! Five consecutive spaces or `~~~~` in the synopsis become line breaks.

use crate::model::{Parameter, Return};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static RE_TYPE_BRACKETS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<([^>]*)>").unwrap());

static RE_NAME_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@name\s+").unwrap());

/// Type used when a parameter or return line has no bracket.
pub const ANY_TYPE: &str = "*";

/// A malformed annotation line. Scoped to a single comment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("parameter line is not declared with `@param`: {line:?}")]
    MissingParamMarker { line: String },
    #[error("parameter line does not name an identifier: {line:?}")]
    MissingParamIdentifier { line: String },
    #[error("return line is not declared with `@returns`: {line:?}")]
    MissingReturnMarker { line: String },
}

/// Structured metadata decoded from one comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentAnnotation {
    pub name: Option<String>,
    /// Full `@type` remainder, e.g. `prop <String>`.
    pub category: Option<String>,
    pub synopsis: String,
    pub parameters: Vec<Parameter>,
    pub returns: Option<Return>,
}

/// Whether a comment is meant as documentation (carries an `@name` tag).
pub fn is_documentation(comment: &str) -> bool {
    RE_NAME_TAG.is_match(comment)
}

/// Decode the annotation language in `comment`.
///
/// Extra stars of `/**` and `**/` delimiters are ignored.
pub fn decode(comment: &str) -> Result<CommentAnnotation, DecodeError> {
    let comment = comment.trim_start_matches('*').trim_end_matches('*');
    let mut annotation = CommentAnnotation::default();
    let mut synopsis = String::new();

    for line in dedented_lines(comment) {
        if let Some(rest) = line.strip_prefix("@name") {
            annotation.name = Some(tag_value(rest));
        } else if let Some(rest) = line.strip_prefix("@type") {
            annotation.category = Some(tag_value(rest));
        } else if line.starts_with("@param") {
            annotation.parameters.push(decode_parameter(line)?);
        } else if line.starts_with("@returns") {
            annotation.returns = Some(decode_return(line)?);
        } else {
            synopsis.push(' ');
            synopsis.push_str(line);
        }
    }

    annotation.synopsis = synopsis
        .replace("     ", "\n")
        .replace("~~~~", "\n")
        .trim()
        .to_string();
    Ok(annotation)
}

/// Text after the tag word, up to the end of the line.
fn tag_value(rest: &str) -> String {
    rest.split_once(' ')
        .map(|(_, value)| value.trim())
        .unwrap_or_default()
        .to_string()
}

/// Non-blank lines with the first line's indentation removed.
///
/// Lines indented less than the first one are kept as they are.
pub(crate) fn dedented_lines(comment: &str) -> Vec<&str> {
    let lines: Vec<&str> = comment
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();

    let Some(first) = lines.first() else {
        return lines;
    };
    let indent = leading_whitespace(first);

    lines
        .into_iter()
        .map(|line| {
            if leading_whitespace(line) >= indent {
                let cut = line
                    .char_indices()
                    .nth(indent)
                    .map_or(line.len(), |(i, _)| i);
                &line[cut..]
            } else {
                line
            }
        })
        .collect()
}

fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Contents of the first `<...>` bracket, if any.
fn bracket_contents(line: &str) -> Option<&str> {
    RE_TYPE_BRACKETS
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn decode_parameter(line: &str) -> Result<Parameter, DecodeError> {
    let mut type_name = ANY_TYPE.to_string();
    let mut default_value = None;

    if let Some(contents) = bracket_contents(line) {
        let (ty, default) = match contents.split_once('=') {
            Some((ty, default)) => (ty, Some(default.trim())),
            None => (contents, None),
        };
        let ty = ty.trim();
        if !ty.is_empty() {
            type_name = ty.to_string();
        }
        default_value = default.filter(|d| !d.is_empty()).map(str::to_string);
    }

    let stripped = RE_TYPE_BRACKETS.replace_all(line, "");
    let mut words = stripped.split_whitespace();

    if words.next() != Some("@param") {
        return Err(DecodeError::MissingParamMarker {
            line: line.to_string(),
        });
    }
    let Some(identifier) = words.next() else {
        return Err(DecodeError::MissingParamIdentifier {
            line: line.to_string(),
        });
    };

    Ok(Parameter {
        identifier: identifier.to_string(),
        type_name,
        description: words.collect::<Vec<_>>().join(" "),
        default_value,
    })
}

fn decode_return(line: &str) -> Result<Return, DecodeError> {
    let type_name = bracket_contents(line)
        .map(str::trim)
        .filter(|ty| !ty.is_empty())
        .unwrap_or(ANY_TYPE)
        .to_string();

    let stripped = RE_TYPE_BRACKETS.replace_all(line, "");
    let mut words = stripped.split_whitespace();

    if words.next() != Some("@returns") {
        return Err(DecodeError::MissingReturnMarker {
            line: line.to_string(),
        });
    }

    Ok(Return {
        type_name,
        description: words.collect::<Vec<_>>().join(" "),
    })
}
