//! Tokenizer: splits raw source text into exact-text tokens.
//!
//! Tokens carry no lexical category. The matcher only ever compares them
//! by text, so splitting stays deliberately simple:
//!
//! - identifier boundaries (runs of alphanumerics, `_` and `$`)
//! - whitespace runs (discarded)
//! - before and after `( ) { } [ ]`
//! - before quote characters and the delimiters `: ; ,`
//! - around `/*` and `*/`, even inside a run of symbols (`<T>*/`, `/**`)
//!
//! There is no string-literal or escape awareness. A synthetic
//! [`Token::End`] marker is always appended.

/// One token of the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'s> {
    /// A non-empty, trimmed slice of the source starting at byte `start`.
    Text { text: &'s str, start: usize },
    /// End-of-stream marker, positioned at the end of the source.
    End { offset: usize },
}

impl<'s> Token<'s> {
    pub fn text(&self) -> Option<&'s str> {
        match self {
            Token::Text { text, .. } => Some(text),
            Token::End { .. } => None,
        }
    }

    /// Exact text comparison. The end marker equals nothing.
    pub fn is(&self, literal: &str) -> bool {
        self.text() == Some(literal)
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Token::End { .. })
    }

    /// Byte offset of the first character.
    pub fn start(&self) -> usize {
        match self {
            Token::Text { start, .. } => *start,
            Token::End { offset } => *offset,
        }
    }

    /// Byte offset just past the last character.
    pub fn end(&self) -> usize {
        match self {
            Token::Text { text, start } => start + text.len(),
            Token::End { offset } => *offset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Space,
    /// Always a token of its own.
    Bracket,
    /// Starts a new token.
    Breaking,
    Identifier,
    Symbol,
}

impl CharClass {
    fn of(c: char) -> Self {
        match c {
            c if c.is_whitespace() => CharClass::Space,
            '(' | ')' | '{' | '}' | '[' | ']' => CharClass::Bracket,
            '"' | '\'' | '`' | ':' | ';' | ',' => CharClass::Breaking,
            c if is_identifier_char(c) => CharClass::Identifier,
            _ => CharClass::Symbol,
        }
    }
}

/// Block comment delimiters, split out of any symbol run.
const COMMENT_DELIMITERS: [&str; 2] = ["/*", "*/"];

pub fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// True for texts shaped like an identifier: a letter, `_` or `$` followed
/// by identifier characters.
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
            chars.all(is_identifier_char)
        }
        _ => false,
    }
}

/// Split `source` into tokens, appending the end-of-stream marker.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    let mut in_identifier = false;

    for (i, c) in source.char_indices() {
        let class = CharClass::of(c);
        let split_before = match class {
            CharClass::Space | CharClass::Bracket | CharClass::Breaking => true,
            CharClass::Identifier => !in_identifier,
            CharClass::Symbol => in_identifier,
        };

        if split_before {
            if let Some(s) = start.take() {
                push_run(&mut tokens, source, s, i);
            }
        }

        match class {
            CharClass::Space => {}
            CharClass::Bracket => tokens.push(Token::Text {
                text: &source[i..i + c.len_utf8()],
                start: i,
            }),
            _ => {
                if start.is_none() {
                    start = Some(i);
                }
            }
        }

        in_identifier = class == CharClass::Identifier;
    }

    if let Some(s) = start {
        push_run(&mut tokens, source, s, source.len());
    }

    tokens.push(Token::End {
        offset: source.len(),
    });
    tokens
}

/// Push `source[start..end]`, with comment delimiters as tokens of their own.
///
/// A run opening with `//` is a line comment marker and stays whole.
fn push_run<'s>(tokens: &mut Vec<Token<'s>>, source: &'s str, start: usize, end: usize) {
    let run = &source[start..end];
    if run.starts_with("//") {
        tokens.push(Token::Text { text: run, start });
        return;
    }

    let mut piece = 0;
    let mut i = 0;
    while i + 2 <= run.len() {
        let Some(delimiter) = COMMENT_DELIMITERS
            .iter()
            .find(|d| run.as_bytes()[i..].starts_with(d.as_bytes()))
        else {
            i += 1;
            continue;
        };
        if piece < i {
            tokens.push(Token::Text {
                text: &run[piece..i],
                start: start + piece,
            });
        }
        tokens.push(Token::Text {
            text: &run[i..i + delimiter.len()],
            start: start + i,
        });
        i += delimiter.len();
        piece = i;
    }

    if piece < run.len() {
        tokens.push(Token::Text {
            text: &run[piece..],
            start: start + piece,
        });
    }
}

/// Whether a line break separates token `index` from the token before it.
pub fn line_break_before(source: &str, tokens: &[Token<'_>], index: usize) -> bool {
    if index == 0 || index >= tokens.len() {
        return false;
    }
    let gap = tokens[index - 1].end()..tokens[index].start();
    source.get(gap).is_some_and(|between| between.contains('\n'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(source: &str) -> Vec<&str> {
        tokenize(source).iter().filter_map(|t| t.text()).collect()
    }

    #[test]
    fn function_header() {
        assert_eq!(
            texts("function add(a, b) {"),
            vec!["function", "add", "(", "a", ",", "b", ")", "{"]
        );
    }

    #[test]
    fn member_assignment() {
        assert_eq!(
            texts("this.count=5;"),
            vec!["this", ".", "count", "=", "5", ";"]
        );
    }

    #[test]
    fn namespace_wrapper() {
        assert_eq!(
            texts(r#"namespace("com.example", function(exports) {"#),
            vec![
                "namespace", "(", "\"", "com", ".", "example", "\"", ",", "function", "(",
                "exports", ")", "{"
            ]
        );
    }

    #[test]
    fn comment_delimiters_stay_whole() {
        assert_eq!(
            texts("/* @name foo */"),
            vec!["/*", "@", "name", "foo", "*/"]
        );
        assert_eq!(texts("// note\nx"), vec!["//", "note", "x"]);
    }

    #[test]
    fn comment_delimiters_split_out_of_symbol_runs() {
        assert_eq!(
            texts("@returns <Number>*/"),
            vec!["@", "returns", "<", "Number", ">", "*/"]
        );
        assert_eq!(texts("/** @name a **/"), vec!["/*", "*", "@", "name", "a", "*", "*/"]);
        assert_eq!(texts("x.*/"), vec!["x", ".", "*/"]);
        assert_eq!(texts("/*@name"), vec!["/*", "@", "name"]);
        assert_eq!(texts("/**/"), vec!["/*", "*/"]);
        assert_eq!(texts("///*"), vec!["///*"]);
    }

    #[test]
    fn split_delimiters_keep_their_spans() {
        let source = "<T>*/ /**";
        for token in tokenize(source) {
            if let Some(text) = token.text() {
                assert_eq!(&source[token.start()..token.end()], text);
            }
        }
    }

    #[test]
    fn operator_runs_are_kept_together() {
        assert_eq!(texts("a === b => c"), vec!["a", "===", "b", "=>", "c"]);
        assert_eq!(texts("function* gen"), vec!["function", "*", "gen"]);
    }

    #[test]
    fn end_marker_is_appended() {
        let tokens = tokenize("");
        assert_eq!(tokens, vec![Token::End { offset: 0 }]);

        let tokens = tokenize("x ");
        assert!(tokens.last().is_some_and(|t| t.is_end()));
        assert_eq!(tokens.last().map(|t| t.start()), Some(2));
    }

    #[test]
    fn spans_point_into_source() {
        let source = "let  value = 1;";
        for token in tokenize(source) {
            if let Some(text) = token.text() {
                assert_eq!(&source[token.start()..token.end()], text);
            }
        }
    }

    #[test]
    fn identifiers() {
        assert!(is_identifier("foo"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("$el"));
        assert!(!is_identifier("5x"));
        assert!(!is_identifier("=>"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn detects_line_breaks_between_tokens() {
        let source = "// a\nb c";
        let tokens = tokenize(source);
        assert!(!line_break_before(source, &tokens, 1));
        assert!(line_break_before(source, &tokens, 2));
        assert!(!line_break_before(source, &tokens, 3));
    }
}
