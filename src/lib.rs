//! subdoc: API reference documentation from annotated JavaScript comments.
//!
//! The scanner recognizes declarations without a grammar: source text is
//! split into tokens, a catalog of declaration shapes is matched over the
//! token stream with an explicit nesting stack, and each `/* @name … */`
//! comment is paired with the declaration that follows it.
//!
//! ```
//! let namespaces = subdoc::parse("/* @name add */\nfunction add(a, b) {}\n");
//! let global = namespaces.last().unwrap();
//! assert_eq!(global.members[0].doc().identifier, "add");
//! ```

pub mod config;
pub mod model;
pub mod parser;
pub mod render;
pub mod toc;

pub use parser::{parse, scan};
