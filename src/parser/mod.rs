//! Parser module: text → tokens → match forest → reference tree.

pub mod builder;
pub mod catalog;
pub mod comment;
pub mod engine;
pub mod merge;
pub mod tokenizer;

use crate::model::{Namespace, Scan};
use catalog::{PatternSpec, CATALOG};
use engine::Matcher;
use tracing::debug;

/// Scan `source` with the default catalog.
pub fn scan(source: &str) -> Scan {
    scan_with(CATALOG, source)
}

/// Scan `source` with an explicit catalog.
pub fn scan_with(catalog: &[PatternSpec], source: &str) -> Scan {
    let tokens = tokenizer::tokenize(source);
    let forest = Matcher::new(catalog).run(source, &tokens);
    debug!(
        tokens = tokens.len(),
        matches = forest.len(),
        "matched source"
    );

    let mut scan = builder::build(source, &forest);
    scan.namespaces = merge::merge(scan.namespaces);
    scan
}

/// Namespaces documented in `source`; the global namespace is last.
pub fn parse(source: &str) -> Vec<Namespace> {
    scan(source).namespaces
}
