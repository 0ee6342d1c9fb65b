//! Namespace merge: fold wrappers that share a name into one namespace.
//!
//! A namespace is often spread over several files. Once the files are
//! concatenated and scanned, each wrapper yields its own [`Namespace`];
//! this module joins them so every name is rendered once.

use crate::model::Namespace;
use std::collections::HashMap;

/// Merge namespaces by identifier, keeping first-occurrence order.
///
/// Members are concatenated in source order; the first non-empty synopsis
/// and `@name` path win. The global namespace always ends up last.
pub fn merge(namespaces: Vec<Namespace>) -> Vec<Namespace> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<Namespace> = Vec::new();
    let mut global = Namespace::global();

    for namespace in namespaces {
        if namespace.is_global() {
            absorb(&mut global, namespace);
            continue;
        }

        match index.get(&namespace.doc.identifier) {
            Some(&position) => absorb(&mut merged[position], namespace),
            None => {
                index.insert(namespace.doc.identifier.clone(), merged.len());
                merged.push(namespace);
            }
        }
    }

    merged.push(global);
    merged
}

fn absorb(into: &mut Namespace, from: Namespace) {
    if into.doc.synopsis.is_empty() {
        into.doc.synopsis = from.doc.synopsis;
    }
    if into.doc.path.is_none() {
        into.doc.path = from.doc.path;
    }
    into.members.extend(from.members);
}
