//! Pattern catalog: the fixed, precedence-ordered set of declaration shapes.
//!
//! Each [`PatternSpec`] is plain data: an ordered list of [`ShapeStep`]s
//! describing the construct's header plus the rule that closes its body.
//! The matching engine interprets these steps; nothing here carries
//! per-parse state.
//!
//! Order is significance: more specific shapes come first and the generic
//! block scope is always last, so any unmatched `{ … }` still balances the
//! nesting stack.

/// Named slot a capture or gather step binds into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The declared identifier (or the namespace string).
    Name,
    /// Base class of an `extends` clause.
    Base,
    /// Gathered parameter list of a signature.
    Params,
}

/// One step of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeStep {
    /// Must equal the current token.
    Literal(&'static str),
    /// Binds the current token, which must be a usable identifier.
    Capture(Slot),
    /// Accumulates every token until `stop`, which is consumed.
    Gather { stop: &'static str, slot: Slot },
}

/// What ends a construct's body once its header is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closing {
    Literal(&'static str),
    /// The first token on a following line (not consumed).
    EndOfLine,
}

/// Kind of construct a pattern recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    Comment,
    LineComment,
    Namespace,
    Function,
    Class,
    Property,
    Getter,
    Setter,
    Method,
    Variable { read_only: bool },
    Block,
}

impl Construct {
    /// Whether a cued comment turns this construct into a reference.
    pub fn is_documentable(self) -> bool {
        !matches!(
            self,
            Construct::Comment | Construct::LineComment | Construct::Namespace | Construct::Block
        )
    }
}

/// Immutable description of one recognizable construct.
#[derive(Debug, PartialEq, Eq)]
pub struct PatternSpec {
    pub name: &'static str,
    pub construct: Construct,
    /// Category word used when the comment carries no `@type`.
    pub category: &'static str,
    pub steps: &'static [ShapeStep],
    pub closing: Closing,
    /// Opaque bodies are not scanned for nested constructs.
    pub opaque: bool,
}

use ShapeStep::{Capture, Gather, Literal};

const PARAMS: ShapeStep = Gather {
    stop: ")",
    slot: Slot::Params,
};

const fn braced(
    name: &'static str,
    construct: Construct,
    category: &'static str,
    steps: &'static [ShapeStep],
) -> PatternSpec {
    PatternSpec {
        name,
        construct,
        category,
        steps,
        closing: Closing::Literal("}"),
        opaque: false,
    }
}

const fn terminated(
    name: &'static str,
    construct: Construct,
    category: &'static str,
    steps: &'static [ShapeStep],
) -> PatternSpec {
    PatternSpec {
        name,
        construct,
        category,
        steps,
        closing: Closing::Literal(";"),
        opaque: false,
    }
}

/// The default catalog, in precedence order.
pub const CATALOG: &[PatternSpec] = &[
    // /* … */
    PatternSpec {
        name: "block-comment",
        construct: Construct::Comment,
        category: "",
        steps: &[Literal("/*")],
        closing: Closing::Literal("*/"),
        opaque: true,
    },
    // // …
    PatternSpec {
        name: "line-comment",
        construct: Construct::LineComment,
        category: "",
        steps: &[Literal("//")],
        closing: Closing::EndOfLine,
        opaque: true,
    },
    // namespace("name", function(exports) { … })
    braced(
        "namespace",
        Construct::Namespace,
        "namespace",
        &[
            Literal("namespace"),
            Literal("("),
            Literal("\""),
            Gather {
                stop: "\"",
                slot: Slot::Name,
            },
            Literal(","),
            Literal("function"),
            Literal("("),
            PARAMS,
            Literal("{"),
        ],
    ),
    braced(
        "namespace-single-quoted",
        Construct::Namespace,
        "namespace",
        &[
            Literal("namespace"),
            Literal("("),
            Literal("'"),
            Gather {
                stop: "'",
                slot: Slot::Name,
            },
            Literal(","),
            Literal("function"),
            Literal("("),
            PARAMS,
            Literal("{"),
        ],
    ),
    // function name(…) {
    braced(
        "function-declaration",
        Construct::Function,
        "function",
        &[
            Literal("function"),
            Capture(Slot::Name),
            Literal("("),
            PARAMS,
            Literal("{"),
        ],
    ),
    // function* name(…) {
    braced(
        "generator-declaration",
        Construct::Function,
        "generator",
        &[
            Literal("function"),
            Literal("*"),
            Capture(Slot::Name),
            Literal("("),
            PARAMS,
            Literal("{"),
        ],
    ),
    // exports.name = function(…) {
    braced(
        "function-export",
        Construct::Function,
        "function",
        &[
            Literal("exports"),
            Literal("."),
            Capture(Slot::Name),
            Literal("="),
            Literal("function"),
            Literal("("),
            PARAMS,
            Literal("{"),
        ],
    ),
    // name = function(…) {
    braced(
        "function-expression",
        Construct::Function,
        "function",
        &[
            Capture(Slot::Name),
            Literal("="),
            Literal("function"),
            Literal("("),
            PARAMS,
            Literal("{"),
        ],
    ),
    // class Name extends Base {
    braced(
        "class-extension-declaration",
        Construct::Class,
        "class",
        &[
            Literal("class"),
            Capture(Slot::Name),
            Literal("extends"),
            Capture(Slot::Base),
            Literal("{"),
        ],
    ),
    // exports.Name = class extends Base {
    braced(
        "class-extension-export",
        Construct::Class,
        "class",
        &[
            Literal("exports"),
            Literal("."),
            Capture(Slot::Name),
            Literal("="),
            Literal("class"),
            Literal("extends"),
            Capture(Slot::Base),
            Literal("{"),
        ],
    ),
    // Name = class extends Base {
    braced(
        "class-extension-expression",
        Construct::Class,
        "class",
        &[
            Capture(Slot::Name),
            Literal("="),
            Literal("class"),
            Literal("extends"),
            Capture(Slot::Base),
            Literal("{"),
        ],
    ),
    // class Name {
    braced(
        "class-declaration",
        Construct::Class,
        "class",
        &[Literal("class"), Capture(Slot::Name), Literal("{")],
    ),
    // exports.Name = class {
    braced(
        "class-export",
        Construct::Class,
        "class",
        &[
            Literal("exports"),
            Literal("."),
            Capture(Slot::Name),
            Literal("="),
            Literal("class"),
            Literal("{"),
        ],
    ),
    // Name = class {
    braced(
        "class-expression",
        Construct::Class,
        "class",
        &[
            Capture(Slot::Name),
            Literal("="),
            Literal("class"),
            Literal("{"),
        ],
    ),
    // this.name = … ;
    terminated(
        "property",
        Construct::Property,
        "prop",
        &[
            Literal("this"),
            Literal("."),
            Capture(Slot::Name),
            Literal("="),
        ],
    ),
    // set name(…) {
    braced(
        "setter",
        Construct::Setter,
        "prop",
        &[
            Literal("set"),
            Capture(Slot::Name),
            Literal("("),
            PARAMS,
            Literal("{"),
        ],
    ),
    // get name(…) {
    braced(
        "getter",
        Construct::Getter,
        "prop",
        &[
            Literal("get"),
            Capture(Slot::Name),
            Literal("("),
            PARAMS,
            Literal("{"),
        ],
    ),
    // name(…) {
    braced(
        "method",
        Construct::Method,
        "method",
        &[Capture(Slot::Name), Literal("("), PARAMS, Literal("{")],
    ),
    // const name = … ;
    terminated(
        "constant",
        Construct::Variable { read_only: true },
        "const",
        &[Literal("const"), Capture(Slot::Name), Literal("=")],
    ),
    // let name = … ;
    terminated(
        "let-binding",
        Construct::Variable { read_only: false },
        "var",
        &[Literal("let"), Capture(Slot::Name), Literal("=")],
    ),
    // var name = … ;
    terminated(
        "variable",
        Construct::Variable { read_only: false },
        "var",
        &[Literal("var"), Capture(Slot::Name), Literal("=")],
    ),
    // exports.name = … ;
    terminated(
        "export",
        Construct::Variable { read_only: false },
        "var",
        &[
            Literal("exports"),
            Literal("."),
            Capture(Slot::Name),
            Literal("="),
        ],
    ),
    // { … }
    braced("block", Construct::Block, "", &[Literal("{")]),
];
