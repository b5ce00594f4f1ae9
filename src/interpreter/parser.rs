/// Parser entry points and the shared result type.
///
/// Turns a lexeme slice into a [`Program`](crate::ast::Program) and exposes
/// the top-level expression rule used by every other parser module.
pub mod core;

/// Unary operator and primary expression parsing.
///
/// Handles the prefix operators `-`, `+` and `!`, literals, identifiers,
/// calls and parenthesized expressions.
pub mod unary;

/// Binary operator parsing.
///
/// Implements precedence climbing over the fixed operator table, including
/// the right-associative `**`.
pub mod binary;

/// Block parsing.
///
/// Parses brace-delimited statement sequences used by functions and
/// conditionals.
pub mod block;

/// Utility functions for the parser.
///
/// Provides token expectations, identifier and type-keyword parsing, and the
/// comma-separated list helper.
pub mod utils;

/// Statement parsing.
///
/// Dispatches on the first token of a statement: declarations, `set`,
/// `define`, `when`/`else`, `return`, `fetch`, `launch`, or a bare expression.
pub mod statement;
