//! # dav
//!
//! dav is an interpreter for the DAV scripting language, written in Rust.
//! It tokenizes, parses and executes scripts with typed variable tags,
//! user-defined functions, conditionals and a small module system built on
//! `fetch` and `launch`.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::path::Path;

use crate::{
    ast::Program,
    error::Error,
    interpreter::{
        evaluator::core::Context, lexer::tokenize, parser::core::parse_program,
        registry::ModuleRegistry,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Program`, `Statement` and `Expr` types that
/// represent the syntactic structure of a script as a tree. The AST is built
/// by the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines statement and expression types for all language constructs.
/// - Attaches source lines to AST nodes for error reporting.
pub mod ast;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// This module defines all errors that can be raised while running a script,
/// plus the errors of loading a module registry. Every error carries the
/// source line it refers to.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches line numbers and detailed messages for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations and module loading to provide a complete runtime for DAV
/// scripts.
pub mod interpreter;
/// General utilities for safe numeric conversion.
pub mod util;

/// Tokenizes and parses `source` into a program.
///
/// # Errors
/// Returns the lexing or parsing error that stopped the process.
///
/// # Example
/// ```
/// use dav::parse;
///
/// let program = parse("Num x = 1\nwrite(x)").unwrap();
/// assert_eq!(program.body.len(), 2);
///
/// assert!(parse("Num = 1").is_err());
/// ```
pub fn parse(source: &str) -> Result<Program, Error> {
    Ok(parse_program(&tokenize(source)?)?)
}

/// Runs `source` in a new context and returns the context afterwards.
///
/// The context uses an empty module registry, so only path-based `fetch`
/// statements work.
///
/// # Errors
/// Returns an error if lexing, parsing or evaluation fails.
///
/// # Examples
/// ```
/// use dav::{interpreter::value::core::Value, run_source};
///
/// let context = run_source("Num x = 2 ** 3 ** 2").unwrap();
/// assert_eq!(context.global("x"), Some(&Value::Integer(512)));
///
/// // `y` is never declared.
/// assert!(run_source("set y = 1").is_err());
/// ```
pub fn run_source(source: &str) -> Result<Context, Error> {
    let program = parse(source)?;
    let mut context = Context::new();
    context.run(&program)?;
    Ok(context)
}

/// Runs the script at `path` as the entry module, resolving bare `fetch`
/// names through `registry`.
///
/// # Errors
/// Returns an error if the file cannot be read, or if lexing, parsing or
/// evaluation fails.
pub fn run_file(path: &Path, registry: ModuleRegistry) -> Result<Context, Error> {
    let mut context = Context::with_registry(registry);
    context.run_file(path)?;
    Ok(context)
}
