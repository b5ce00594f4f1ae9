/// Binary operator evaluation logic.
///
/// Handles the execution of all binary operations in expressions: arithmetic
/// with integer-to-real fallback, exponentiation, and the relational and
/// loose-equality comparisons.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements the prefix operators: numeric negation, numeric plus and
/// logical NOT.
pub mod unary;

/// Core evaluation logic and context management.
///
/// Contains the runtime context, statement and block execution, and the
/// expression dispatcher.
pub mod core;

/// Utility functions for evaluation.
///
/// Name resolution through the scope chain and the globals, declarations
/// and assignment.
pub mod utils;

/// Function evaluation.
///
/// Handles user-defined and built-in function calls, argument binding, tag
/// propagation and return value computation.
pub mod function;

/// Module loading.
///
/// Implements `fetch` and `launch`: path resolution through the registry,
/// the reentrancy guard, isolated module execution and export merging.
pub mod module;
