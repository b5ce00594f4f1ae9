/// Variable bindings and lexical scopes.
///
/// Declares type tags, variable slots, raw host bindings and the borrowed
/// scope chain that blocks and function calls create.
pub mod environment;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the program tree, runs statements against the scope
/// chain and the globals, evaluates expressions and dispatches function calls
/// and module statements. It is the core execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates statements and expressions with the language's loose typing.
/// - Manages globals, the function table and the export set.
/// - Reports runtime errors with the line of the failing node.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// lexemes, each carrying a token, its source line and its position. This is
/// the first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with line information.
/// - Handles numeric and text literals, keywords, identifiers and operators.
/// - Skips whitespace and comments; reports lexical errors for invalid input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the lexemes produced by the lexer and constructs a
/// [`Program`](crate::ast::Program) by recursive descent, with precedence
/// climbing for binary operators.
pub mod parser;
/// Static table of short module names used by `fetch`.
pub mod registry;
/// The value module defines the runtime data types for evaluation.
///
/// Declares the `Value` enum (integers, reals, text, booleans and null)
/// together with numeric coercion, truthiness, loose equality and display.
pub mod value;
