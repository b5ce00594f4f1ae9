use std::iter::Peekable;

use crate::{
    ast::{Expr, Program},
    error::ParseError,
    interpreter::{
        lexer::Lexeme,
        parser::{binary::parse_binary, statement::parse_statement},
    },
};

/// Result type used by every parsing function: the parsed node, or the
/// `ParseError` that stopped parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a whole token sequence into a program.
///
/// Statements are parsed one after another until the tokens run out. There
/// are no statement separators; each statement ends where its grammar does.
///
/// # Parameters
/// - `lexemes`: The output of [`tokenize`](crate::interpreter::lexer::tokenize).
///
/// # Returns
/// The parsed [`Program`].
///
/// # Example
/// ```
/// use dav::{
///     ast::Statement,
///     interpreter::{lexer::tokenize, parser::core::parse_program},
/// };
///
/// let lexemes = tokenize("Num x = 1 set x = x + 1").unwrap();
/// let program = parse_program(&lexemes).unwrap();
///
/// assert_eq!(program.body.len(), 2);
/// assert!(matches!(program.body[1], Statement::Set { .. }));
/// ```
pub fn parse_program(lexemes: &[Lexeme]) -> ParseResult<Program> {
    let mut tokens = lexemes.iter().peekable();
    let mut body = Vec::new();

    while tokens.peek().is_some() {
        body.push(parse_statement(&mut tokens)?);
    }

    Ok(Program { body })
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It starts precedence
/// climbing at the lowest level, so every binary operator is accepted.
///
/// Grammar: `expression := binary(0)`
///
/// # Parameters
/// - `tokens`: Lexeme iterator with lookahead.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    parse_binary(tokens, 0)
}
