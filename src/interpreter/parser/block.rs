use std::iter::Peekable;

use crate::{
    ast::Block,
    interpreter::{
        lexer::{Lexeme, Token},
        parser::{
            core::ParseResult,
            statement::parse_statement,
            utils::{end_of_input, expect_token},
        },
    },
};

/// Parses a block delimited by braces.
///
/// A block consists of zero or more statements. Parsing continues until a
/// closing `}` token is encountered.
///
/// Grammar: `block := "{" statement* "}"`
///
/// # Parameters
/// - `tokens`: Lexeme stream positioned at the opening brace.
///
/// # Returns
/// A [`Block`] containing all parsed statements and the line of its `{`.
///
/// # Errors
/// Returns a `ParseError` if the opening brace is missing, a statement fails
/// to parse, or the input ends before the closing brace.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Block>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let line = expect_token(tokens, &Token::LBrace, "'{' to start block")?.line;
    let mut statements = Vec::new();

    loop {
        match tokens.peek() {
            Some(Lexeme { token: Token::RBrace, .. }) => {
                tokens.next();
                break;
            },
            Some(_) => statements.push(parse_statement(tokens)?),
            None => return Err(end_of_input("'}' to close block")),
        }
    }

    Ok(Block { statements, line })
}
