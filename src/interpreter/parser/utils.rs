use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::{Lexeme, Token, TypeKeyword},
        parser::core::ParseResult,
    },
};

/// Builds the error for a lexeme that does not fit the grammar.
pub(in crate::interpreter::parser) fn unexpected(lexeme: &Lexeme, expected: &str) -> ParseError {
    ParseError::UnexpectedToken { expected: expected.to_string(),
                                  found:    lexeme.token.describe(),
                                  index:    lexeme.index,
                                  line:     lexeme.line, }
}

/// Builds the error for input that stops in the middle of a construct.
pub(in crate::interpreter::parser) fn end_of_input(expected: &str) -> ParseError {
    ParseError::UnexpectedEndOfInput { expected: expected.to_string() }
}

/// Consumes the next lexeme, which must carry exactly `expected`.
///
/// # Parameters
/// - `tokens`: Lexeme iterator.
/// - `expected`: The token that must come next.
/// - `description`: What the caller was looking for, used in the error.
///
/// # Returns
/// The consumed lexeme, so callers can read its line.
///
/// # Errors
/// Returns a `ParseError` if another token follows or the input ends.
pub(in crate::interpreter::parser) fn expect_token<'a, I>(tokens: &mut Peekable<I>,
                                                          expected: &Token,
                                                          description: &str)
                                                          -> ParseResult<&'a Lexeme>
    where I: Iterator<Item = &'a Lexeme>
{
    match tokens.next() {
        Some(lexeme) if lexeme.token == *expected => Ok(lexeme),
        Some(lexeme) => Err(unexpected(lexeme, description)),
        None => Err(end_of_input(description)),
    }
}

/// Parses a plain identifier and returns its name.
///
/// # Errors
/// Returns a `ParseError` if the next token is not an identifier or the
/// input ends.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>,
                                                              description: &str)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a Lexeme>
{
    match tokens.next() {
        Some(Lexeme { token: Token::Identifier(name), .. }) => Ok(name.clone()),
        Some(lexeme) => Err(unexpected(lexeme, description)),
        None => Err(end_of_input(description)),
    }
}

/// Parses any type keyword (`Num`, `Float`, `Text`, `List`, `Obj`, `Bool`,
/// `void`).
pub(in crate::interpreter::parser) fn parse_type_keyword<'a, I>(tokens: &mut Peekable<I>,
                                                                description: &str)
                                                                -> ParseResult<TypeKeyword>
    where I: Iterator<Item = &'a Lexeme>
{
    match tokens.next() {
        Some(Lexeme { token: Token::Type(keyword), .. }) => Ok(*keyword),
        Some(lexeme) => Err(unexpected(lexeme, description)),
        None => Err(end_of_input(description)),
    }
}

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by parameter lists and call arguments. It
/// repeatedly calls `parse_item` to parse one element, expecting either a
/// comma, to continue the list, or the closing token, to end it. An
/// immediately encountered closing token produces an empty list. Trailing
/// commas are not accepted.
///
/// Grammar (simplified): `list := (item ("," item)*)? closing`
///
/// # Parameters
/// - `tokens`: Lexeme iterator positioned after the opening token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list.
/// - `expected`: Description used when neither `,` nor `closing` follows.
///
/// # Returns
/// A vector of parsed items.
///
/// # Errors
/// Returns a `ParseError` if an item fails to parse, an unexpected token is
/// encountered, or the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token,
    expected: &str)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let mut items = Vec::new();
    if let Some(lexeme) = tokens.peek()
       && lexeme.token == *closing
    {
        tokens.next();

        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.next() {
            Some(Lexeme { token: Token::Comma, .. }) => {},
            Some(lexeme) if lexeme.token == *closing => break,
            Some(lexeme) => return Err(unexpected(lexeme, expected)),
            None => return Err(end_of_input(expected)),
        }
    }
    Ok(items)
}
