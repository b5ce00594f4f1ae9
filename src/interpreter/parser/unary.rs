use std::iter::Peekable;

use crate::{
    ast::{Expr, LiteralValue, Operator},
    interpreter::{
        lexer::{Lexeme, NumberLiteral, Token},
        parser::{
            core::{ParseResult, parse_expression},
            utils::{end_of_input, expect_token, parse_comma_separated, unexpected},
        },
    },
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-`  (numeric negation)
/// - `+`  (numeric coercion)
/// - `!`  (logical not)
///
/// Unary operators are right-associative, so an input like `!-x` is parsed as
/// `!( -x )`.
///
/// Grammar:
/// ```text
///     unary := ("-" | "+" | "!") unary
///            | primary
/// ```
/// # Parameters
/// - `tokens`: Lexeme iterator with lookahead.
///
/// # Returns
/// An [`Expr::Unary`] or a primary expression.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    if let Some(&lexeme) = tokens.peek()
       && let Some(op) = token_to_unary_operator(&lexeme.token)
    {
        tokens.next();
        let operand = parse_unary(tokens)?;
        return Ok(Expr::Unary { op,
                                operand: Box::new(operand),
                                line: lexeme.line });
    }

    parse_primary(tokens)
}

/// Parses a primary expression.
///
/// Grammar:
/// ```text
///     primary := NUMBER | FLOAT | TEXT | "true" | "false"
///              | IDENTIFIER ( "(" arguments ")" )?
///              | "(" expression ")"
/// ```
///
/// # Errors
/// Returns a `ParseError` if the next token cannot start an expression or
/// the input ends.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let Some(lexeme) = tokens.next() else {
        return Err(end_of_input("expression"));
    };
    let line = lexeme.line;

    let value = match &lexeme.token {
        Token::Number(NumberLiteral::Integer(n)) => LiteralValue::Integer(*n),
        Token::Number(NumberLiteral::Real(x)) | Token::Float(x) => LiteralValue::Real(*x),
        Token::Text(text) => LiteralValue::Text(text.clone()),
        Token::Bool(b) => LiteralValue::Bool(*b),
        Token::Identifier(name) => return parse_identifier_or_call(tokens, name, line),
        Token::LParen => return parse_grouping(tokens),
        _ => return Err(unexpected(lexeme, "expression")),
    };

    Ok(Expr::Literal { value, line })
}

/// Parses the remainder of a parenthesized expression after `(`.
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let expr = parse_expression(tokens)?;
    expect_token(tokens, &Token::RParen, "')' after expression")?;

    Ok(expr)
}

/// Parses either a variable reference or a call.
///
/// A call is recognized only when `(` directly follows the identifier.
fn parse_identifier_or_call<'a, I>(tokens: &mut Peekable<I>,
                                   name: &str,
                                   line: usize)
                                   -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    if let Some(Lexeme { token: Token::LParen, .. }) = tokens.peek() {
        tokens.next();
        let arguments = parse_comma_separated(tokens,
                                              parse_expression,
                                              &Token::RParen,
                                              "',' or ')' after call argument")?;

        return Ok(Expr::Call { callee: name.to_string(),
                               arguments,
                               line });
    }

    Ok(Expr::Identifier { name: name.to_string(),
                          line })
}

const fn token_to_unary_operator(token: &Token) -> Option<Operator> {
    match token {
        Token::Minus => Some(Operator::Minus),
        Token::Plus => Some(Operator::Plus),
        Token::Bang => Some(Operator::Not),
        _ => None,
    }
}
