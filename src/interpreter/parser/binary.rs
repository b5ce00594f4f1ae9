use std::iter::Peekable;

use crate::{
    ast::{Expr, Operator},
    interpreter::{
        lexer::{Lexeme, Token},
        parser::{core::ParseResult, unary::parse_unary},
    },
};

/// Parses binary expressions by precedence climbing.
///
/// Operators bind according to [`precedence`]. Operators of the same level
/// associate to the left, except `**`, whose right operand is parsed at its
/// own level so that `a ** b ** c` becomes `a ** (b ** c)`.
///
/// Operator tokens without a table entry (`=` and `!`) sit at level 0. They
/// still parse as binary operators at the top level, and evaluation rejects
/// them.
///
/// The rule is: `binary(min) := unary (op binary(next(op)))*` where only
/// operators with `precedence(op) >= min` are consumed.
///
/// # Parameters
/// - `tokens`: Lexeme stream with lookahead.
/// - `min_precedence`: Lowest operator level this call may consume.
///
/// # Returns
/// An `Expr::Binary` tree, or the unary expression if no operator follows.
///
/// # Example
/// ```
/// use dav::{
///     ast::{Expr, Operator},
///     interpreter::{lexer::tokenize, parser::binary::parse_binary},
/// };
///
/// let lexemes = tokenize("1 + 2 * 3").unwrap();
/// let expr = parse_binary(&mut lexemes.iter().peekable(), 0).unwrap();
///
/// let Expr::Binary { op, right, .. } = expr else { panic!() };
/// assert_eq!(op, Operator::Plus);
/// assert!(matches!(*right, Expr::Binary { op: Operator::Star, .. }));
/// ```
pub fn parse_binary<'a, I>(tokens: &mut Peekable<I>, min_precedence: u8) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let mut left = parse_unary(tokens)?;

    while let Some(&lexeme) = tokens.peek()
          && let Some(op) = token_to_binary_operator(&lexeme.token)
          && precedence(op) >= min_precedence
    {
        tokens.next();
        let next_min = if op == Operator::Power { precedence(op) } else { precedence(op) + 1 };
        let right = parse_binary(tokens, next_min)?;
        left = Expr::Binary { left: Box::new(left),
                              op,
                              right: Box::new(right),
                              line: lexeme.line };
    }

    Ok(left)
}

/// Binding strength of a binary operator, from 1 (equality) to 5 (power).
#[must_use]
pub const fn precedence(op: Operator) -> u8 {
    match op {
        Operator::Equal | Operator::NotEqual => 1,
        Operator::Greater | Operator::Less | Operator::GreaterEqual | Operator::LessEqual => 2,
        Operator::Plus | Operator::Minus => 3,
        Operator::Star | Operator::Slash => 4,
        Operator::Power => 5,
        Operator::Not | Operator::Assign => 0,
    }
}

/// Maps an operator token to its AST operator.
///
/// Every operator token maps, so that an operator in binary position is
/// always consumed; non-operator tokens end the expression.
const fn token_to_binary_operator(token: &Token) -> Option<Operator> {
    match token {
        Token::Plus => Some(Operator::Plus),
        Token::Minus => Some(Operator::Minus),
        Token::Star => Some(Operator::Star),
        Token::Slash => Some(Operator::Slash),
        Token::StarStar => Some(Operator::Power),
        Token::EqualEqual => Some(Operator::Equal),
        Token::BangEqual => Some(Operator::NotEqual),
        Token::Greater => Some(Operator::Greater),
        Token::Less => Some(Operator::Less),
        Token::GreaterEqual => Some(Operator::GreaterEqual),
        Token::LessEqual => Some(Operator::LessEqual),
        Token::Bang => Some(Operator::Not),
        Token::Equals => Some(Operator::Assign),
        _ => None,
    }
}
