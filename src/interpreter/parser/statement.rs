use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{FunctionDef, Param, Statement},
    interpreter::{
        lexer::{Lexeme, Token},
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression},
            utils::{
                end_of_input, expect_token, parse_comma_separated, parse_identifier,
                parse_type_keyword, unexpected,
            },
        },
    },
};

/// Parses a single statement.
///
/// The first token decides the statement form:
/// - `define` starts a function declaration.
/// - `Num`, `Float`, `Text`, `List` or `Obj` starts a typed variable
///   declaration.
/// - `set`, `fetch`, `launch`, `when`, `else` and `return` start their
///   respective statements.
///
/// Anything else is parsed as an expression statement.
///
/// # Parameters
/// - `tokens`: Lexeme iterator positioned at the start of a statement.
///
/// # Returns
/// A parsed [`Statement`] node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let Some(&lexeme) = tokens.peek() else {
        return Err(end_of_input("statement"));
    };

    match &lexeme.token {
        Token::Define => parse_function_declaration(tokens),
        Token::Type(keyword) if keyword.starts_declaration() => parse_variable_declaration(tokens),
        Token::Set => parse_set(tokens),
        Token::Fetch => parse_fetch(tokens),
        Token::Launch => parse_launch(tokens),
        Token::When => parse_when(tokens),
        Token::Else => parse_else(tokens),
        Token::Return => parse_return(tokens),
        _ => {
            let expr = parse_expression(tokens)?;
            Ok(Statement::Expression { expr,
                                       line: lexeme.line })
        },
    }
}

/// Parses `<Type> <name> = <expression>`.
fn parse_variable_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let line = tokens.peek().map_or(0, |lexeme| lexeme.line);
    let var_type = parse_type_keyword(tokens, "type for variable declaration")?;
    let name = parse_identifier(tokens, "variable name after type")?;
    expect_token(tokens, &Token::Equals, "'=' after variable name")?;
    let init = parse_expression(tokens)?;

    Ok(Statement::VariableDeclaration { var_type,
                                        name,
                                        init,
                                        line })
}

/// Parses `set <name> = <expression>`.
fn parse_set<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let line = expect_token(tokens, &Token::Set, "'set'")?.line;
    let name = parse_identifier(tokens, "variable name after 'set'")?;
    expect_token(tokens, &Token::Equals, "'=' after variable name in set statement")?;
    let value = parse_expression(tokens)?;

    Ok(Statement::Set { name, value, line })
}

/// Parses a function declaration.
///
/// Syntax:
/// ```text
///     define <Type> <name>(<param>: <Type>, ...) { <statements> }
/// ```
/// Return and parameter types may be any type keyword, including `Bool` and
/// `void`. They are stored on the definition and never checked.
///
/// # Errors
/// Returns a `ParseError` if any part of the signature is missing or the
/// body is not a block.
fn parse_function_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let line = expect_token(tokens, &Token::Define, "'define'")?.line;
    let return_type = parse_type_keyword(tokens, "return type after 'define'")?;
    let name = parse_identifier(tokens, "function name after return type")?;
    expect_token(tokens, &Token::LParen, "'(' after function name")?;
    let params =
        parse_comma_separated(tokens, parse_param, &Token::RParen, "',' or ')' in parameter list")?;
    let body = parse_block(tokens)?;

    Ok(Statement::FunctionDeclaration(Rc::new(FunctionDef { name,
                                                            return_type,
                                                            params,
                                                            body,
                                                            line })))
}

/// Parses one `name: Type` parameter.
fn parse_param<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Param>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let name = parse_identifier(tokens, "parameter name")?;
    expect_token(tokens, &Token::Colon, "':' after parameter name")?;
    let declared_type = parse_type_keyword(tokens, "parameter type after ':'")?;

    Ok(Param { name, declared_type })
}

/// Parses `when (<condition>) { ... }` with an optional `else { ... }`.
///
/// An `else` directly after the consequent block becomes the alternate;
/// anywhere else it is parsed as its own statement.
fn parse_when<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let line = expect_token(tokens, &Token::When, "'when'")?.line;
    expect_token(tokens, &Token::LParen, "'(' after 'when'")?;
    let test = parse_expression(tokens)?;
    expect_token(tokens, &Token::RParen, "')' after condition")?;
    let consequent = parse_block(tokens)?;

    let alternate = if let Some(Lexeme { token: Token::Else, .. }) = tokens.peek() {
        tokens.next();
        Some(parse_block(tokens)?)
    } else {
        None
    };

    Ok(Statement::When { test,
                         consequent,
                         alternate,
                         line })
}

/// Parses a standalone `else { ... }`.
fn parse_else<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let line = expect_token(tokens, &Token::Else, "'else'")?.line;
    let consequent = parse_block(tokens)?;

    Ok(Statement::Else { consequent, line })
}

/// Parses `return <expression>`.
fn parse_return<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let line = expect_token(tokens, &Token::Return, "'return'")?.line;
    let argument = parse_expression(tokens)?;

    Ok(Statement::Return { argument, line })
}

/// Parses `fetch "<name-or-path>"`.
fn parse_fetch<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let line = expect_token(tokens, &Token::Fetch, "'fetch'")?.line;

    match tokens.next() {
        Some(Lexeme { token: Token::Text(path), .. }) => Ok(Statement::Fetch { path: path.clone(),
                                                                               line }),
        Some(lexeme) => Err(unexpected(lexeme, "module path as text")),
        None => Err(end_of_input("module path as text")),
    }
}

/// Parses `launch <name>, <name>, ...`.
///
/// At least one name is required and a trailing comma is an error.
fn parse_launch<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let line = expect_token(tokens, &Token::Launch, "'launch'")?.line;
    let mut names = vec![parse_identifier(tokens, "identifier after 'launch'")?];

    while let Some(Lexeme { token: Token::Comma, .. }) = tokens.peek() {
        tokens.next();
        names.push(parse_identifier(tokens, "identifier after ',' in launch statement")?);
    }

    Ok(Statement::Launch { names, line })
}
