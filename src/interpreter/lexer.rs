use std::fmt;

use logos::{Lexer, Logos};

use crate::error::LexError;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(error = LexingError)]
pub enum Token {
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Number(NumberLiteral),
    /// Numeric literal tokens with a fractional part, such as `3.14` or `2.`.
    #[regex(r"[0-9]+\.[0-9]*", parse_float)]
    Float(f64),
    /// Quoted text, `"..."` or `'...'`, with escapes already resolved.
    #[token("\"", lex_text)]
    #[token("'", lex_text)]
    Text(String),
    /// Identifier tokens; variable or function names such as `x` or `square`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// Type keywords used by declarations and signatures.
    #[token("Num", |_| TypeKeyword::Num)]
    #[token("Float", |_| TypeKeyword::Float)]
    #[token("Text", |_| TypeKeyword::Text)]
    #[token("List", |_| TypeKeyword::List)]
    #[token("Obj", |_| TypeKeyword::Obj)]
    #[token("Bool", |_| TypeKeyword::Bool)]
    #[token("void", |_| TypeKeyword::Void)]
    Type(TypeKeyword),
    /// `true` or `false`.
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Bool(bool),
    /// `when`
    #[token("when")]
    When,
    /// `else`
    #[token("else")]
    Else,
    /// `define`
    #[token("define")]
    Define,
    /// `return`
    #[token("return")]
    Return,
    /// `class` (reserved)
    #[token("class")]
    Class,
    /// `new` (reserved)
    #[token("new")]
    New,
    /// `set`
    #[token("set")]
    Set,
    /// `fetch`
    #[token("fetch")]
    Fetch,
    /// `launch`
    #[token("launch")]
    Launch,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `**`
    #[token("**")]
    StarStar,
    /// `=`
    #[token("=")]
    Equals,
    /// `>`
    #[token(">")]
    Greater,
    /// `<`
    #[token("<")]
    Less,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `!`
    #[token("!")]
    Bang,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
    /// `.`
    #[token(".")]
    Dot,
    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// `/* Block comments. */` Not nested; an unterminated one runs to the
    /// end of input.
    #[token("/*", skip_block_comment)]
    BlockComment,
    /// Line breaks, counted and skipped.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Any Unicode whitespace other than a line break, plus the byte-order
    /// mark.
    #[regex(r"[\p{White_Space}\x{FEFF}--\n]+", logos::skip)]
    Ignored,
}

/// The value of an integer literal.
///
/// Digits that do not fit an `i64` keep their nearest `f64` value, the same
/// way integer arithmetic falls back to reals on overflow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberLiteral {
    /// Fits in an `i64`.
    Integer(i64),
    /// Too wide for an `i64`.
    Real(f64),
}

impl fmt::Display for NumberLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(x) => write!(f, "{x}"),
        }
    }
}

/// The declared-type keywords.
///
/// Only `Num`, `Float`, `Text`, `List` and `Obj` may start a variable
/// declaration; `Bool` and `void` appear in function signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKeyword {
    /// `Num`
    Num,
    /// `Float`
    Float,
    /// `Text`
    Text,
    /// `List`
    List,
    /// `Obj`
    Obj,
    /// `Bool`
    Bool,
    /// `void`
    Void,
}

impl TypeKeyword {
    /// Returns `true` if a statement starting with this keyword is a variable
    /// declaration.
    #[must_use]
    pub const fn starts_declaration(self) -> bool {
        matches!(self, Self::Num | Self::Float | Self::Text | Self::List | Self::Obj)
    }

    /// The keyword as written in source.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Num => "Num",
            Self::Float => "Float",
            Self::Text => "Text",
            Self::List => "List",
            Self::Obj => "Obj",
            Self::Bool => "Bool",
            Self::Void => "void",
        }
    }
}

impl fmt::Display for TypeKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse classification of tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Integer literal.
    Number,
    /// Fractional literal.
    Float,
    /// Quoted text.
    Text,
    /// Any non-keyword name.
    Identifier,
    /// Reserved word, including type names and `true`/`false`.
    Keyword,
    /// Arithmetic, comparison and assignment operators.
    Operator,
    /// `( ) { } , : .`
    Punctuation,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Number => "NUMBER",
            Self::Float => "FLOAT",
            Self::Text => "TEXT",
            Self::Identifier => "IDENTIFIER",
            Self::Keyword => "KEYWORD",
            Self::Operator => "OPERATOR",
            Self::Punctuation => "PUNCTUATION",
        };
        f.write_str(name)
    }
}

impl Token {
    /// Returns the coarse kind of this token.
    ///
    /// # Example
    /// ```
    /// use dav::interpreter::lexer::{Token, TokenKind};
    ///
    /// assert_eq!(Token::StarStar.kind(), TokenKind::Operator);
    /// assert_eq!(Token::Bool(true).kind(), TokenKind::Keyword);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        match self {
            Self::Number(_) => TokenKind::Number,
            Self::Float(_) => TokenKind::Float,
            Self::Text(_) => TokenKind::Text,
            Self::Identifier(_) => TokenKind::Identifier,
            Self::Type(_)
            | Self::Bool(_)
            | Self::When
            | Self::Else
            | Self::Define
            | Self::Return
            | Self::Class
            | Self::New
            | Self::Set
            | Self::Fetch
            | Self::Launch => TokenKind::Keyword,
            Self::EqualEqual
            | Self::BangEqual
            | Self::GreaterEqual
            | Self::LessEqual
            | Self::StarStar
            | Self::Equals
            | Self::Greater
            | Self::Less
            | Self::Plus
            | Self::Minus
            | Self::Star
            | Self::Slash
            | Self::Bang => TokenKind::Operator,
            Self::LParen
            | Self::RParen
            | Self::LBrace
            | Self::RBrace
            | Self::Comma
            | Self::Colon
            | Self::Dot
            | Self::Comment
            | Self::BlockComment
            | Self::NewLine
            | Self::Ignored => TokenKind::Punctuation,
        }
    }

    /// Short description used in parse errors, e.g. `KEYWORD 'when'`.
    #[must_use]
    pub fn describe(&self) -> String {
        format!("{} '{self}'", self.kind())
    }
}

/// Renders the token as source text.
///
/// Lexing the rendering again yields an equal token. Text is re-quoted with
/// `"` and escaped; floats always keep a decimal point.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(literal) => write!(f, "{literal}"),
            Self::Float(x) => {
                let rendered = x.to_string();
                if rendered.contains('.') {
                    f.write_str(&rendered)
                } else {
                    write!(f, "{rendered}.0")
                }
            },
            Self::Text(text) => write_quoted(f, text),
            Self::Identifier(name) => f.write_str(name),
            Self::Type(keyword) => write!(f, "{keyword}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::When => f.write_str("when"),
            Self::Else => f.write_str("else"),
            Self::Define => f.write_str("define"),
            Self::Return => f.write_str("return"),
            Self::Class => f.write_str("class"),
            Self::New => f.write_str("new"),
            Self::Set => f.write_str("set"),
            Self::Fetch => f.write_str("fetch"),
            Self::Launch => f.write_str("launch"),
            Self::EqualEqual => f.write_str("=="),
            Self::BangEqual => f.write_str("!="),
            Self::GreaterEqual => f.write_str(">="),
            Self::LessEqual => f.write_str("<="),
            Self::StarStar => f.write_str("**"),
            Self::Equals => f.write_str("="),
            Self::Greater => f.write_str(">"),
            Self::Less => f.write_str("<"),
            Self::Plus => f.write_str("+"),
            Self::Minus => f.write_str("-"),
            Self::Star => f.write_str("*"),
            Self::Slash => f.write_str("/"),
            Self::Bang => f.write_str("!"),
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
            Self::LBrace => f.write_str("{"),
            Self::RBrace => f.write_str("}"),
            Self::Comma => f.write_str(","),
            Self::Colon => f.write_str(":"),
            Self::Dot => f.write_str("."),
            Self::Comment | Self::BlockComment | Self::NewLine | Self::Ignored => Ok(()),
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    f.write_str("\"")?;
    for ch in text.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            c if c.is_control() => write!(f, "\\u{:04X}", u32::from(c))?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Error produced inside token callbacks; turned into a [`LexError`] by
/// [`tokenize`] once the offending slice and line are known.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LexingError {
    /// No token matches at this position.
    #[default]
    UnexpectedCharacter,
    /// A malformed `\x`/`\u` escape, as written.
    InvalidEscape(String),
}

impl LexingError {
    fn into_lex_error(self, slice: &str, line: usize) -> LexError {
        match self {
            Self::UnexpectedCharacter => {
                LexError::UnexpectedCharacter { character: slice.chars().next().unwrap_or('\0'),
                                                line }
            },
            Self::InvalidEscape(sequence) => LexError::InvalidEscape { sequence, line },
        }
    }
}

/// A token together with its position in the source and in the stream.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    /// The token itself.
    pub token: Token,
    /// Line the token ends on.
    pub line:  usize,
    /// Position of the token in the token sequence.
    pub index: usize,
}

/// Converts source text into the ordered sequence of lexemes.
///
/// Whitespace and comments are skipped. The first character that starts no
/// token aborts tokenization.
///
/// # Errors
/// Returns a [`LexError`] for unexpected characters and malformed `\x`/`\u`
/// escapes.
///
/// # Example
/// ```
/// use dav::interpreter::lexer::{Token, tokenize};
///
/// let lexemes = tokenize("Num x = 2 ** 3 // cube").unwrap();
/// let tokens: Vec<Token> = lexemes.into_iter().map(|l| l.token).collect();
///
/// assert_eq!(tokens.len(), 6);
/// assert_eq!(tokens[4], Token::StarStar);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Lexeme>, LexError> {
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });
    let mut lexemes = Vec::new();

    while let Some(result) = lexer.next() {
        let line = lexer.extras.line;
        match result {
            Ok(token) => {
                let index = lexemes.len();
                lexemes.push(Lexeme { token, line, index });
            },
            Err(error) => return Err(error.into_lex_error(lexer.slice(), line)),
        }
    }

    Ok(lexemes)
}

/// Parses an integer literal from the current token slice.
fn parse_integer(lex: &Lexer<Token>) -> Option<NumberLiteral> {
    let digits = lex.slice();
    match digits.parse() {
        Ok(n) => Some(NumberLiteral::Integer(n)),
        Err(_) => digits.parse().ok().map(NumberLiteral::Real),
    }
}

/// Parses a fractional literal from the current token slice.
fn parse_float(lex: &Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Skips past the closing `*/`, or to the end of input if there is none.
fn skip_block_comment(lex: &mut Lexer<Token>) -> logos::Skip {
    let rest = lex.remainder();
    let consumed = rest.find("*/").map_or(rest.len(), |end| end + 2);

    lex.extras.line += rest[..consumed].matches('\n').count();
    lex.bump(consumed);
    logos::Skip
}

/// Reads a quoted text literal after its opening quote.
///
/// The literal ends at the next unescaped matching quote. Without one, it
/// silently runs to the end of input.
fn lex_text(lex: &mut Lexer<Token>) -> Result<String, LexingError> {
    let quote = lex.slice().chars().next().unwrap_or('"');
    let rest = lex.remainder();
    let mut text = String::new();
    let mut consumed = rest.len();
    let mut chars = rest.char_indices();

    while let Some((offset, ch)) = chars.next() {
        if ch == quote {
            consumed = offset + ch.len_utf8();
            break;
        }
        if ch == '\n' {
            lex.extras.line += 1;
        }
        if ch != '\\' {
            text.push(ch);
            continue;
        }

        match chars.next() {
            None => break,
            Some((_, 'n')) => text.push('\n'),
            Some((_, 't')) => text.push('\t'),
            Some((_, 'r')) => text.push('\r'),
            Some((at, kind @ ('x' | 'u'))) => {
                let digits = if kind == 'x' { 2 } else { 4 };
                text.push(hex_escape(rest, at, kind, digits)?);
                chars.nth(digits - 1);
            },
            Some((_, other)) => {
                if other == '\n' {
                    lex.extras.line += 1;
                }
                text.push(other);
            },
        }
    }

    lex.bump(consumed);
    Ok(text)
}

/// Decodes the `digits` hex digits following the escape letter at `at`.
fn hex_escape(rest: &str, at: usize, kind: char, digits: usize) -> Result<char, LexingError> {
    let start = at + 1;
    let hex = rest.get(start..start + digits)
                  .filter(|hex| hex.chars().all(|c| c.is_ascii_hexdigit()));

    hex.and_then(|hex| u32::from_str_radix(hex, 16).ok())
       .and_then(char::from_u32)
       .ok_or_else(|| {
           let written: String = rest[start..].chars().take(digits).collect();
           LexingError::InvalidEscape(format!("\\{kind}{written}"))
       })
}
