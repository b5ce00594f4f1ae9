/// Lexing errors.
///
/// Raised while turning source text into tokens: characters that belong to no
/// token, malformed escape sequences and integer literals that do not fit.
pub mod lex_error;
/// Parsing errors.
///
/// Defines the errors raised while building the syntax tree from tokens. Each
/// error names what the parser expected and what it found instead, together
/// with the offending token index and source line.
pub mod parse_error;
/// Module registry errors.
///
/// Raised while loading the JSON file that maps short module names to paths.
pub mod registry_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while executing a program:
/// undeclared or invalid variables, unknown functions, arity mismatches and
/// module loading failures.
pub mod runtime_error;

pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use registry_error::RegistryError;
pub use runtime_error::RuntimeError;

/// Any failure of the source-to-result pipeline.
///
/// Each phase has its own error type; this enum lets entry points such as
/// [`crate::run_source`] report all of them through one `Result`.
#[derive(Debug)]
pub enum Error {
    /// The source text could not be tokenized.
    Lex(LexError),
    /// The token stream is not a valid program.
    Parse(ParseError),
    /// Execution failed.
    Runtime(RuntimeError),
}

impl From<LexError> for Error {
    fn from(error: LexError) -> Self {
        Self::Lex(error)
    }
}

impl From<ParseError> for Error {
    fn from(error: ParseError) -> Self {
        Self::Parse(error)
    }
}

impl From<RuntimeError> for Error {
    fn from(error: RuntimeError) -> Self {
        Self::Runtime(error)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lex(e) => write!(f, "{e}"),
            Self::Parse(e) => write!(f, "{e}"),
            Self::Runtime(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Lex(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Runtime(e) => Some(e),
        }
    }
}
