#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while tokenizing source text.
pub enum LexError {
    /// A character that starts no token.
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// A `\x` or `\u` escape without the required hex digits, or one that
    /// names no valid character.
    InvalidEscape {
        /// The escape sequence as written, including the backslash.
        sequence: String,
        /// The source line where the error occurred.
        line:     usize,
    },
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedCharacter { character, line } => {
                write!(f, "Error on line {line}: Unexpected character: {character:?}.")
            },
            Self::InvalidEscape { sequence, line } => {
                write!(f, "Error on line {line}: Invalid escape sequence '{sequence}'.")
            },
        }
    }
}

impl std::error::Error for LexError {}
