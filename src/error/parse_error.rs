#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during parsing.
pub enum ParseError {
    /// Found a token other than the one the grammar requires here.
    UnexpectedToken {
        /// Description of what the parser was looking for.
        expected: String,
        /// Rendering of the token actually found.
        found:    String,
        /// Position of the offending token in the token stream.
        index:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Ran out of tokens in the middle of a construct.
    UnexpectedEndOfInput {
        /// Description of what the parser was looking for.
        expected: String,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { expected,
                                    found,
                                    index,
                                    line, } => write!(f,
                                                      "Error on line {line}: Expected {expected}, but found {found} at token {index}."),
            Self::UnexpectedEndOfInput { expected } => {
                write!(f, "Error: Expected {expected}, but found end of input.")
            },
        }
    }
}

impl std::error::Error for ParseError {}
