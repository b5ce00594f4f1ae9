use std::path::PathBuf;

#[derive(Debug)]
/// Represents all errors that can occur during execution.
pub enum RuntimeError {
    /// Read an identifier that is bound nowhere in the scope chain or globals.
    UndefinedVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// `set` targeted a name that was never declared.
    UndeclaredVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// `set` targeted a binding that is not a variable slot.
    InvalidVariable {
        /// The name of the binding.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a function that is neither builtin nor declared.
    UnknownFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A user function was called with the wrong number of arguments.
    Arity {
        /// The name of the function.
        name:     String,
        /// Number of declared parameters.
        expected: usize,
        /// Number of arguments supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A bare module name that the registry does not know.
    ModuleNotFound {
        /// The requested module name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A module file could not be located or read.
    ModuleRead {
        /// The path as requested or resolved.
        path:   PathBuf,
        /// The underlying I/O failure.
        source: std::io::Error,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// Lexing, parsing or executing an imported module failed.
    Module {
        /// The canonical path of the failing module.
        path:  PathBuf,
        /// The failure inside the module.
        error: Box<crate::error::Error>,
        /// The line of the `fetch` statement in the importer.
        line:  usize,
    },
    /// `launch` named something that is neither a function nor a global.
    UnknownExport {
        /// The name that could not be exported.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An operator node the evaluator has no rule for.
    UnknownOperator {
        /// The operator as written.
        operator: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// `get_type` asked about a global that does not exist.
    UndefinedGlobal {
        /// The name of the global.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A builtin received an argument it cannot work with.
    InvalidArgument {
        /// The builtin's name.
        function: String,
        /// Details about why the argument is invalid.
        details:  String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Reading from or writing to the console failed.
    Io {
        /// The underlying I/O failure.
        source: std::io::Error,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// The script asked to terminate via `sys_exit`.
    Exit {
        /// Requested process exit status.
        code: i32,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndefinedVariable { name, line } => {
                write!(f, "Error on line {line}: Undefined variable '{name}'.")
            },
            Self::UndeclaredVariable { name, line } => {
                write!(f, "Error on line {line}: Cannot set undeclared variable '{name}'.")
            },
            Self::InvalidVariable { name, line } => {
                write!(f, "Error on line {line}: '{name}' is not a valid DAV variable.")
            },
            Self::UnknownFunction { name, line } => {
                write!(f, "Error on line {line}: Unknown function '{name}'.")
            },
            Self::Arity { name,
                          expected,
                          found,
                          line, } => write!(f,
                                            "Error on line {line}: Function '{name}' expects {expected} arguments, but got {found}."),
            Self::ModuleNotFound { name, line } => {
                write!(f, "Error on line {line}: Module '{name}' not found in registry.")
            },
            Self::ModuleRead { path, source, line } => write!(f,
                                                              "Error on line {line}: Cannot read module '{}': {source}.",
                                                              path.display()),
            Self::Module { path, error, line } => write!(f,
                                                         "Error on line {line}: In module '{}': {error}",
                                                         path.display()),
            Self::UnknownExport { name, line } => {
                write!(f, "Error on line {line}: Cannot export unknown identifier '{name}'.")
            },
            Self::UnknownOperator { operator, line } => {
                write!(f, "Error on line {line}: Unknown operator '{operator}'.")
            },
            Self::UndefinedGlobal { name, line } => {
                write!(f, "Error on line {line}: Undefined global variable '{name}'.")
            },
            Self::InvalidArgument { function,
                                    details,
                                    line, } => {
                write!(f, "Error on line {line}: Invalid argument to '{function}': {details}.")
            },
            Self::Io { source, line } => write!(f, "Error on line {line}: I/O failure: {source}."),
            Self::Exit { code } => write!(f, "Program exited with status {code}."),
        }
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ModuleRead { source, .. } | Self::Io { source, .. } => Some(source),
            Self::Module { error, .. } => Some(error.as_ref()),
            _ => None,
        }
    }
}
