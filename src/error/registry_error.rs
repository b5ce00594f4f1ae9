use std::path::PathBuf;

#[derive(Debug)]
/// Represents the ways a module registry file can be unusable.
pub enum RegistryError {
    /// The registry file could not be read.
    Read {
        /// The registry file.
        path:   PathBuf,
        /// The underlying I/O failure.
        source: std::io::Error,
    },
    /// The registry text is not valid JSON.
    Json {
        /// The parser's complaint.
        source: serde_json::Error,
    },
    /// The top-level JSON value is not an object.
    NotAnObject,
    /// A module name maps to something other than a path string.
    InvalidEntry {
        /// The offending module name.
        name: String,
    },
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "Cannot read module registry '{}': {source}.", path.display())
            },
            Self::Json { source } => write!(f, "Module registry is not valid JSON: {source}."),
            Self::NotAnObject => {
                write!(f, "Module registry must be a JSON object mapping names to paths.")
            },
            Self::InvalidEntry { name } => {
                write!(f, "Module registry entry '{name}' must be a path string.")
            },
        }
    }
}

impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Json { source } => Some(source),
            Self::NotAnObject | Self::InvalidEntry { .. } => None,
        }
    }
}
