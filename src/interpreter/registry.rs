use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::error::RegistryError;

/// Static table from short module names to module file paths.
///
/// Consulted by `fetch` when its argument contains no path separator. The
/// table is read once, before execution starts, and never changes during a
/// run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleRegistry {
    modules: HashMap<String, PathBuf>,
}

impl ModuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the path registered for `name`.
    pub fn insert(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        self.modules.insert(name.into(), path.into());
    }

    /// Returns the path registered for `name`, if any.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&Path> {
        self.modules.get(name).map(PathBuf::as_path)
    }

    /// Number of registered modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns `true` if no module is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Parses a registry from JSON text.
    ///
    /// The text must be a single object whose values are all strings, e.g.
    /// `{ "math": "lib/math.dav" }`.
    ///
    /// # Errors
    /// Returns a [`RegistryError`] if the text is not JSON, is not an object,
    /// or maps a name to a non-string value.
    ///
    /// # Example
    /// ```
    /// use dav::interpreter::registry::ModuleRegistry;
    ///
    /// let registry = ModuleRegistry::from_json(r#"{ "math": "lib/math.dav" }"#).unwrap();
    ///
    /// assert_eq!(registry.resolve("math").unwrap().to_str(), Some("lib/math.dav"));
    /// assert!(ModuleRegistry::from_json(r#"{ "math": 1 }"#).is_err());
    /// ```
    pub fn from_json(text: &str) -> Result<Self, RegistryError> {
        let json: serde_json::Value =
            serde_json::from_str(text).map_err(|source| RegistryError::Json { source })?;
        let Some(entries) = json.as_object() else {
            return Err(RegistryError::NotAnObject);
        };

        let mut registry = Self::new();
        for (name, entry) in entries {
            let Some(path) = entry.as_str() else {
                return Err(RegistryError::InvalidEntry { name: name.clone() });
            };
            registry.insert(name.clone(), path);
        }

        Ok(registry)
    }

    /// Reads and parses a registry file.
    ///
    /// # Errors
    /// Returns [`RegistryError::Read`] if the file cannot be read, otherwise
    /// the errors of [`ModuleRegistry::from_json`].
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let text = fs::read_to_string(path).map_err(|source| {
                                               RegistryError::Read { path: path.to_path_buf(),
                                                                     source }
                                           })?;
        Self::from_json(&text)
    }
}
