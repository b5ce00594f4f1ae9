use std::{
    collections::HashMap,
    fs, mem,
    path::{Path, PathBuf},
};

use crate::{
    error::{Error, RuntimeError},
    interpreter::{
        environment::Binding,
        evaluator::{
            core::{Context, EvalResult},
            function::core::Function,
        },
        lexer::tokenize,
        parser::core::parse_program,
    },
};

/// A symbol marked with `launch`, as handed to an importer.
#[derive(Debug, Clone)]
pub enum Export {
    /// A builtin or user function.
    Function(Function),
    /// A global binding, copied with its tag.
    Variable(Binding),
}

/// Interpreter state owned by one module run. Swapped out while an imported
/// module executes.
struct ModuleState {
    globals:        HashMap<String, Binding>,
    functions:      HashMap<String, Function>,
    exports:        HashMap<String, Export>,
    current_module: Option<PathBuf>,
}

impl Context {
    /// Runs the script at `path` as the entry module.
    ///
    /// While it runs, the script's canonical path is the current module and
    /// is marked as loading, so modules that fetch it back are skipped. Both
    /// are released once the run ends, whether it succeeds or fails.
    ///
    /// # Errors
    /// `ModuleRead` (reported on line 0) if the file cannot be located or
    /// read, otherwise any lexing, parsing or runtime error of the script.
    pub fn run_file(&mut self, path: &Path) -> Result<(), Error> {
        let read_error = |source| RuntimeError::ModuleRead { path: path.to_path_buf(),
                                                             source,
                                                             line: 0 };
        let path = path.canonicalize().map_err(read_error)?;
        let source = fs::read_to_string(&path).map_err(read_error)?;
        let program = parse_program(&tokenize(&source)?)?;

        self.loading_modules.insert(path.clone());
        let previous = mem::replace(&mut self.current_module, Some(path.clone()));
        let result = self.run(&program);
        self.current_module = previous;
        self.loading_modules.remove(&path);

        result?;
        Ok(())
    }

    /// Executes `fetch "<requested>"`.
    ///
    /// A request with a path separator is a file path, anything else a
    /// registry name. Fetching the running module or a module that is still
    /// loading does nothing. Otherwise the module runs and its exports are
    /// merged into this context: functions into the function table, variables
    /// into the globals.
    ///
    /// # Errors
    /// - `ModuleNotFound` for a name the registry does not know.
    /// - `ModuleRead` if the file cannot be located or read.
    /// - `Module` if the module fails to lex, parse or run.
    pub(crate) fn fetch(&mut self, requested: &str, line: usize) -> EvalResult<()> {
        let location = self.locate_module(requested, line)?;
        let path = location.canonicalize()
                           .map_err(|source| RuntimeError::ModuleRead { path: location,
                                                                         source,
                                                                         line })?;

        if self.current_module.as_deref() == Some(path.as_path())
           || self.loading_modules.contains(&path)
        {
            return Ok(());
        }

        self.loading_modules.insert(path.clone());
        let result = self.execute_module(&path, line);
        self.loading_modules.remove(&path);

        for (name, export) in result? {
            match export {
                Export::Function(function) => {
                    self.functions.insert(name, function);
                },
                Export::Variable(binding) => {
                    self.globals.insert(name, binding);
                },
            }
        }

        Ok(())
    }

    /// Executes `launch a, b, ...`, copying each symbol into the export set.
    ///
    /// Functions take priority over globals of the same name.
    ///
    /// # Errors
    /// Returns `UnknownExport` for the first name that is neither a function
    /// nor a global. Names before it stay exported.
    pub(crate) fn launch(&mut self, names: &[String], line: usize) -> EvalResult<()> {
        for name in names {
            let export = if let Some(function) = self.functions.get(name) {
                Export::Function(function.clone())
            } else if let Some(binding) = self.globals.get(name) {
                Export::Variable(binding.clone())
            } else {
                return Err(RuntimeError::UnknownExport { name: name.clone(),
                                                         line });
            };
            self.exports.insert(name.clone(), export);
        }
        Ok(())
    }

    fn locate_module(&self, requested: &str, line: usize) -> EvalResult<PathBuf> {
        if requested.contains(['/', '\\']) {
            return Ok(PathBuf::from(requested));
        }
        self.registry
            .resolve(requested)
            .map(Path::to_path_buf)
            .ok_or_else(|| RuntimeError::ModuleNotFound { name: requested.to_string(),
                                                          line })
    }

    /// Reads, parses and runs the module at `path` against fresh state and
    /// returns its export set. The importer's state is restored whatever the
    /// outcome. `sys_exit` inside the module passes through unwrapped.
    fn execute_module(&mut self, path: &Path, line: usize) -> EvalResult<HashMap<String, Export>> {
        let source = fs::read_to_string(path).map_err(|source| {
                                                 RuntimeError::ModuleRead { path: path.to_path_buf(),
                                                                            source,
                                                                            line }
                                             })?;
        let wrap = |error: Error| RuntimeError::Module { path: path.to_path_buf(),
                                                         error: Box::new(error),
                                                         line };

        let tokens = tokenize(&source).map_err(|e| wrap(e.into()))?;
        let program = parse_program(&tokens).map_err(|e| wrap(e.into()))?;

        let importer = self.swap_state(ModuleState { globals:        HashMap::new(),
                                                     functions:      Self::builtin_functions(),
                                                     exports:        HashMap::new(),
                                                     current_module: Some(path.to_path_buf()), });
        let result = self.run(&program);
        let module = self.swap_state(importer);

        match result {
            Ok(()) => Ok(module.exports),
            Err(exit @ RuntimeError::Exit { .. }) => Err(exit),
            Err(e) => Err(wrap(e.into())),
        }
    }

    fn swap_state(&mut self, state: ModuleState) -> ModuleState {
        ModuleState { globals:        mem::replace(&mut self.globals, state.globals),
                      functions:      mem::replace(&mut self.functions, state.functions),
                      exports:        mem::replace(&mut self.exports, state.exports),
                      current_module: mem::replace(&mut self.current_module,
                                                   state.current_module), }
    }
}
