use std::{
    collections::{HashMap, HashSet},
    fmt,
    io::{self, BufRead, Write},
    path::PathBuf,
};

use crate::{
    ast::{Block, Expr, Program, Statement},
    error::RuntimeError,
    interpreter::{
        environment::{Binding, Scope, TypeTag},
        evaluator::{function::core::Function, module::Export},
        registry::ModuleRegistry,
        value::core::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// How a statement or block finished.
///
/// `Return` unwinds through every enclosing block until a function call (or
/// the top level of a program) consumes it.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlFlow {
    /// Execution continues with the next statement.
    Normal,
    /// A `return` ran with this value.
    Return(Value),
}

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state: global variables, the flat
/// function table (builtins included), the export set of the running module,
/// the module registry, and the bookkeeping that keeps module loading from
/// recursing forever.
///
/// ## Usage
///
/// `Context` is created once per run. Statements mutate it as they execute;
/// imported modules temporarily swap their own state in and out.
pub struct Context {
    /// Top-level variables, visible from every scope.
    pub(crate) globals:         HashMap<String, Binding>,
    /// A mapping from function names to builtins and user definitions.
    pub(crate) functions:       HashMap<String, Function>,
    /// Symbols marked with `launch` in the running program.
    pub(crate) exports:         HashMap<String, Export>,
    /// Short module names usable with `fetch`.
    pub(crate) registry:        ModuleRegistry,
    /// Canonical paths of modules whose execution is still on the stack.
    pub(crate) loading_modules: HashSet<PathBuf>,
    /// Canonical path of the module currently executing, if it came from a
    /// file.
    pub(crate) current_module:  Option<PathBuf>,
    pub(crate) output:          Box<dyn Write>,
    pub(crate) input:           Box<dyn BufRead>,
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
         .field("globals", &self.globals)
         .field("functions", &self.functions.keys().collect::<Vec<_>>())
         .field("exports", &self.exports.keys().collect::<Vec<_>>())
         .field("current_module", &self.current_module)
         .finish_non_exhaustive()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Creates a new evaluation context with no globals, the builtin
    /// functions registered, an empty module registry, and standard
    /// input/output as the console.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(ModuleRegistry::default())
    }

    /// Creates a new evaluation context that resolves bare `fetch` names
    /// through `registry`.
    #[must_use]
    pub fn with_registry(registry: ModuleRegistry) -> Self {
        Self { globals: HashMap::new(),
               functions: Self::builtin_functions(),
               exports: HashMap::new(),
               registry,
               loading_modules: HashSet::new(),
               current_module: None,
               output: Box::new(io::stdout()),
               input: Box::new(io::BufReader::new(io::stdin())) }
    }

    /// Redirects everything scripts print.
    pub fn set_output(&mut self, output: Box<dyn Write>) {
        self.output = output;
    }

    /// Replaces the source `prompt` reads from.
    pub fn set_input(&mut self, input: Box<dyn BufRead>) {
        self.input = input;
    }

    /// Injects a host constant as a raw global.
    ///
    /// Scripts can read it, but `set` rejects it and `get_type` reports no
    /// type.
    pub fn define_constant(&mut self, name: &str, value: Value) {
        self.globals.insert(name.to_string(), Binding::Raw(value));
    }

    /// Returns the value of global `name`.
    #[must_use]
    pub fn global(&self, name: &str) -> Option<&Value> {
        self.globals.get(name).map(Binding::value)
    }

    /// Returns the type tag of global `name`, if it is a tagged slot.
    #[must_use]
    pub fn global_tag(&self, name: &str) -> Option<&TypeTag> {
        self.globals.get(name).and_then(Binding::tag)
    }

    /// Iterates over all globals in name order.
    pub fn globals(&self) -> impl Iterator<Item = (&str, &Binding)> {
        let mut names: Vec<&String> = self.globals.keys().collect();
        names.sort();
        names.into_iter()
             .filter_map(|name| self.globals.get(name).map(|binding| (name.as_str(), binding)))
    }

    /// Returns `true` if a builtin or user function named `name` exists.
    #[must_use]
    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// The export set built by `launch` statements.
    #[must_use]
    pub const fn exports(&self) -> &HashMap<String, Export> {
        &self.exports
    }

    /// Executes every statement of `program` in order against the global
    /// scope.
    ///
    /// A top-level `return` stops the program; its value is discarded.
    ///
    /// # Errors
    /// Stops at the first runtime error and returns it.
    ///
    /// # Example
    /// ```
    /// use dav::{
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    ///     parse,
    /// };
    ///
    /// let program = parse("Num x = 5 set x = x + 1").unwrap();
    /// let mut context = Context::new();
    /// context.run(&program).unwrap();
    ///
    /// assert_eq!(context.global("x"), Some(&Value::Integer(6)));
    /// ```
    pub fn run(&mut self, program: &Program) -> EvalResult<()> {
        for statement in &program.body {
            if let ControlFlow::Return(_) = self.eval_statement(statement, None)? {
                break;
            }
        }
        Ok(())
    }

    /// Evaluates a single statement.
    ///
    /// Handles variable declarations, `set`, function declarations,
    /// conditionals, `return`, module statements and plain expression
    /// statements.
    ///
    /// # Parameters
    /// - `statement`: Statement to evaluate.
    /// - `scope`: The innermost block scope, or `None` at the top level where
    ///   declarations go straight into the globals.
    ///
    /// # Returns
    /// [`ControlFlow::Return`] if a `return` ran, otherwise
    /// [`ControlFlow::Normal`].
    pub fn eval_statement(&mut self,
                          statement: &Statement,
                          scope: Option<&Scope<'_>>)
                          -> EvalResult<ControlFlow> {
        match statement {
            Statement::VariableDeclaration { var_type,
                                             name,
                                             init,
                                             .. } => {
                let value = self.eval(init, scope)?;
                self.declare(name, Binding::slot(value, Some(TypeTag::from(*var_type))), scope);
            },
            Statement::Set { name, value, line } => {
                self.check_assignable(name, scope, *line)?;
                let value = self.eval(value, scope)?;
                self.assign(name, value, scope, *line)?;
            },
            Statement::FunctionDeclaration(def) => {
                self.functions.insert(def.name.clone(), Function::User(def.clone()));
            },
            Statement::When { test,
                              consequent,
                              alternate,
                              .. } => {
                if self.eval(test, scope)?.is_truthy() {
                    return self.eval_block(consequent, scope);
                }
                if let Some(alternate) = alternate {
                    return self.eval_block(alternate, scope);
                }
            },
            Statement::Else { consequent, .. } => return self.eval_block(consequent, scope),
            Statement::Return { argument, .. } => {
                return Ok(ControlFlow::Return(self.eval(argument, scope)?));
            },
            Statement::Expression { expr, .. } => {
                self.eval(expr, scope)?;
            },
            Statement::Fetch { path, line } => self.fetch(path, *line)?,
            Statement::Launch { names, line } => self.launch(names, *line)?,
        }
        Ok(ControlFlow::Normal)
    }

    /// Evaluates a block in a fresh scope chained to `scope`.
    ///
    /// Declarations inside the block disappear with it. A `return` inside
    /// the block stops it and is passed on unchanged.
    pub fn eval_block(&mut self, block: &Block, scope: Option<&Scope<'_>>) -> EvalResult<ControlFlow> {
        let local = Scope::new(scope);

        for statement in &block.statements {
            let flow = self.eval_statement(statement, Some(&local))?;
            if let ControlFlow::Return(_) = flow {
                return Ok(flow);
            }
        }

        Ok(ControlFlow::Normal)
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The evaluator
    /// dispatches based on expression variant: literals, identifiers, unary
    /// and binary operations, and function calls.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    /// - `scope`: The innermost block scope, or `None` at the top level.
    ///
    /// # Returns
    /// The computed [`Value`].
    pub fn eval(&mut self, expr: &Expr, scope: Option<&Scope<'_>>) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Identifier { name, line } => self.eval_identifier(name, scope, *line),
            Expr::Unary { op, operand, line } => {
                let operand = self.eval(operand, scope)?;
                Self::eval_unary(*op, &operand, *line)
            },
            Expr::Binary { left,
                           op,
                           right,
                           line, } => {
                let left = self.eval(left, scope)?;
                let right = self.eval(right, scope)?;
                Self::eval_binary(*op, &left, &right, *line)
            },
            Expr::Call { callee,
                         arguments,
                         line, } => self.eval_call(callee, arguments, scope, *line),
        }
    }
}
