use std::rc::Rc;

use crate::{
    ast::{Expr, FunctionDef},
    error::RuntimeError,
    interpreter::{
        environment::{Binding, Scope},
        evaluator::core::{Context, ControlFlow, EvalResult},
        value::core::Value,
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the context, a slice of evaluated argument values and
/// the line number of the call. It returns a value, `Value::Null` when it has
/// nothing to report.
pub type BuiltinFn = fn(&mut Context, &[Value], usize) -> EvalResult<Value>;

/// An entry of the function table.
#[derive(Debug, Clone)]
pub enum Function {
    /// A function declared with `define`.
    User(Rc<FunctionDef>),
    /// A function provided by the interpreter.
    Builtin {
        /// Name it is registered under.
        name:   &'static str,
        /// Parameter names. Informational only; builtins accept any number
        /// of arguments.
        params: &'static [&'static str],
        /// The implementation.
        func:   BuiltinFn,
    },
}

impl Context {
    /// Evaluates a function call.
    ///
    /// Builtins receive their evaluated arguments directly, with no arity
    /// check and no new scope. User functions go through
    /// [`Context::call_user_function`].
    ///
    /// # Parameters
    /// - `name`: Function name.
    /// - `arguments`: Unevaluated argument expressions.
    /// - `scope`: The caller's scope.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The function result.
    ///
    /// # Errors
    /// Returns `UnknownFunction` if no function has that name, and propagates
    /// any error raised while evaluating arguments or running the function.
    pub(crate) fn eval_call(&mut self,
                            name: &str,
                            arguments: &[Expr],
                            scope: Option<&Scope<'_>>,
                            line: usize)
                            -> EvalResult<Value> {
        let function = self.functions.get(name).cloned().ok_or_else(|| {
                                                            RuntimeError::UnknownFunction {
                name: name.to_string(),
                line,
            }
                                                        })?;

        match function {
            Function::Builtin { func, .. } => {
                let values = arguments.iter()
                                      .map(|argument| self.eval(argument, scope))
                                      .collect::<EvalResult<Vec<_>>>()?;
                func(self, &values, line)
            },
            Function::User(def) => self.call_user_function(&def, arguments, scope, line),
        }
    }

    /// Executes a user-defined function.
    ///
    /// The argument count must match the parameter count exactly. The body
    /// runs in a new scope that sees only the globals and the parameters;
    /// the caller's local variables are not visible.
    ///
    /// # Errors
    /// - `Arity` if the argument count is wrong.
    /// - Any error raised by the arguments or the body.
    ///
    /// # Returns
    /// The value of the `return` that ended the body, or `Value::Null` if the
    /// body finished without one.
    fn call_user_function(&mut self,
                          def: &FunctionDef,
                          arguments: &[Expr],
                          scope: Option<&Scope<'_>>,
                          line: usize)
                          -> EvalResult<Value> {
        if arguments.len() != def.params.len() {
            return Err(RuntimeError::Arity { name: def.name.clone(),
                                             expected: def.params.len(),
                                             found: arguments.len(),
                                             line });
        }

        let frame = Scope::new(None);
        self.bind_parameters(def, arguments, scope, &frame)?;

        match self.eval_block(&def.body, Some(&frame))? {
            ControlFlow::Return(value) => Ok(value),
            ControlFlow::Normal => Ok(Value::Null),
        }
    }

    /// Declares each parameter in `frame` as a slot holding its evaluated
    /// argument.
    ///
    /// If the argument is a bare identifier bound to a tagged slot, the
    /// parameter inherits that tag. Literals and compound expressions leave
    /// it untagged.
    fn bind_parameters(&mut self,
                       def: &FunctionDef,
                       arguments: &[Expr],
                       scope: Option<&Scope<'_>>,
                       frame: &Scope<'_>)
                       -> EvalResult<()> {
        for (param, argument) in def.params.iter().zip(arguments) {
            let value = self.eval(argument, scope)?;
            let tag = match argument {
                Expr::Identifier { name, .. } => {
                    self.lookup(name, scope).and_then(|binding| binding.tag().cloned())
                },
                _ => None,
            };
            frame.declare(&param.name, Binding::slot(value, tag));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast::Statement, parse};

    /// Runs `setup` and returns the definition of `f` with the argument list
    /// of the call in `call`.
    fn prepare(context: &mut Context, setup: &str, call: &str) -> (Rc<FunctionDef>, Vec<Expr>) {
        context.run(&parse(setup).unwrap()).unwrap();
        let Some(Function::User(def)) = context.functions.get("f").cloned() else {
            panic!("f is not a user function");
        };

        let mut program = parse(call).unwrap();
        let Statement::Expression { expr: Expr::Call { arguments, .. }, .. } = program.body.remove(0)
        else {
            panic!("expected a call statement");
        };
        (def, arguments)
    }

    fn tag_of(frame: &Scope<'_>, name: &str) -> Option<String> {
        let binding = frame.lookup(name).unwrap_or_else(|| panic!("{name} is not bound"));
        binding.tag().map(|tag| tag.as_str().to_string())
    }

    #[test]
    fn tagged_identifier_passes_its_tag() {
        let mut context = Context::new();
        let (def, arguments) =
            prepare(&mut context,
                    "Num n = 3\nText s = \"hi\"\ndefine Num f(a: Num, b: Text) { return a }",
                    "f(n, s)");

        let frame = Scope::new(None);
        context.bind_parameters(&def, &arguments, None, &frame).unwrap();

        assert_eq!(tag_of(&frame, "a").as_deref(), Some("DAV.Num"));
        assert_eq!(tag_of(&frame, "b").as_deref(), Some("DAV.Text"));
        assert_eq!(frame.lookup("a").map(|b| b.value().clone()), Some(Value::Integer(3)));
    }

    #[test]
    fn literals_and_expressions_are_untagged() {
        let mut context = Context::new();
        let (def, arguments) =
            prepare(&mut context,
                    "Num n = 3\ndefine Num f(a: Num, b: Num, c: Num) { return a }",
                    "f(4, n + 1, -n)");

        let frame = Scope::new(None);
        context.bind_parameters(&def, &arguments, None, &frame).unwrap();

        for name in ["a", "b", "c"] {
            assert_eq!(tag_of(&frame, name), None);
        }
        assert_eq!(frame.lookup("b").map(|b| b.value().clone()), Some(Value::Integer(4)));
    }

    #[test]
    fn raw_constants_pass_no_tag() {
        let mut context = Context::new();
        context.define_constant("limit", Value::Integer(10));
        let (def, arguments) =
            prepare(&mut context, "define Num f(a: Num) { return a }", "f(limit)");

        let frame = Scope::new(None);
        context.bind_parameters(&def, &arguments, None, &frame).unwrap();

        assert_eq!(tag_of(&frame, "a"), None);
    }
}
