use std::rc::Rc;

use crate::interpreter::lexer::TypeKeyword;

/// Represents a literal value in the language.
///
/// `LiteralValue` covers the raw, constant values that can appear directly in
/// source code: integers, reals, quoted text and the boolean keywords.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A 64-bit signed integer literal.
    Integer(i64),
    /// A 64-bit floating-point literal.
    Real(f64),
    /// A quoted text literal with escapes resolved.
    Text(String),
    /// A boolean literal value: `true` or `false`.
    Bool(bool),
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// An abstract syntax tree (AST) node representing an expression in the
/// language.
///
/// Every variant records the line it started on, so runtime errors can point
/// back into the source.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (number, text or boolean).
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a variable by name.
    Identifier {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A prefix operation: `-x`, `+x` or `!x`.
    Unary {
        /// The operator to apply.
        op:      Operator,
        /// The operand expression.
        operand: Box<Self>,
        /// Line number in the source code.
        line:    usize,
    },
    /// A binary operation (addition, comparison, etc.).
    Binary {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    Operator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// Function call expression (e.g. `add(1, 2)`).
    Call {
        /// Name of the function being called.
        callee:    String,
        /// Arguments to the function.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use dav::ast::Expr;
    ///
    /// let expr = Expr::Identifier { name: "x".to_string(),
    ///                               line: 5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::Identifier { line, .. }
            | Self::Unary { line, .. }
            | Self::Binary { line, .. }
            | Self::Call { line, .. } => *line,
        }
    }
}

/// A braced sequence of statements. Evaluating it opens a new scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Statements inside the block.
    pub statements: Vec<Statement>,
    /// Line of the opening brace.
    pub line:       usize,
}

/// A declared function parameter, `name: Type`.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// Parameter name.
    pub name:          String,
    /// Declared type. Recorded, never checked.
    pub declared_type: TypeKeyword,
}

/// Represents a user-defined function definition.
///
/// `define Num add(a: Num, b: Num) { return a + b }`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The name of the function.
    pub name:        String,
    /// Declared return type. Recorded, never checked.
    pub return_type: TypeKeyword,
    /// The parameters, in call order.
    pub params:      Vec<Param>,
    /// The body executed when the function is called.
    pub body:        Block,
    /// Line number in the source code.
    pub line:        usize,
}

/// Represents a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A typed variable declaration, e.g. `Num x = 5`.
    VariableDeclaration {
        /// The declared type keyword, which becomes the slot's tag.
        var_type: TypeKeyword,
        /// The name of the variable.
        name:     String,
        /// The initial value of the variable.
        init:     Expr,
        /// Line number in the source code.
        line:     usize,
    },
    /// Reassignment of an existing variable, `set x = ...`.
    Set {
        /// The name of the variable.
        name:  String,
        /// The value which is being assigned.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// A user-defined function declaration.
    FunctionDeclaration(Rc<FunctionDef>),
    /// A conditional with an optional trailing `else` block.
    When {
        /// The condition.
        test:       Expr,
        /// Runs when the condition is truthy.
        consequent: Block,
        /// Runs when the condition is falsy.
        alternate:  Option<Block>,
        /// Line number in the source code.
        line:       usize,
    },
    /// An `else` block that does not follow a `when`; runs unconditionally.
    Else {
        /// The block to run.
        consequent: Block,
        /// Line number in the source code.
        line:       usize,
    },
    /// `return` with a value.
    Return {
        /// The returned expression.
        argument: Expr,
        /// Line number in the source code.
        line:     usize,
    },
    /// A standalone expression evaluated for its effects.
    Expression {
        /// The expression to evaluate.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
    /// `fetch "path"`: import a module.
    Fetch {
        /// Registry name or file path, as written.
        path: String,
        /// Line number in the source code.
        line: usize,
    },
    /// `launch a, b`: export names from the current module.
    Launch {
        /// The exported names.
        names: Vec<String>,
        /// Line number in the source code.
        line:  usize,
    },
}

/// A parsed source file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Top-level statements in source order.
    pub body: Vec<Statement>,
}

/// Represents an operator.
///
/// Binary and unary expressions share this enum; which operators are valid
/// in which position is decided by the parser and checked again at runtime.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operator {
    /// Addition, concatenation or unary plus (`+`)
    Plus,
    /// Subtraction or negation (`-`)
    Minus,
    /// Multiplication (`*`)
    Star,
    /// Division (`/`)
    Slash,
    /// Exponentiation (`**`)
    Power,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Logical NOT (`!`)
    Not,
    /// Assignment (`=`), only meaningful inside `set` and declarations
    Assign,
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Power => "**",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Not => "!",
            Self::Assign => "=",
        };
        write!(f, "{operator}")
    }
}
