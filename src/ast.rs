use std::rc::Rc;

/// Represents a literal value in the language.
///
/// `LiteralValue` covers the raw, constant values that can appear directly in
/// source code: numbers, strings, booleans and `null`.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A string literal, already unescaped.
    Str(String),
    /// A numeric literal. All numbers are 64-bit floats.
    Number(f64),
    /// A boolean literal value: `true` or `false`.
    Bool(bool),
    /// The `null` literal.
    Null,
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for LiteralValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// Every variant records the source line it started on so runtime errors can
/// point back at the script.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (number, string, boolean or null).
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Line number in the source code.
        line:  usize,
    },
    /// Array literal expression, e.g. `[1, "a", x]`.
    Array {
        /// Elements of the array, evaluated left to right.
        elements: Vec<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// Object literal expression, e.g. `{ name: "x", area: fn(w) { ... } }`.
    Object {
        /// Entries in source order.
        entries: Vec<(String, ObjectEntry)>,
        /// Line number in the source code.
        line:    usize,
    },
    /// Reference to a variable by dotted path, e.g. `user.address.city`.
    Variable {
        /// Path segments; never empty.
        path: Vec<String>,
        /// Line number in the source code.
        line: usize,
    },
    /// A binary operation (arithmetic or comparison).
    Binary {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// Fallback operator `preferred | fallback`.
    Pipe {
        /// Evaluated first; kept when it succeeds with a truthy value.
        preferred: Box<Self>,
        /// Evaluated when `preferred` fails or is falsy.
        fallback:  Box<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// Array indexing expression (e.g., `items[2]`).
    Index {
        /// The array to index into.
        target: Box<Self>,
        /// The index to access.
        index:  Box<Self>,
        /// Line number in the source code.
        line:   usize,
    },
    /// Function call expression (e.g. `math.round(x)`).
    Call {
        /// The callee. A plain variable path is looked up in the native
        /// registry first.
        target:    Box<Self>,
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
    /// use brickengine::ast::Expr;
    ///
    /// let expr = Expr::Variable { path: vec!["x".to_string()],
    ///                             line: 5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::Array { line, .. }
            | Self::Object { line, .. }
            | Self::Variable { line, .. }
            | Self::Binary { line, .. }
            | Self::Pipe { line, .. }
            | Self::Index { line, .. }
            | Self::Call { line, .. } => *line,
        }
    }
}

/// The value side of an object literal entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectEntry {
    /// `key: expr`
    Value(Expr),
    /// `key: fn(params) { body }`, which installs a closure.
    Function(FunctionDef),
}

/// Represents a user-defined function definition.
///
/// The body is shared behind an `Rc` so every closure created from the same
/// definition points at one parsed body.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The name of the function; `None` for object-literal methods.
    pub name:   Option<String>,
    /// The parameter names, bound positionally.
    pub params: Vec<String>,
    /// The statements executed when the function is called.
    pub body:   Rc<[Statement]>,
    /// Line number in the source code.
    pub line:   usize,
}

/// A sequence of statements delimited by braces.
pub type Block = Vec<Statement>;

/// An `else if` arm of an [`Statement::If`].
#[derive(Debug, Clone, PartialEq)]
pub struct ElseIf {
    /// The arm's condition.
    pub condition: Expr,
    /// Statements run when the condition is truthy.
    pub block:     Block,
}

/// The two loop shapes introduced by `for`.
#[derive(Debug, Clone, PartialEq)]
pub enum ForKind {
    /// `for let i = 0; i < n; i = i + 1 { ... }`
    Classic {
        /// Run once before the first pass.
        init:      Box<Statement>,
        /// Checked before every pass.
        condition: Expr,
        /// Run after every pass.
        update:    Box<Statement>,
    },
    /// `for item in items { ... }`
    Each {
        /// The loop variable.
        var:      String,
        /// Must evaluate to an array.
        iterable: Expr,
    },
}

/// Represents a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A standalone expression evaluated for its result.
    Expression {
        /// The expression to evaluate.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
    /// A variable declaration using `let`.
    Let {
        /// The name of the variable.
        name:  String,
        /// The initial value of the variable.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// An assignment to a dotted path, e.g. `a.b = 1`.
    Assign {
        /// The target path; never empty.
        path:  Vec<String>,
        /// The value which is being assigned.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// An element assignment, e.g. `a.items[3] = 1`.
    IndexAssign {
        /// Path of the array being written.
        path:  Vec<String>,
        /// The element index.
        index: Expr,
        /// The value which is being assigned.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// A named function declaration.
    Function(FunctionDef),
    /// `return` with an optional value.
    Return {
        /// The returned expression; `None` returns null.
        value: Option<Expr>,
        /// Line number in the source code.
        line:  usize,
    },
    /// `if` / `else if` / `else`.
    If {
        /// The first condition.
        condition:  Expr,
        /// Statements run when `condition` is truthy.
        then_block: Block,
        /// Further arms, tried in order.
        else_ifs:   Vec<ElseIf>,
        /// Run when no condition matched.
        else_block: Option<Block>,
        /// Line number in the source code.
        line:       usize,
    },
    /// A classic or for-in loop.
    For {
        /// Which loop shape this is.
        kind: ForKind,
        /// The loop body.
        body: Block,
        /// Line number in the source code.
        line: usize,
    },
    /// `while cond { ... }`
    While {
        /// Checked before every pass.
        condition: Expr,
        /// The loop body.
        body:      Block,
        /// Line number in the source code.
        line:      usize,
    },
    /// `try { ... } catch { ... }`
    TryCatch {
        /// Statements that may fail.
        try_block:   Block,
        /// Statements run if the try block fails.
        catch_block: Block,
        /// Line number in the source code.
        line:        usize,
    },
}

impl Statement {
    /// Gets the line number from `self`.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Function(def) => def.line,
            Self::Expression { line, .. }
            | Self::Let { line, .. }
            | Self::Assign { line, .. }
            | Self::IndexAssign { line, .. }
            | Self::Return { line, .. }
            | Self::If { line, .. }
            | Self::For { line, .. }
            | Self::While { line, .. }
            | Self::TryCatch { line, .. } => *line,
        }
    }
}

/// Represents a binary operator.
///
/// All binary operators share a single precedence tier and associate to the
/// left.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
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
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Equal => "==",
            NotEqual => "!=",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
        };
        write!(f, "{operator}")
    }
}
