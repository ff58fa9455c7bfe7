//! Expression AST nodes.

/// A Lark expression.
///
/// The tree is built by the embedding driver (or a parser living
/// outside this workspace), owns its children outright, and is never
/// mutated during evaluation.
#[derive(Debug, Clone)]
pub enum Expr {
    /// Integer literal
    Int(i64),
    /// Boolean literal
    Bool(bool),
    /// Variable reference
    Var(String),
    /// Print the value of the inner expression, then yield it
    Print(Box<Expr>),
    /// Binary operation `a + b`
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// If expression; a false condition with no else yields no value
    If {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Option<Box<Expr>>,
    },
    /// While loop; always yields no value
    While {
        condition: Box<Expr>,
        body: Box<Expr>,
    },
    /// Two back-to-back expressions; yields the second
    Seq(Box<Expr>, Box<Expr>),
    /// Declare a variable in the current scope
    VarDecl { name: String, value: Box<Expr> },
    /// Assign to a previously declared variable
    Assign { name: String, value: Box<Expr> },
    /// Function declaration, evaluating to a closure
    Function { params: Vec<String>, body: Box<Expr> },
    /// Function application `f(x, y)`
    Call { callee: Box<Expr>, args: Vec<Expr> },
}

impl Expr {
    pub fn int(value: i64) -> Expr {
        Expr::Int(value)
    }

    pub fn bool(value: bool) -> Expr {
        Expr::Bool(value)
    }

    pub fn var(name: impl Into<String>) -> Expr {
        Expr::Var(name.into())
    }

    pub fn print(inner: Expr) -> Expr {
        Expr::Print(Box::new(inner))
    }

    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn if_then(condition: Expr, then_branch: Expr) -> Expr {
        Expr::If {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: None,
        }
    }

    pub fn if_else(condition: Expr, then_branch: Expr, else_branch: Expr) -> Expr {
        Expr::If {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Some(Box::new(else_branch)),
        }
    }

    pub fn while_loop(condition: Expr, body: Expr) -> Expr {
        Expr::While {
            condition: Box::new(condition),
            body: Box::new(body),
        }
    }

    pub fn seq(first: Expr, second: Expr) -> Expr {
        Expr::Seq(Box::new(first), Box::new(second))
    }

    pub fn var_decl(name: impl Into<String>, value: Expr) -> Expr {
        Expr::VarDecl {
            name: name.into(),
            value: Box::new(value),
        }
    }

    pub fn assign(name: impl Into<String>, value: Expr) -> Expr {
        Expr::Assign {
            name: name.into(),
            value: Box::new(value),
        }
    }

    pub fn function<S: Into<String>>(params: Vec<S>, body: Expr) -> Expr {
        Expr::Function {
            params: params.into_iter().map(Into::into).collect(),
            body: Box::new(body),
        }
    }

    pub fn call(callee: Expr, args: Vec<Expr>) -> Expr {
        Expr::Call {
            callee: Box::new(callee),
            args,
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add, // +
    Sub, // -
    Mul, // *
    Div, // /
    Mod, // %

    // Comparison
    Gt, // >
    Ge, // >=
    Lt, // <
    Le, // <=
    Eq, // ==
}
