use crate::ast::{ArrayType, BinOp, LogicalOp};

/// Abstract Syntax Tree node representing a parsed expression.
///
/// Every node owns its children; a tree is dropped with its root.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    // Literals
    /// Literal integer
    ///
    /// # Example
    /// ```text
    /// 42
    /// ```
    Integer(i64),

    /// Literal floating point number
    ///
    /// # Example
    /// ```text
    /// 2.5
    /// ```
    Float(f64),

    /// String literal
    ///
    /// # Example
    /// ```text
    /// "hello"
    /// ```
    String(String),

    /// Boolean literal
    Boolean(bool),

    // References
    /// Variable reference, resolved against the context at evaluation time.
    ///
    /// # Examples
    /// ```text
    /// price
    /// order.customer.name
    /// ```
    Variable(String),

    // Operations
    /// Arithmetic, comparison or shift operation
    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// `&&` / `||`; both operands must evaluate to booleans
    LogicalOp {
        op: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Call of a registered builtin. Arguments are evaluated left to right.
    ///
    /// # Examples
    /// ```text
    /// sqrt(16)
    /// max(1, 2.5, x)
    /// ```
    FunctionCall { name: String, args: Vec<Expr> },

    /// Array literal with a declared element type
    ///
    /// # Examples
    /// ```text
    /// int[1, 2, 3]
    /// any[]
    /// ```
    Array {
        element_type: ArrayType,
        elements: Vec<Expr>,
    },
}

impl Expr {
    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn logical(op: LogicalOp, left: Expr, right: Expr) -> Self {
        Expr::LogicalOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}
