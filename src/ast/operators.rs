use std::fmt;

/// Binary operators carried by `Expr::BinaryOp`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinOp {
    // Comparison
    /// Equal (`==`)
    Equal,
    /// Not equal (`!=`)
    NotEqual,
    /// Less than (`<`)
    LessThan,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    GreaterThan,
    /// Greater than or equal (`>=`)
    GreaterEqual,

    // Shift
    /// Left shift (`<<`)
    ShiftLeft,
    /// Right shift (`>>`)
    ShiftRight,

    // Arithmetic
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Subtract,
    /// Multiplication (`*`)
    Multiply,
    /// Division (`/`)
    Divide,
    /// Integer division (`//`)
    DivideInt,
    /// Remainder (`%`)
    Modulo,
    /// Exponentiation (`**`, `^`)
    Power,

    /// A function name that appeared where an operator was expected.
    ///
    /// `2 sqrt(9)` parses as `Apply("sqrt")` between `2` and `9`: the
    /// exponent level accepts function-name tokens in operator position.
    /// Evaluating such a node always fails.
    Apply(String),
}

impl BinOp {
    /// The builtin that implements this operator, if it is arithmetic.
    pub fn builtin_name(&self) -> Option<&'static str> {
        match self {
            BinOp::Add => Some("add"),
            BinOp::Subtract => Some("sub"),
            BinOp::Multiply => Some("mul"),
            BinOp::Divide => Some("div"),
            BinOp::DivideInt => Some("divint"),
            BinOp::Modulo => Some("mod"),
            BinOp::Power => Some("exp"),
            _ => None,
        }
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinOp::Equal
                | BinOp::NotEqual
                | BinOp::LessThan
                | BinOp::LessEqual
                | BinOp::GreaterThan
                | BinOp::GreaterEqual
        )
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            BinOp::Equal => "==",
            BinOp::NotEqual => "!=",
            BinOp::LessThan => "<",
            BinOp::LessEqual => "<=",
            BinOp::GreaterThan => ">",
            BinOp::GreaterEqual => ">=",
            BinOp::ShiftLeft => "<<",
            BinOp::ShiftRight => ">>",
            BinOp::Add => "+",
            BinOp::Subtract => "-",
            BinOp::Multiply => "*",
            BinOp::Divide => "/",
            BinOp::DivideInt => "//",
            BinOp::Modulo => "%",
            BinOp::Power => "**",
            BinOp::Apply(name) => name.as_str(),
        };
        f.write_str(symbol)
    }
}

/// Logical operators carried by `Expr::LogicalOp`. Both operands are always
/// evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    /// `&&`
    And,
    /// `||`
    Or,
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalOp::And => f.write_str("&&"),
            LogicalOp::Or => f.write_str("||"),
        }
    }
}

/// Element type declared by an array literal's prefix (`int[...]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayType {
    Int,
    Float,
    String,
    Time,
    /// `any[...]`, and every prefix that is not one of the names above.
    Any,
}

impl ArrayType {
    pub fn from_prefix(prefix: &str) -> Self {
        match prefix {
            "int" => ArrayType::Int,
            "float" => ArrayType::Float,
            "string" => ArrayType::String,
            "time" => ArrayType::Time,
            _ => ArrayType::Any,
        }
    }
}

impl fmt::Display for ArrayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArrayType::Int => "int",
            ArrayType::Float => "float",
            ArrayType::String => "string",
            ArrayType::Time => "time",
            ArrayType::Any => "any",
        };
        f.write_str(name)
    }
}
