//! Rendering expressions as template-engine condition syntax.
//!
//! Operators become prefix calls (`a && b` renders as `and ( .a ) ( .b )`,
//! `a + b` as `add .a .b`), variables become field accesses (`.name`), and
//! function calls become space-separated invocations. Rendering is total: any
//! tree the parser can produce has a rendering.
//!
//! # Examples
//!
//! ```
//! use anise_lang::{parser::parse, template::render};
//!
//! let expr = parse("age >= 18 && country == \"NL\"").unwrap();
//! assert_eq!(
//!     render(&expr),
//!     "and ( ge .age 18 ) ( eq .country \"NL\" )"
//! );
//! ```

use crate::ast::{BinOp, Expr, LogicalOp};

pub struct TemplatePrinter;

impl TemplatePrinter {
    pub fn new() -> Self {
        TemplatePrinter
    }

    pub fn print(&self, expr: &Expr) -> String {
        match expr {
            Expr::Integer(n) => n.to_string(),
            Expr::Float(n) => format!("{n:.6}"),
            Expr::String(s) => format!("\"{}\"", self.escape_string(s)),
            Expr::Boolean(b) => b.to_string(),
            Expr::Variable(name) => format!(".{name}"),
            Expr::BinaryOp { op, left, right } => format!(
                "{} {} {}",
                self.binary_keyword(op),
                self.print_operand(left),
                self.print_operand(right)
            ),
            Expr::LogicalOp { op, left, right } => format!(
                "{} ( {} ) ( {} )",
                self.logical_keyword(*op),
                self.print(left),
                self.print(right)
            ),
            Expr::FunctionCall { name, args } => {
                let mut out = name.clone();
                for arg in args {
                    out.push(' ');
                    out.push_str(&self.print_operand(arg));
                }
                out
            }
            Expr::Array { elements, .. } => {
                let items: Vec<String> = elements.iter().map(|e| self.print(e)).collect();
                format!("[{}]", items.join(", "))
            }
        }
    }

    /// Operands and call arguments are parenthesized whenever they render as
    /// more than one word, so nested operations keep their grouping.
    fn print_operand(&self, expr: &Expr) -> String {
        match expr {
            Expr::BinaryOp { .. } | Expr::LogicalOp { .. } => format!("({})", self.print(expr)),
            Expr::FunctionCall { args, .. } if !args.is_empty() => format!("({})", self.print(expr)),
            _ => self.print(expr),
        }
    }

    fn binary_keyword(&self, op: &BinOp) -> String {
        let keyword = match op {
            BinOp::Equal => "eq",
            BinOp::NotEqual => "ne",
            BinOp::LessThan => "lt",
            BinOp::GreaterThan => "gt",
            BinOp::LessEqual => "le",
            BinOp::GreaterEqual => "ge",
            BinOp::Add => "add",
            BinOp::Subtract => "sub",
            BinOp::Multiply => "mul",
            BinOp::Divide => "div",
            BinOp::Modulo => "mod",
            // Everything else renders its operator symbol; `^` comes out as `**`
            other => return other.to_string(),
        };
        keyword.to_string()
    }

    fn logical_keyword(&self, op: LogicalOp) -> &'static str {
        match op {
            LogicalOp::And => "and",
            LogicalOp::Or => "or",
        }
    }

    fn escape_string(&self, s: &str) -> String {
        let mut result = String::with_capacity(s.len());
        for ch in s.chars() {
            match ch {
                '"' => result.push_str("\\\""),
                '\\' => result.push_str("\\\\"),
                _ => result.push(ch),
            }
        }
        result
    }
}

impl Default for TemplatePrinter {
    fn default() -> Self {
        TemplatePrinter::new()
    }
}

/// Render `expr` as template condition source.
pub fn render(expr: &Expr) -> String {
    TemplatePrinter::new().print(expr)
}
