//! # Anise Expression Language - Abstract Syntax Tree
//!
//! This module defines the tokens and syntax tree of Anise, a small
//! expression language meant to be embedded in configuration, rules and
//! templates.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Expression nodes (literals, variables, operations, calls, arrays)
//! - **[operators]** - Binary and logical operators, array element types
//!
//! ## Quick Start
//!
//! ```text
//! order.total > 100 && contains(order.country, "NL")
//! ```
//!
//! ## Core Concepts
//!
//! ### Variables
//!
//! Identifiers resolve against the evaluation context. Dots descend into
//! nested mappings: `user.address.city`.
//!
//! ### Function Calls and Arrays
//!
//! An identifier directly followed by `(` is a call, directly followed by `[`
//! an array literal whose prefix names the element type:
//!
//! ```text
//! round(3.7)
//! int[1, 2, 3]
//! ```
//!
//! ### Precedence (loosest first)
//!
//! ```text
//! ||   &&   == !=   < <= > >=   << >>   + -   * / // %   ** ^
//! ```
//!
//! ### Array Combinators
//!
//! `map` and `filter` take their per-element expression as a string and
//! evaluate it once per element:
//!
//! ```text
//! filter(int[1, 2, 3, 4], "x > 2")
//! map(int[1, 2, 3], "_x * 2")
//! reduce(int[1, 2, 3], "add")
//! ```
pub mod expressions;
pub mod operators;
pub mod tokens;

pub use expressions::Expr;
pub use operators::{ArrayType, BinOp, LogicalOp};
pub use tokens::{Token, TokenKind};
