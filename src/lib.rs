pub mod ast;
pub mod builtins;
#[cfg(feature = "cli")]
pub mod cli;
pub mod completion;
pub mod config;
pub mod context;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod pipeline;
pub mod template;
pub mod value;

pub use ast::{ArrayType, BinOp, Expr, LogicalOp, Token, TokenKind};
pub use builtins::Registry;
pub use completion::{CompletionError, CompletionService};
pub use config::{Config, ConfigError};
pub use context::Context;
pub use evaluator::{EvalError, Evaluator};
pub use lexer::Lexer;
pub use parser::{ParseError, Parser};
pub use pipeline::{Error, bind_variables, evaluate, evaluate_bool, exp, render_template};
pub use value::{NativeFunction, Value};
