//! GraphViz file format parser.

pub mod ast;
pub mod factory;
pub mod lexer;
pub mod parser;
pub mod printer;

pub use factory::{AstBuilder, BuilderOptions, NodeCounter};
pub use lexer::Lexer;
pub use lexer::Token;
pub use parser::{DotParser, ParseOptions, Parsed, Rule};
pub use printer::{dump_ast, Printer, PrintOptions};
