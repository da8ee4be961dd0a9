//! A module that contains everything that has to do with handling the GraphViz
//! file format (parsing, printing, escaping, and converting the AST to and
//! from the graph model).

pub mod builder;
pub mod escape;
pub mod parser;
pub mod to_ast;

pub use builder::ModelBuilder;
pub use parser::lexer::Lexer;
pub use parser::lexer::Token;
pub use parser::printer::dump_ast;
pub use parser::DotParser;
pub use to_ast::{ToAst, ToAstOptions};
