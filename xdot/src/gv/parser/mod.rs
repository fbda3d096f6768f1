//! GraphViz file format parser.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod printer;

pub use error::ParseError;
pub use lexer::Lexer;
pub use lexer::Token;
pub use lexer::TokenKind;
pub use parser::parse_dot;
pub use parser::DotParser;
pub use printer::dump_ast;
pub use printer::format_error;
