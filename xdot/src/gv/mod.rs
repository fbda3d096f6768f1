//! A module that contains everything that has to do with handling the GraphViz
//! file format (parsing, decoding the xdot drawings, building the graph).

pub mod builder;
pub mod parser;
pub mod xdot;

pub use builder::GraphBuilder;
pub use parser::lexer::Lexer;
pub use parser::lexer::Token;
pub use parser::printer::dump_ast;
pub use parser::DotParser;
pub use xdot::{parse_xdot_attr, XDotAttrParser};
