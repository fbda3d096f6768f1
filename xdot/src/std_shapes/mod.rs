//! The shapes that xdot programs decode into, the graph that owns them and
//! the code that draws them.

pub mod graph;
pub mod render;
pub mod shapes;
