//! A module that contains the interfaces, utilities and data-structures that
//! are shared by the other modules.

pub mod color;
pub mod format;
pub mod geometry;
pub mod style;
pub mod utils;
