//! Rendering backends that implement the `RenderBackend` trait.

pub mod svg;
