//! PDF drawing surface built on lopdf.
//!
//! `LopdfCanvas` buffers drawing operations per page and assembles the
//! document object graph (fonts, images, link annotations) when finished.

mod helpers;
mod renderer;

pub use renderer::LopdfCanvas;
