pub mod package;
pub mod slide;

pub use package::PptxPackage;
pub use slide::{ShapeContent, ShapeKind, SlideContent};
