//! Concrete rendering surfaces.

mod svg;

pub use svg::SvgSurface;
