//! Output geometry planning module

pub mod geometry;

pub use geometry::GeometryPlanner;
