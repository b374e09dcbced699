mod inference;
mod polygon;

pub use inference::TextGeneration;
pub use polygon::PolygonAggregates;
