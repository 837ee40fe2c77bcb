mod polygon;

pub use polygon::PolygonProvider;
