// Domain layer: listing models, engine value types and ports. No I/O here.

pub mod model;
pub mod ports;
