// Domain layer: listing model, report values and ports. No I/O here.

pub mod model;
pub mod ports;
