// Domain layer: data shapes and the traits at the I/O seams. No I/O here.

pub mod model;
pub mod ports;
