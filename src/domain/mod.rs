// Domain layer: schedule models and ports (interfaces). No I/O here.

pub mod model;
pub mod ports;
