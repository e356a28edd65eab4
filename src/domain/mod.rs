// Domain layer: announcement models and ports. No network or platform code here.

pub mod model;
pub mod ports;
