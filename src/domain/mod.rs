// Domain layer: doctor records, filter criteria and the ports the core talks through.

pub mod model;
pub mod ports;
