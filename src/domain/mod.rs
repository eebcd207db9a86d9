// Domain layer: records, run state and the ports the pipeline talks through.

pub mod model;
pub mod ports;
