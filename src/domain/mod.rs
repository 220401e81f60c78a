// Domain layer: building configuration models and the ports to external collaborators.

pub mod apartment;
pub mod holidays;
pub mod model;
pub mod ports;
pub mod registry;
pub mod selector;
