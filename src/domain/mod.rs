// Domain layer: wire records, UI state slices and ports. No I/O.

pub mod model;
pub mod ports;
pub mod state;
