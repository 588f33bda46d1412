//! Assessment façade: turns a catalog record plus engine settings into impact, state, damage,
//! deflection, dashboard, and impact-point reports.

pub mod assessment;

pub use facade::*;
pub use neo_config as config;
pub use neo_deflection as deflection;
pub use neo_frames as frames;
pub use neo_orbits as orbits;
pub use neo_physics as physics;

mod facade;
