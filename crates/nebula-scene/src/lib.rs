//! Camera state and the orbit controller that drives it.

pub mod camera;
pub mod orbit;

pub use camera::{Camera, CameraError};
pub use orbit::{ELEVATION_MARGIN, OrbitController, OrbitError};
