//! 4x4 transform builders for the terrain renderer: affine transforms,
//! perspective projection, and look-at view matrices.
//!
//! All matrices are column-major and act on column vectors (`m * v`), so a
//! product `a * b` applies `b` first.

mod error;
mod projection;
mod transform;
mod view;

pub use error::MathError;
pub use projection::{aspect_ratio, perspective};
pub use transform::{identity, rotation_xyz, scale, translation};
pub use view::{look_at, try_look_at};

pub use glam::{Mat4, Vec2, Vec3, Vec4};
