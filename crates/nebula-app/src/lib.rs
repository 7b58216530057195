//! Terrain explorer host: window, input, and the frame loop around
//! [`nebula_render::FrameRenderer`].

pub mod input;
pub mod platform;
pub mod scene;
pub mod window;
