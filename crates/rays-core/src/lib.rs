pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod field;
#[cfg(feature = "gpu")]
pub mod gpu;
pub mod lifecycle;
pub mod placement;
pub mod pointer;
pub mod uniforms;

pub static RAYS_WGSL: &str = include_str!("../shaders/rays.wgsl");

pub use config::*;
pub use error::*;
pub use lifecycle::*;
pub use placement::*;
pub use uniforms::*;
