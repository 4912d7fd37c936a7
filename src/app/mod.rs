//! Host integration.
//!
//! - [`Input`]: pointer state shared between the host and the controls
//! - [`App`]: winit window host driving an [`Engine`](crate::Engine)
//!   (feature `winit`)

#[cfg(feature = "winit")]
mod host;
pub mod input;

#[cfg(feature = "winit")]
pub use host::App;
pub use input::{Input, MouseButton};
