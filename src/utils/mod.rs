//! Utility Module
//!
//! - [`Clock`]: frame delta clock with pluggable time sources
//! - [`OrbitControls`]: camera orbit controller for interactive viewing
//! - [`FpsCounter`]: frame rate measurement
//! - [`logging`]: one-shot `env_logger` initialization

pub mod fps_counter;
pub mod logging;
pub mod orbit_control;
pub mod time;

pub use fps_counter::FpsCounter;
pub use logging::{LoggingConfig, init_logging};
pub use orbit_control::OrbitControls;
pub use time::{Clock, ManualTimeSource, SystemTimeSource, TimeSource};
