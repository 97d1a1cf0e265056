//! Shared host-side pieces for livemark binaries and editor integrations.

pub mod config;
pub mod error;
pub mod selection;
#[cfg(feature = "telemetry")]
pub mod telemetry;

pub use crate::config::{Config, FileStore, Loader, Saver};
pub use crate::error::{LivemarkError, SelectionError, SerDeError};
pub use crate::selection::parse_selection;
