//! Player status store backing the HUD overlay.
//!
//! [`StatusStore`] holds health, shield, hunger and thirst. Producers push
//! [`StatusPayload`]s into it; the HUD reads the current values or listens
//! for changes, either through [`StatusStore::subscribe`] or through the
//! [`HudStatusPlugin`] events when running inside a Bevy app.

pub mod config;
pub mod error;
pub mod plugin;
pub mod status;

pub use config::{FeedConfig, HudConfig, TelemetryConfig};
pub use error::{HudError, Result};
pub use plugin::{apply_status_updates, HudStatusPlugin, StatusChanged, StatusUpdate};
pub use status::{
    ListenerId, StatusField, StatusListener, StatusPayload, StatusSnapshot, StatusStore,
    DEFAULT_STATUS_VALUE,
};
