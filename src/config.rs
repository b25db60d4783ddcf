//! The packer's only configuration surface: the active logging sink, and
//! the "sufficiently large" quantity bound used during local re-pack (§6,
//! §9 Open Questions).

use std::sync::Arc;

use crate::log::{Logger, NoopLogger};

#[derive(Clone)]
pub struct PackerConfig {
    /// Sink for structured debug/info/warn logs. Defaults to a silent
    /// no-op so tests and library use stay deterministic and quiet.
    pub logger: Arc<dyn Logger>,

    /// Stand-in for the source's `max(PHP_INT_MAX, quantity + 1)`: the
    /// quantity offered for a box type's own slot during local re-pack,
    /// documented explicitly rather than reused as a language integer-max
    /// sentinel. Defaults to `u32::MAX`.
    pub unlimited_quantity: u32,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            logger: Arc::new(NoopLogger),
            unlimited_quantity: u32::MAX,
        }
    }
}

impl PackerConfig {
    pub fn with_logger(logger: Arc<dyn Logger>) -> Self {
        Self {
            logger,
            ..Self::default()
        }
    }
}
