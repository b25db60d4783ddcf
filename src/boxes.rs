//! Box catalog types: a `BoxSpec`'s dimensions and payload limits, and the
//! identity-keyed quantity bookkeeping that tracks remaining stock (§3, §9).

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_BOX_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque stock-keeping-unit identity. Two [`BoxSpec`]s with identical
/// dimensions still get distinct ids: the source distinguishes boxes by
/// object identity, not by value, and this type preserves that.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BoxId(u64);

impl BoxId {
    fn next() -> Self {
        Self(NEXT_BOX_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Debug for BoxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoxId({})", self.0)
    }
}

/// A box type available in stock: external and inner dimensions, empty
/// weight, and maximum payload weight.
#[derive(Debug, Clone)]
pub struct BoxSpec {
    pub id: BoxId,
    pub outer_length: u32,
    pub outer_width: u32,
    pub outer_depth: u32,
    pub inner_length: u32,
    pub inner_width: u32,
    pub inner_depth: u32,
    pub empty_weight: u32,
    pub max_payload: u32,
}

impl PartialEq for BoxSpec {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for BoxSpec {}

impl BoxSpec {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        outer_length: u32,
        outer_width: u32,
        outer_depth: u32,
        inner_length: u32,
        inner_width: u32,
        inner_depth: u32,
        empty_weight: u32,
        max_payload: u32,
    ) -> Self {
        Self {
            id: BoxId::next(),
            outer_length,
            outer_width,
            outer_depth,
            inner_length,
            inner_width,
            inner_depth,
            empty_weight,
            max_payload,
        }
    }

    pub const fn inner_volume(&self) -> u64 {
        self.inner_length as u64 * self.inner_width as u64 * self.inner_depth as u64
    }
}

/// Remaining stock per box identity. Callers own one of these; a packing
/// call clones it rather than mutating the caller's copy (§5).
pub type Quantities = HashMap<BoxId, u32>;
