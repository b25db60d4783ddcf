//! A 3D bin-packing engine: pack a set of items with independent length,
//! width, depth, weight and rotation policy into a catalog of box types,
//! minimising box count, then optionally rebalancing weight across the
//! result.
//!
//! The two entry points are [`pack`] and [`pack_with_weight_balance`] (and
//! their `_with_config` counterparts for a custom [`PackerConfig`]).

mod boxes;
mod config;
mod error;
mod item;
mod layer;
mod log;
mod oriented_item;
mod packed_box;
mod packed_box_list;
mod packer;
mod redistribute;
mod stabiliser;
mod volume_packer;

pub use boxes::{BoxId, BoxSpec, Quantities};
pub use config::PackerConfig;
pub use error::PackError;
pub use item::{Item, ItemId, PackingConstraint, RotationPolicy};
pub use log::{LogLevel, Logger, NoopLogger};
pub use oriented_item::OrientatedItem;
pub use packed_box::{PackedBox, PackedItem};
pub use packed_box_list::PackedBoxList;
pub use packer::{pack, pack_with_config, pack_with_weight_balance, pack_with_weight_balance_with_config};
