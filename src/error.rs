//! The error taxonomy surfaced from the top-level entry points (§7).

use thiserror::Error;

use crate::item::ItemId;

#[derive(Debug, Error)]
pub enum PackError {
    /// An item's smallest-dimension orientation does not fit any box in
    /// stock, regardless of quantity.
    #[error("item {item:?} does not fit any box type in the catalog")]
    ItemTooLarge { item: ItemId },

    /// The outer loop made a full candidate pass without placing any item
    /// while items remained.
    #[error("ran out of usable boxes with {remaining} item(s) still unpacked")]
    InsufficientBoxes { remaining: usize },

    /// A `packingConstraint` rejected the only otherwise-valid placement of
    /// an item.
    #[error("packing constraint rejected every valid placement for item {item:?}")]
    ConstraintViolation { item: ItemId },

    /// Non-positive dimensions, a weight no box in the catalog could carry,
    /// an empty catalog, etc. Caught at entry, before packing begins.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
