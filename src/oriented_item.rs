//! Enumerates the legal orientations of an [`Item`] in a residual cuboid and
//! picks the best one for a position (§4.1).

use crate::boxes::BoxSpec;
use crate::item::{Item, RotationPolicy};
use crate::packed_box::PackedItem;

/// An [`Item`] paired with one of its legal (width, length, depth) rotations.
#[derive(Clone, Debug)]
pub struct OrientatedItem {
    pub item: Item,
    pub width: u32,
    pub length: u32,
    pub depth: u32,
}

impl OrientatedItem {
    pub const fn volume(&self) -> u64 {
        self.width as u64 * self.length as u64 * self.depth as u64
    }
}

/// All (width, length, depth) triples the item's rotation policy allows,
/// in canonical (lexicographic) order. Doubles as the tie-break ordering
/// used by [`OrientatedItemFactory::best_fit`].
fn orientations(item: &Item) -> Vec<(u32, u32, u32)> {
    let (l, w, d) = (item.length, item.width, item.depth);
    let mut candidates = match item.rotation {
        RotationPolicy::Never => vec![(w, l, d)],
        RotationPolicy::KeepFlat => vec![(w, l, d), (l, w, d)],
        RotationPolicy::Any => vec![
            (w, l, d),
            (l, w, d),
            (w, d, l),
            (d, w, l),
            (l, d, w),
            (d, l, w),
        ],
    };
    candidates.sort_unstable();
    candidates.dedup();
    candidates
}

/// Whether `item`, in any orientation its policy allows, fits a cuboid of
/// the given size.
fn fits(item: &Item, width_left: u32, length_left: u32, depth_left: u32) -> bool {
    orientations(item)
        .into_iter()
        .any(|(w, l, d)| w <= width_left && l <= length_left && d <= depth_left)
}

/// Whether `item` fits inside `box_spec` in at least one box rotation
/// (natural, or with inner width/length swapped), ignoring stock quantity.
pub(crate) fn fits_in_box(item: &Item, box_spec: &BoxSpec) -> bool {
    fits(
        item,
        box_spec.inner_width,
        box_spec.inner_length,
        box_spec.inner_depth,
    ) || fits(
        item,
        box_spec.inner_length,
        box_spec.inner_width,
        box_spec.inner_depth,
    )
}

pub struct OrientatedItemFactory;

impl OrientatedItemFactory {
    /// Picks the preferred orientation of `item` at `position`, given the
    /// residual cuboid and the next item in the queue as a tiling hint.
    /// Returns `None` if no orientation fits, or the item's constraint
    /// rejects every fitting orientation.
    pub fn best_fit(
        item: &Item,
        width_left: u32,
        length_left: u32,
        depth_left: u32,
        position: (u32, u32, u32),
        already_packed: &[PackedItem],
        hint: Option<&Item>,
    ) -> Option<OrientatedItem> {
        let mut candidates: Vec<(u32, u32, u32)> = orientations(item)
            .into_iter()
            .filter(|&(w, l, d)| w <= width_left && l <= length_left && d <= depth_left)
            .collect();

        if let Some(constraint) = &item.constraint {
            let (x, y, z) = position;
            candidates.retain(|_| constraint.can_be_packed(already_packed, x, y, z));
        }

        candidates
            .into_iter()
            .map(|(w, l, d)| {
                let depth_surplus = depth_left - d;
                let wasted_area =
                    (width_left as u64 * length_left as u64) - (w as u64 * l as u64);
                let hint_fits = hint
                    .map(|h| fits(h, width_left.saturating_sub(w), length_left, depth_left))
                    .unwrap_or(false);
                let rank = (depth_surplus, wasted_area, !hint_fits);
                (rank, (w, l, d))
            })
            .min_by_key(|(rank, _)| *rank)
            .map(|(_, (w, l, d))| OrientatedItem {
                item: item.clone(),
                width: w,
                length: l,
                depth: d,
            })
    }
}
