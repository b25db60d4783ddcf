//! Fills one horizontal layer of a box, row by row, backtracking the layer
//! depth once the first item in it has been chosen (§4.2).

use std::collections::VecDeque;

use crate::item::Item;
use crate::oriented_item::OrientatedItemFactory;
use crate::packed_box::PackedItem;

/// An ordered list of [`PackedItem`]s that share the same `z`-range.
#[derive(Clone, Debug)]
pub struct PackedLayer {
    pub start_depth: u32,
    pub depth: u32,
    pub items: Vec<PackedItem>,
}

impl PackedLayer {
    /// Minimum bounding rectangle of the layer's items in the x-y plane.
    pub fn footprint(&self) -> (u32, u32) {
        let mut width = 0u32;
        let mut length = 0u32;
        for item in &self.items {
            width = width.max(item.x + item.orientation.width);
            length = length.max(item.y + item.orientation.length);
        }
        (width, length)
    }

    pub fn footprint_area(&self) -> u64 {
        let (w, l) = self.footprint();
        w as u64 * l as u64
    }
}

pub struct LayerPacker;

impl LayerPacker {
    /// Fills one layer starting at `start_depth`, consuming matched items
    /// from the front of `remaining`. `target_depth = 0` means "learn the
    /// depth from the first item placed". `max_payload` bounds the total
    /// weight of `already_packed` plus whatever this call places.
    ///
    /// `single_pass` skips the two-pass depth-discovery trick below,
    /// running [`Self::fill_layer`] exactly once instead of twice; it is the
    /// cheap mode [`crate::volume_packer::VolumePacker`] uses for read-only
    /// trials, where the extra probe pass buys nothing (the probe and a
    /// direct single call choose the same first item) but still costs a
    /// full layer fill.
    #[allow(clippy::too_many_arguments)]
    pub fn pack(
        remaining: &mut VecDeque<Item>,
        already_packed: &[PackedItem],
        start_depth: u32,
        target_depth: u32,
        box_width: u32,
        box_length: u32,
        box_depth: u32,
        max_payload: u32,
        single_pass: bool,
    ) -> PackedLayer {
        if target_depth == 0 && !single_pass {
            let mut probe_queue = remaining.clone();
            let probe = Self::fill_layer(
                &mut probe_queue,
                already_packed,
                start_depth,
                0,
                box_width,
                box_length,
                box_depth,
                max_payload,
            );
            if probe.items.is_empty() {
                return probe;
            }

            return Self::fill_layer(
                remaining,
                already_packed,
                start_depth,
                probe.depth,
                box_width,
                box_length,
                box_depth,
                max_payload,
            );
        }

        Self::fill_layer(
            remaining,
            already_packed,
            start_depth,
            target_depth,
            box_width,
            box_length,
            box_depth,
            max_payload,
        )
    }

    /// Fills one layer in a single forward pass; see [`Self::pack`] for the
    /// two-pass wrapper built on top of this.
    #[allow(clippy::too_many_arguments)]
    fn fill_layer(
        remaining: &mut VecDeque<Item>,
        already_packed: &[PackedItem],
        start_depth: u32,
        target_depth: u32,
        box_width: u32,
        box_length: u32,
        box_depth: u32,
        max_payload: u32,
    ) -> PackedLayer {
        let mut context: Vec<PackedItem> = already_packed.to_vec();
        let base_len = context.len();
        let mut weight_used: u32 = context.iter().map(PackedItem::weight).sum();

        let mut x = 0u32;
        let mut y = 0u32;
        let mut row_length = 0u32;
        let mut depth = target_depth;

        loop {
            let depth_left = if depth > 0 {
                depth
            } else {
                box_depth.saturating_sub(start_depth)
            };
            if depth_left == 0 {
                break;
            }

            let width_left = box_width.saturating_sub(x);
            let length_left = box_length.saturating_sub(y);

            let next_item = match remaining.front() {
                Some(item) => item.clone(),
                None => break,
            };

            let weight_left = max_payload.saturating_sub(weight_used);
            let fit = if next_item.weight > weight_left {
                None
            } else {
                let hint = remaining.get(1).cloned();
                OrientatedItemFactory::best_fit(
                    &next_item,
                    width_left,
                    length_left,
                    depth_left,
                    (x, y, start_depth),
                    &context,
                    hint.as_ref(),
                )
            };

            match fit {
                Some(orientation) => {
                    remaining.pop_front();
                    if depth == 0 {
                        depth = orientation.depth;
                    }
                    row_length = row_length.max(orientation.length);
                    let next_x = x + orientation.width;
                    weight_used += orientation.item.weight;
                    context.push(PackedItem {
                        orientation,
                        x,
                        y,
                        z: start_depth,
                    });
                    x = next_x;
                }
                None => {
                    // Nothing fits even at a fresh row: the layer is done.
                    if row_length == 0 {
                        break;
                    }
                    let new_y = y + row_length;
                    if new_y >= box_length {
                        break;
                    }
                    x = 0;
                    y = new_y;
                    row_length = 0;
                }
            }
        }

        let items = context.split_off(base_len);
        PackedLayer {
            start_depth,
            depth,
            items,
        }
    }
}
