//! Packs all items destined for one fixed box by stacking layers, trying
//! both box rotations unless running a single-pass trial (§4.4).

use std::collections::VecDeque;

use crate::boxes::BoxSpec;
use crate::item::Item;
use crate::layer::{LayerPacker, PackedLayer};
use crate::packed_box::{PackedBox, PackedItem};
use crate::stabiliser::LayerStabiliser;

pub struct VolumePacker;

impl VolumePacker {
    /// Packs as many of `items` as fit into `box_spec`.
    ///
    /// `single_pass` skips the second (swapped) box rotation and the layer
    /// stabiliser; it is the cheap mode used for read-only trials (candidate
    /// evaluation, shrink checks, local re-pack probing). The authoritative
    /// result that actually gets committed is always produced with
    /// `single_pass = false`.
    pub fn pack(items: &[Item], box_spec: &BoxSpec, single_pass: bool) -> PackedBox {
        let mut sorted: Vec<Item> = items.to_vec();
        sorted.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        let total_items = sorted.len();
        let has_constraint = sorted.iter().any(|item| item.constraint.is_some());

        let rotations: &[bool] = if single_pass { &[false] } else { &[false, true] };
        let mut best: Option<PackedBox> = None;

        for &swapped in rotations {
            let box_width = if swapped {
                box_spec.inner_length
            } else {
                box_spec.inner_width
            };
            let box_length = if swapped {
                box_spec.inner_width
            } else {
                box_spec.inner_length
            };
            let box_depth = box_spec.inner_depth;

            let mut layers = Self::pack_rotation(
                &sorted,
                box_width,
                box_length,
                box_depth,
                box_spec.max_payload,
                single_pass,
            );

            if swapped {
                for layer in layers.iter_mut() {
                    for item in layer.items.iter_mut() {
                        std::mem::swap(&mut item.x, &mut item.y);
                        std::mem::swap(&mut item.orientation.width, &mut item.orientation.length);
                    }
                }
            }

            if !single_pass && !has_constraint {
                layers = LayerStabiliser::stabilise(layers);
            }

            let items: Vec<PackedItem> = layers.into_iter().flat_map(|l| l.items).collect();
            let candidate = PackedBox {
                box_spec: box_spec.clone(),
                items,
            };

            if candidate.items.len() == total_items {
                return candidate;
            }

            best = Some(match best {
                None => candidate,
                Some(current) => {
                    if candidate.utilisation_cmp(&current) == std::cmp::Ordering::Greater {
                        candidate
                    } else {
                        current
                    }
                }
            });
        }

        best.unwrap_or_else(|| PackedBox::empty(box_spec.clone()))
    }

    fn pack_rotation(
        sorted: &[Item],
        box_width: u32,
        box_length: u32,
        box_depth: u32,
        max_payload: u32,
        single_pass: bool,
    ) -> Vec<PackedLayer> {
        let mut remaining: VecDeque<Item> = sorted.iter().cloned().collect();
        let mut layers: Vec<PackedLayer> = Vec::new();
        let mut context: Vec<PackedItem> = Vec::new();
        let mut current_depth = 0u32;

        while !remaining.is_empty() && current_depth < box_depth {
            let layer = LayerPacker::pack(
                &mut remaining,
                &context,
                current_depth,
                0,
                box_width,
                box_length,
                box_depth,
                max_payload,
                single_pass,
            );
            if layer.items.is_empty() {
                break;
            }
            current_depth += layer.depth;
            context.extend(layer.items.iter().cloned());
            layers.push(layer);
        }

        layers
    }
}
