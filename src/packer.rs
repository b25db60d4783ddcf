//! Top-level entry points: iterate boxes-in-stock, feeding [`VolumePacker`],
//! shrinking the last chosen box when a smaller one still holds the same
//! items (§4.5).

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use crate::boxes::{BoxSpec, Quantities};
use crate::config::PackerConfig;
use crate::error::PackError;
use crate::item::{Item, ItemId};
use crate::log::LogLevel;
use crate::oriented_item::fits_in_box;
use crate::packed_box::PackedBox;
use crate::packed_box_list::PackedBoxList;
use crate::redistribute;
use crate::volume_packer::VolumePacker;

/// Pure volume packing: minimise the number of boxes, ignoring weight
/// balance.
pub fn pack(
    items: &[Item],
    boxes: &[BoxSpec],
    quantities: &Quantities,
) -> Result<PackedBoxList, PackError> {
    pack_with_config(items, boxes, quantities, &PackerConfig::default())
}

pub fn pack_with_config(
    items: &[Item],
    boxes: &[BoxSpec],
    quantities: &Quantities,
    config: &PackerConfig,
) -> Result<PackedBoxList, PackError> {
    validate_input(items, boxes)?;
    pack_core(items, boxes, quantities.clone(), config)
}

/// Volume packing followed by weight redistribution (§4.6).
pub fn pack_with_weight_balance(
    items: &[Item],
    boxes: &[BoxSpec],
    quantities: &Quantities,
) -> Result<PackedBoxList, PackError> {
    pack_with_weight_balance_with_config(items, boxes, quantities, &PackerConfig::default())
}

pub fn pack_with_weight_balance_with_config(
    items: &[Item],
    boxes: &[BoxSpec],
    quantities: &Quantities,
    config: &PackerConfig,
) -> Result<PackedBoxList, PackError> {
    let packed = pack_with_config(items, boxes, quantities, config)?;
    Ok(redistribute::redistribute(
        packed,
        boxes,
        quantities.clone(),
        config,
    ))
}

fn validate_input(items: &[Item], boxes: &[BoxSpec]) -> Result<(), PackError> {
    if boxes.is_empty() {
        return Err(PackError::InvalidInput("no box types supplied".into()));
    }
    for b in boxes {
        if b.inner_length == 0 || b.inner_width == 0 || b.inner_depth == 0 {
            return Err(PackError::InvalidInput(format!(
                "box {:?} has a non-positive inner dimension",
                b.id
            )));
        }
    }

    let max_payload = boxes.iter().map(|b| b.max_payload).max().unwrap_or(0);

    for item in items {
        if item.length == 0 || item.width == 0 || item.depth == 0 {
            return Err(PackError::InvalidInput(format!(
                "item {:?} has a non-positive dimension",
                item.id
            )));
        }
        if item.weight > max_payload {
            return Err(PackError::InvalidInput(format!(
                "item {:?} weighs {} which exceeds every box's max payload",
                item.id, item.weight
            )));
        }
        if !boxes.iter().any(|b| fits_in_box(item, b)) {
            return Err(PackError::ItemTooLarge { item: item.id });
        }
    }

    Ok(())
}

/// The outer multi-box loop, shared by the public entry points and by
/// [`crate::redistribute`]'s local re-pack helper.
pub(crate) fn pack_core(
    items: &[Item],
    boxes: &[BoxSpec],
    mut quantities: Quantities,
    config: &PackerConfig,
) -> Result<PackedBoxList, PackError> {
    let mut remaining: Vec<Item> = items.to_vec();
    remaining.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

    let mut packed_boxes: Vec<PackedBox> = Vec::new();

    while !remaining.is_empty() {
        let lightest_weight = remaining.iter().map(|i| i.weight).min().unwrap_or(0);

        let mut candidates: Vec<&BoxSpec> = boxes
            .iter()
            .filter(|b| quantities.get(&b.id).copied().unwrap_or(0) > 0)
            .filter(|b| b.max_payload >= lightest_weight)
            .collect();
        candidates.sort_by(|a, b| b.inner_volume().cmp(&a.inner_volume()));

        if candidates.is_empty() {
            return Err(PackError::InsufficientBoxes {
                remaining: remaining.len(),
            });
        }

        let mut best: Option<(usize, PackedBox)> = None;
        for (idx, candidate) in candidates.iter().enumerate() {
            let trial = VolumePacker::pack(&remaining, candidate, true);
            let keep = match &best {
                None => true,
                Some((_, current)) => is_better_candidate(&trial, current),
            };
            if keep {
                best = Some((idx, trial));
            }
        }
        let (chosen_idx, trial_box) = best.expect("candidates is non-empty");

        if trial_box.items.is_empty() {
            return Err(stuck_item_error(&remaining[0], boxes));
        }

        let mut chosen_box_spec: BoxSpec = candidates[chosen_idx].clone();
        if chosen_idx + 1 < candidates.len() {
            let trial_ids: BTreeSet<ItemId> =
                trial_box.items.iter().map(|pi| pi.item_id()).collect();
            for candidate in &candidates[chosen_idx + 1..] {
                let shrink_trial = VolumePacker::pack(&remaining, candidate, true);
                let shrink_ids: BTreeSet<ItemId> =
                    shrink_trial.items.iter().map(|pi| pi.item_id()).collect();
                if shrink_ids == trial_ids && candidate.inner_volume() < chosen_box_spec.inner_volume()
                {
                    chosen_box_spec = (*candidate).clone();
                }
            }
        }

        let final_box = VolumePacker::pack(&remaining, &chosen_box_spec, false);
        if final_box.items.is_empty() {
            return Err(stuck_item_error(&remaining[0], boxes));
        }

        config.logger.log(
            LogLevel::Debug,
            "committed box",
            &[
                ("box_id", format!("{:?}", chosen_box_spec.id)),
                ("items", final_box.items.len().to_string()),
            ],
        );

        let packed_ids: HashSet<ItemId> = final_box.items.iter().map(|pi| pi.item_id()).collect();
        remaining.retain(|item| !packed_ids.contains(&item.id));

        *quantities.entry(chosen_box_spec.id).or_insert(0) -= 1;
        packed_boxes.push(final_box);
    }

    Ok(PackedBoxList::new(packed_boxes))
}

/// An item that no candidate box would place this pass. Distinguishes a
/// genuine size mismatch from a `packingConstraint` that rejected every
/// placement a geometrically-fitting box would otherwise offer.
fn stuck_item_error(item: &Item, boxes: &[BoxSpec]) -> PackError {
    if item.constraint.is_some() && boxes.iter().any(|b| fits_in_box(item, b)) {
        PackError::ConstraintViolation { item: item.id }
    } else {
        PackError::ItemTooLarge { item: item.id }
    }
}

/// Candidate ranking for box choice: most items packed, then highest
/// volume utilisation, then smallest empty weight. Ties fall back to
/// candidate-list order (the caller never replaces `best` on a tie).
fn is_better_candidate(candidate: &PackedBox, current: &PackedBox) -> bool {
    if candidate.items.len() != current.items.len() {
        return candidate.items.len() > current.items.len();
    }
    match candidate.utilisation_cmp(current) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => candidate.box_spec.empty_weight < current.box_spec.empty_weight,
    }
}
