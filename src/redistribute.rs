//! Post-processing pass that rebalances weight across an already-valid
//! packing by migrating items between box pairs and locally re-packing each
//! side (§4.6).

use crate::boxes::{BoxId, BoxSpec, Quantities};
use crate::config::PackerConfig;
use crate::item::Item;
use crate::packed_box::PackedBox;
use crate::packed_box_list::{population_variance, PackedBoxList};
use crate::packer;
use crate::volume_packer::VolumePacker;

pub fn redistribute(
    packed: PackedBoxList,
    boxes: &[BoxSpec],
    quantities: Quantities,
    config: &PackerConfig,
) -> PackedBoxList {
    let mut state: Vec<PackedBox> = packed.into_boxes();
    let mut stock = quantities;
    for packed_box in &state {
        *stock.entry(packed_box.box_spec.id).or_insert(0) -= 1;
    }

    loop {
        state.sort_by(|a, b| b.total_weight().cmp(&a.total_weight()));
        let mean_item_weight = mean_item_weight(&state);

        match find_improving_swap(&state, boxes, &stock, mean_item_weight, config) {
            Some(swap) => apply_swap(&mut state, &mut stock, swap),
            None => break,
        }
    }

    PackedBoxList::new(state)
}

fn mean_item_weight(state: &[PackedBox]) -> u32 {
    if state.is_empty() {
        return 0;
    }
    let total: u64 = state.iter().map(|b| b.item_weight() as u64).sum();
    (total / state.len() as u64) as u32
}

fn total_weights(state: &[PackedBox]) -> Vec<u32> {
    state.iter().map(PackedBox::total_weight).collect()
}

struct AppliedSwap {
    a_index: usize,
    b_index: usize,
    new_a: Option<PackedBox>,
    new_b: PackedBox,
}

/// Variance of `state`'s total weights after replacing box `j` with `new_b`
/// and box `i` with `new_a` (or dropping it entirely when `new_a` is
/// `None`, the "A disappears" case from §4.6 step 2).
fn variance_after_swap(
    state: &[PackedBox],
    i: usize,
    j: usize,
    new_a: &Option<PackedBox>,
    new_b: &PackedBox,
) -> f64 {
    let mut weights: Vec<u32> = Vec::with_capacity(state.len());
    for (idx, packed_box) in state.iter().enumerate() {
        if idx == i {
            if let Some(a) = new_a {
                weights.push(a.total_weight());
            }
        } else if idx == j {
            weights.push(new_b.total_weight());
        } else {
            weights.push(packed_box.total_weight());
        }
    }
    population_variance(&weights)
}

/// Trial-packs `items` into the full catalog, with `keep_box`'s own stock
/// treated as unlimited, for the side of a swap that's allowed to change box
/// type (§4.6 step 1, the B side). Scarce third-party box types are drawn
/// from `stock` directly, so only one side of a swap may ever claim one.
fn local_repack(
    items: &[Item],
    boxes: &[BoxSpec],
    stock: &Quantities,
    keep_box: BoxId,
    config: &PackerConfig,
) -> Option<PackedBox> {
    let mut local_quantities = stock.clone();
    local_quantities.insert(keep_box, config.unlimited_quantity);
    match packer::pack_core(items, boxes, local_quantities, config) {
        Ok(result) if result.len() == 1 => Some(result.into_boxes().into_iter().next().unwrap()),
        _ => None,
    }
}

/// Trial-packs `items` into `box_spec` specifically, for the side of a swap
/// that must keep its current box type (§4.6 step 3, the A side). Doesn't
/// touch `stock` at all: `items` is always a strict subset of what already
/// fit in `box_spec`, so this is a pure geometry/payload re-check, not a
/// search, and never contends with the B side over a scarce box type.
fn repack_into_same_box(items: &[Item], box_spec: &BoxSpec) -> Option<PackedBox> {
    let packed = VolumePacker::pack(items, box_spec, false);
    if packed.items.len() == items.len() {
        Some(packed)
    } else {
        None
    }
}

fn find_improving_swap(
    state: &[PackedBox],
    boxes: &[BoxSpec],
    stock: &Quantities,
    mean_item_weight: u32,
    config: &PackerConfig,
) -> Option<AppliedSwap> {
    let current_variance = population_variance(&total_weights(state));

    for i in 0..state.len() {
        for j in 0..state.len() {
            if i == j {
                continue;
            }
            let a = &state[i];
            let b = &state[j];
            if a.total_weight() <= b.total_weight() {
                continue;
            }

            let migratable: Vec<Item> = a.items.iter().map(|pi| pi.orientation.item.clone()).collect();

            for item in migratable {
                if item.weight + b.item_weight() > mean_item_weight {
                    continue;
                }

                let mut b_items: Vec<Item> = b.items.iter().map(|pi| pi.orientation.item.clone()).collect();
                b_items.push(item.clone());
                let new_b = match local_repack(&b_items, boxes, stock, b.box_spec.id, config) {
                    Some(result) => result,
                    None => continue,
                };

                let new_a = if a.items.len() == 1 {
                    None
                } else {
                    let a_items: Vec<Item> = a
                        .items
                        .iter()
                        .filter(|pi| pi.item_id() != item.id)
                        .map(|pi| pi.orientation.item.clone())
                        .collect();
                    match repack_into_same_box(&a_items, &a.box_spec) {
                        Some(result) => Some(result),
                        None => continue,
                    }
                };

                let candidate_variance = variance_after_swap(state, i, j, &new_a, &new_b);
                if candidate_variance < current_variance {
                    config.logger.log(
                        crate::log::LogLevel::Debug,
                        "accepted weight redistribution swap",
                        &[
                            ("item", format!("{:?}", item.id)),
                            ("from_box", format!("{:?}", a.box_spec.id)),
                            ("to_box", format!("{:?}", b.box_spec.id)),
                        ],
                    );
                    return Some(AppliedSwap {
                        a_index: i,
                        b_index: j,
                        new_a,
                        new_b,
                    });
                }
            }
        }
    }

    None
}

fn apply_swap(state: &mut Vec<PackedBox>, stock: &mut Quantities, swap: AppliedSwap) {
    let old_a_box_id = state[swap.a_index].box_spec.id;
    let old_b_box_id = state[swap.b_index].box_spec.id;

    *stock.entry(old_a_box_id).or_insert(0) += 1;
    *stock.entry(old_b_box_id).or_insert(0) += 1;
    *stock.entry(swap.new_b.box_spec.id).or_insert(0) -= 1;
    state[swap.b_index] = swap.new_b;

    match swap.new_a {
        Some(new_a) => {
            *stock.entry(new_a.box_spec.id).or_insert(0) -= 1;
            state[swap.a_index] = new_a;
        }
        None => {
            state.remove(swap.a_index);
        }
    }
}
