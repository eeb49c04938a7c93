//! Simulated-annealing placement refinement (spec §4.4).

use crate::error::PnrError;
use crate::placement::cost::{apply_move, commit_move, restore_move, total_cost, verify_bboxes};
use qpar_design::{Design, ElementId, ElementKind};
use qpar_fabric::Fabric;
use rand::Rng;
use std::collections::HashMap;

/// Inner-loop move-count multiplier: `N_moves = k * n_elements^(4/3)`.
const MOVES_PER_TEMP_K: f64 = 10.0;

/// How many wire-touching moves to sample when estimating the initial
/// temperature from average move cost.
const INIT_SAMPLE_MOVES: usize = 30;

/// Recompute-from-scratch sanity check interval, in moves.
const SANITY_CHECK_INTERVAL: usize = 64;

/// Annealing termination threshold: stop once `T < EPS * cost / n_wires`.
const EPS: f64 = 1e-3;

fn cooling_factor(accept_rate: f64) -> f64 {
    if accept_rate < 0.44 {
        0.5
    } else if accept_rate < 0.8 {
        0.9
    } else if accept_rate < 0.9 {
        0.95
    } else {
        0.8
    }
}

/// A `(x, y) -> element` occupancy map over movable elements, kept in sync
/// with `design` across accepted moves.
struct Occupancy {
    by_cell: HashMap<(i64, i64), ElementId>,
}

impl Occupancy {
    fn build(design: &Design) -> Self {
        let mut by_cell = HashMap::new();
        for e in &design.elements {
            if matches!(e.kind, ElementKind::Gate(_)) {
                if let Some(pos) = *e.placement.current() {
                    by_cell.insert(pos, e.id);
                }
            }
        }
        Self { by_cell }
    }

    fn occupant(&self, cell: (i64, i64)) -> Option<ElementId> {
        self.by_cell.get(&cell).copied()
    }

    fn mv(&mut self, element: ElementId, from: (i64, i64), to: (i64, i64)) {
        self.by_cell.remove(&from);
        self.by_cell.insert(to, element);
    }
}

fn random_candidate_cell(
    rng: &mut impl Rng,
    fabric: &Fabric,
    around: (i64, i64),
    r_lim: i64,
) -> (i64, i64) {
    let x_lo = (around.0 - r_lim).max(0);
    let x_hi = (around.0 + r_lim).min(fabric.x_cells() as i64 - 1);
    let y_lo = (around.1 - r_lim).max(0);
    let y_hi = (around.1 + r_lim).min(fabric.y_cells() as i64 - 1);
    let x = rng.gen_range(x_lo..=x_hi);
    let y = rng.gen_range(y_lo..=y_hi);
    (x, y)
}

/// Refines an already-randomly-placed design with simulated annealing.
///
/// Proposes moving (or swapping) a randomly chosen movable element within a
/// shrinking window around its current cell, accepting moves that lower
/// total HPWL and probabilistically accepting uphill moves via the
/// Metropolis criterion. Cools geometrically with an acceptance-rate-
/// dependent rate and periodically verifies the incrementally maintained
/// bounding boxes against a from-scratch recompute.
pub(crate) fn simulated_annealing(
    design: &mut Design,
    fabric: &Fabric,
    rng: &mut impl Rng,
) -> Result<(), PnrError> {
    let movable: Vec<ElementId> = design
        .elements
        .iter()
        .filter(|e| e.movable && matches!(e.kind, ElementKind::Gate(_)))
        .map(|e| e.id)
        .collect();
    let n = movable.len();
    if n < 2 {
        return Ok(());
    }

    let mut occupancy = Occupancy::build(design);
    let mut r_lim = fabric.x_cells().max(fabric.y_cells()) as i64;

    let mut temperature = estimate_initial_temperature(design, fabric, &movable, rng);
    let moves_per_temp = (MOVES_PER_TEMP_K * (n as f64).powf(4.0 / 3.0)).ceil() as usize;

    let n_wires = design.wires.len().max(1) as f64;
    let mut move_count = 0usize;

    loop {
        let mut accepted = 0usize;

        for _ in 0..moves_per_temp {
            move_count += 1;
            let element = movable[rng.gen_range(0..n)];
            let from = design
                .element(element)
                .placement
                .current()
                .expect("movable element must already be placed");
            let to = random_candidate_cell(rng, fabric, from, r_lim.max(1));
            if to == from {
                continue;
            }

            if let Some(occupant) = occupancy.occupant(to) {
                if occupant == element {
                    continue;
                }
                if !design.element(occupant).movable {
                    return Err(PnrError::OccupiedByFixed { x: to.0, y: to.1 });
                }
                // Swap: compute the combined delta of moving both elements.
                let delta_a = apply_move(design, element, Some(from), to);
                let delta_b = apply_move(design, occupant, Some(to), from);
                let delta = delta_a + delta_b;

                if accept(delta, temperature, rng) {
                    design.element_mut(element).placement.set(Some(to));
                    design.element_mut(occupant).placement.set(Some(from));
                    commit_move(design, element);
                    commit_move(design, occupant);
                    design.element_mut(element).placement.commit();
                    design.element_mut(occupant).placement.commit();
                    occupancy.mv(element, from, to);
                    occupancy.mv(occupant, to, from);
                    accepted += 1;
                } else {
                    restore_move(design, element);
                    restore_move(design, occupant);
                }
            } else {
                let delta = apply_move(design, element, Some(from), to);
                if accept(delta, temperature, rng) {
                    design.element_mut(element).placement.set(Some(to));
                    commit_move(design, element);
                    design.element_mut(element).placement.commit();
                    occupancy.mv(element, from, to);
                    accepted += 1;
                } else {
                    restore_move(design, element);
                }
            }

            if move_count % SANITY_CHECK_INTERVAL == 0 {
                debug_assert!(
                    verify_bboxes(design),
                    "incremental bbox diverged from recompute at move {move_count}"
                );
            }
        }

        let accept_rate = accepted as f64 / moves_per_temp as f64;
        temperature *= cooling_factor(accept_rate);
        r_lim = (r_lim as f64 * (1.0 - 0.44 + accept_rate)).max(1.0) as i64;

        let cost = total_cost(design);
        if temperature < EPS * cost / n_wires {
            break;
        }
    }

    debug_assert!(verify_bboxes(design));
    Ok(())
}

fn accept(delta: f64, temperature: f64, rng: &mut impl Rng) -> bool {
    if delta <= 0.0 {
        return true;
    }
    if temperature <= 0.0 {
        return false;
    }
    rng.gen::<f64>() < (-delta / temperature).exp()
}

/// Samples random trial moves (applied then immediately reverted) and
/// returns the average `|ΔC|`, used as the initial annealing temperature.
fn estimate_initial_temperature(
    design: &mut Design,
    fabric: &Fabric,
    movable: &[ElementId],
    rng: &mut impl Rng,
) -> f64 {
    let mut total = 0.0;
    let mut samples = 0usize;
    for _ in 0..INIT_SAMPLE_MOVES {
        let element = movable[rng.gen_range(0..movable.len())];
        let from = match *design.element(element).placement.current() {
            Some(p) => p,
            None => continue,
        };
        let to = random_candidate_cell(rng, fabric, from, fabric.x_cells().max(fabric.y_cells()) as i64);
        if to == from {
            continue;
        }
        let delta = apply_move(design, element, Some(from), to);
        restore_move(design, element);
        total += delta.abs();
        samples += 1;
    }
    if samples == 0 {
        1.0
    } else {
        (total / samples as f64).max(1e-6)
    }
}
