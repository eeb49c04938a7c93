//! Random initial placement of movable elements.

use crate::error::PnrError;
use qpar_design::{Design, ElementKind};
use qpar_fabric::Fabric;
use rand::Rng;
use std::collections::HashSet;

/// Assigns each movable (gate) element a distinct random cell.
///
/// Fixed model-pin elements are left unplaced (`None`): their role in
/// generation is resolved through the real, placed gate pin their target
/// anchors to, so they never need a fabric cell of their own.
pub(crate) fn random_placement(
    design: &mut Design,
    fabric: &Fabric,
    rng: &mut impl Rng,
) -> Result<(), PnrError> {
    let movable: Vec<_> = design
        .elements
        .iter()
        .filter(|e| e.movable && matches!(e.kind, ElementKind::Gate(_)))
        .map(|e| e.id)
        .collect();

    let total_cells = (fabric.x_cells() as usize) * (fabric.y_cells() as usize);
    if movable.len() > total_cells {
        return Err(PnrError::FabricTooSmall {
            x_cells: fabric.x_cells(),
            y_cells: fabric.y_cells(),
            n_elements: movable.len(),
        });
    }

    let mut used: HashSet<(i64, i64)> = HashSet::new();
    for element_id in movable {
        let cell = loop {
            let x = rng.gen_range(0..fabric.x_cells()) as i64;
            let y = rng.gen_range(0..fabric.y_cells()) as i64;
            if used.insert((x, y)) {
                break (x, y);
            }
        };
        design.element_mut(element_id).placement.set(Some(cell));
        design.element_mut(element_id).placement.commit();
    }

    Ok(())
}
