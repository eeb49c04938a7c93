//! The Chimera hardware fabric: qubits, couplers, and cell arithmetic.
//!
//! A fabric is a `X × Y` grid of cells, each an 8-qubit K4,4 bipartite
//! graph. Cells are wired to their neighbors by inter-cell couplers:
//! vertically adjacent cells share 4 couplers on matching left-column
//! locals, horizontally adjacent cells share 4 on matching right-column
//! locals. See [`types`] for the qubit/coupler/cell data types.

#![warn(missing_docs)]

pub mod types;

use qpar_common::{CouplerId, QubitId};
use std::collections::HashMap;
use types::{Cell, Column, Coupler, CouplerKind, Qubit};

pub use types::{Cell as FabricCell, Coupler as FabricCoupler, CouplerKind as FabricCouplerKind};

/// The Chimera fabric: a complete qubit/coupler graph over an `X × Y` grid of cells.
#[derive(Debug, Clone)]
pub struct Fabric {
    x_cells: u32,
    y_cells: u32,
    qubits: Vec<Qubit>,
    couplers: Vec<Coupler>,
    coupler_by_endpoints: HashMap<(u32, u32), CouplerId>,
    cells: Vec<Cell>,
}

impl Fabric {
    /// Builds the full Chimera graph for an `X × Y` grid of cells.
    pub fn new(x_cells: u32, y_cells: u32) -> Self {
        let mut qubits = Vec::with_capacity((x_cells * y_cells * 8) as usize);
        for x in 0..x_cells {
            for y in 0..y_cells {
                for local in 0..8 {
                    let id = QubitId::from_raw(global_index(x_cells, y_cells, x, y, local));
                    qubits.push(Qubit { id, x, y, local });
                }
            }
        }

        let mut couplers = Vec::new();
        let mut coupler_by_endpoints = HashMap::new();
        let mut cells = Vec::with_capacity((x_cells * y_cells) as usize);

        for x in 0..x_cells {
            for y in 0..y_cells {
                let mut cell_qubits = [QubitId::from_raw(0); 8];
                for local in 0..8u32 {
                    cell_qubits[local as usize] =
                        QubitId::from_raw(global_index(x_cells, y_cells, x, y, local));
                }

                let mut intra = Vec::with_capacity(16);
                for left in 0..4u32 {
                    for right in 4..8u32 {
                        let a = cell_qubits[left as usize];
                        let b = cell_qubits[right as usize];
                        let id = push_coupler(
                            &mut couplers,
                            &mut coupler_by_endpoints,
                            a,
                            b,
                            CouplerKind::IntraCell,
                        );
                        intra.push(id);
                    }
                }

                cells.push(Cell {
                    x,
                    y,
                    qubits: cell_qubits,
                    intra_couplers: intra,
                });
            }
        }

        for x in 0..x_cells {
            for y in 0..y_cells.saturating_sub(1) {
                for local in 0..4u32 {
                    let a = QubitId::from_raw(global_index(x_cells, y_cells, x, y, local));
                    let b = QubitId::from_raw(global_index(x_cells, y_cells, x, y + 1, local));
                    push_coupler(
                        &mut couplers,
                        &mut coupler_by_endpoints,
                        a,
                        b,
                        CouplerKind::InterCellVertical,
                    );
                }
            }
        }

        for x in 0..x_cells.saturating_sub(1) {
            for y in 0..y_cells {
                for local in 4..8u32 {
                    let a = QubitId::from_raw(global_index(x_cells, y_cells, x, y, local));
                    let b = QubitId::from_raw(global_index(x_cells, y_cells, x + 1, y, local));
                    push_coupler(
                        &mut couplers,
                        &mut coupler_by_endpoints,
                        a,
                        b,
                        CouplerKind::InterCellHorizontal,
                    );
                }
            }
        }

        Self {
            x_cells,
            y_cells,
            qubits,
            couplers,
            coupler_by_endpoints,
            cells,
        }
    }

    /// Total number of cells in the `x` direction.
    pub fn x_cells(&self) -> u32 {
        self.x_cells
    }

    /// Total number of cells in the `y` direction.
    pub fn y_cells(&self) -> u32 {
        self.y_cells
    }

    /// All qubits, in construction (global-index) order.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// All couplers, in construction order: intra-cell first, then
    /// inter-cell vertical, then inter-cell horizontal.
    pub fn couplers(&self) -> &[Coupler] {
        &self.couplers
    }

    /// Looks up a qubit by its `(x, y, local)` coordinate.
    pub fn qubit_at(&self, x: u32, y: u32, local: u32) -> Option<&Qubit> {
        if x >= self.x_cells || y >= self.y_cells || local >= 8 {
            return None;
        }
        let idx = global_index(self.x_cells, self.y_cells, x, y, local);
        self.qubits.get(idx as usize)
    }

    /// Looks up a qubit by its global index.
    pub fn qubit_by_global_index(&self, global: u32) -> Option<&Qubit> {
        self.qubits.get(global as usize)
    }

    /// Looks up the coupler between two qubits, order-independent.
    pub fn interaction(&self, a: QubitId, b: QubitId) -> Option<&Coupler> {
        let key = canonical_key(a, b);
        let id = self.coupler_by_endpoints.get(&key)?;
        self.couplers.get(id.as_raw() as usize)
    }

    /// Returns the cell at `(x, y)`, if in range.
    pub fn cell(&self, x: u32, y: u32) -> Option<&Cell> {
        if x >= self.x_cells || y >= self.y_cells {
            return None;
        }
        self.cells.get((x * self.y_cells + y) as usize)
    }

    /// All cells, in `(x, y)` row-major order matching [`Self::cell`] indexing.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The qubits adjacent (in the K4,4 sense) to the given qubit's partner column.
    pub fn column_partners(&self, qubit: &Qubit) -> Vec<QubitId> {
        let cell = match self.cell(qubit.x, qubit.y) {
            Some(c) => c,
            None => return Vec::new(),
        };
        let range: Vec<u32> = match qubit.column() {
            Column::Left => (4..8).collect(),
            Column::Right => (0..4).collect(),
        };
        range.into_iter().map(|l| cell.qubits[l as usize]).collect()
    }
}

fn global_index(_x_cells: u32, y_cells: u32, x: u32, y: u32, local: u32) -> u32 {
    ((x * y_cells) + y) * 8 + local
}

fn canonical_key(a: QubitId, b: QubitId) -> (u32, u32) {
    let (ra, rb) = (a.as_raw(), b.as_raw());
    if ra <= rb {
        (ra, rb)
    } else {
        (rb, ra)
    }
}

fn push_coupler(
    couplers: &mut Vec<Coupler>,
    index: &mut HashMap<(u32, u32), CouplerId>,
    a: QubitId,
    b: QubitId,
    kind: CouplerKind,
) -> CouplerId {
    let key = canonical_key(a, b);
    let id = CouplerId::from_raw(couplers.len() as u32);
    let (lo, hi) = key;
    couplers.push(Coupler {
        id,
        a: QubitId::from_raw(lo),
        b: QubitId::from_raw(hi),
        kind,
    });
    index.insert(key, id);
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Matches spec scenario S1: `(X=2,Y=2)` → 32 qubits, 64 intra-cell
    /// couplers, 32 inter-cell couplers (4 vertical + 4 horizontal groups).
    #[test]
    fn s1_counts_2x2() {
        let fabric = Fabric::new(2, 2);
        assert_eq!(fabric.qubits().len(), 32);

        let intra = fabric
            .couplers()
            .iter()
            .filter(|c| c.kind == CouplerKind::IntraCell)
            .count();
        assert_eq!(intra, 64);

        let inter = fabric
            .couplers()
            .iter()
            .filter(|c| c.kind != CouplerKind::IntraCell)
            .count();
        assert_eq!(inter, 32);
    }

    #[test]
    fn invariant_counts_general() {
        let (x, y) = (3u32, 4u32);
        let fabric = Fabric::new(x, y);
        assert_eq!(fabric.qubits().len() as u32, x * y * 8);

        let intra = fabric
            .couplers()
            .iter()
            .filter(|c| c.kind == CouplerKind::IntraCell)
            .count() as u32;
        assert_eq!(intra, x * y * 16);

        let inter = fabric
            .couplers()
            .iter()
            .filter(|c| c.kind != CouplerKind::IntraCell)
            .count() as u32;
        assert_eq!(inter, 4 * x * (y - 1) + 4 * (x - 1) * y);
    }

    #[test]
    fn qubit_lookup_by_coordinate_and_index() {
        let fabric = Fabric::new(2, 2);
        let q = fabric.qubit_at(1, 0, 3).unwrap();
        assert_eq!(q.x, 1);
        assert_eq!(q.y, 0);
        assert_eq!(q.local, 3);

        let by_index = fabric.qubit_by_global_index(q.id.as_raw()).unwrap();
        assert_eq!(by_index.id, q.id);
    }

    #[test]
    fn qubit_lookup_out_of_range() {
        let fabric = Fabric::new(2, 2);
        assert!(fabric.qubit_at(5, 0, 0).is_none());
        assert!(fabric.qubit_at(0, 0, 8).is_none());
    }

    #[test]
    fn interaction_is_symmetric() {
        let fabric = Fabric::new(2, 2);
        let a = fabric.qubit_at(0, 0, 0).unwrap().id;
        let b = fabric.qubit_at(0, 0, 4).unwrap().id;
        let fwd = fabric.interaction(a, b).unwrap();
        let rev = fabric.interaction(b, a).unwrap();
        assert_eq!(fwd.id, rev.id);
    }

    #[test]
    fn no_interaction_between_unconnected_qubits() {
        let fabric = Fabric::new(2, 2);
        let a = fabric.qubit_at(0, 0, 0).unwrap().id;
        let b = fabric.qubit_at(1, 1, 1).unwrap().id;
        assert!(fabric.interaction(a, b).is_none());
    }

    #[test]
    fn vertical_inter_cell_coupling() {
        let fabric = Fabric::new(1, 2);
        for local in 0..4u32 {
            let a = fabric.qubit_at(0, 0, local).unwrap().id;
            let b = fabric.qubit_at(0, 1, local).unwrap().id;
            let c = fabric.interaction(a, b).unwrap();
            assert_eq!(c.kind, CouplerKind::InterCellVertical);
        }
    }

    #[test]
    fn horizontal_inter_cell_coupling() {
        let fabric = Fabric::new(2, 1);
        for local in 4..8u32 {
            let a = fabric.qubit_at(0, 0, local).unwrap().id;
            let b = fabric.qubit_at(1, 0, local).unwrap().id;
            let c = fabric.interaction(a, b).unwrap();
            assert_eq!(c.kind, CouplerKind::InterCellHorizontal);
        }
    }

    #[test]
    fn cell_has_eight_qubits_and_sixteen_couplers() {
        let fabric = Fabric::new(2, 2);
        let cell = fabric.cell(0, 0).unwrap();
        assert_eq!(cell.qubits.len(), 8);
        assert_eq!(cell.intra_couplers.len(), 16);
    }

    #[test]
    fn single_cell_fabric_has_no_inter_cell_couplers() {
        let fabric = Fabric::new(1, 1);
        assert_eq!(fabric.qubits().len(), 8);
        assert_eq!(fabric.couplers().len(), 16);
    }

    #[test]
    fn column_partners_match_opposite_side() {
        let fabric = Fabric::new(1, 1);
        let left = fabric.qubit_at(0, 0, 0).unwrap();
        let partners = fabric.column_partners(left);
        assert_eq!(partners.len(), 4);
        for p in &partners {
            let q = fabric.qubit_by_global_index(p.as_raw()).unwrap();
            assert_eq!(q.column(), Column::Right);
        }
    }
}
