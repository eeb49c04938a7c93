//! Data types for the Chimera fabric: qubits, couplers, and cells.

use qpar_common::{CouplerId, QubitId};
use serde::{Deserialize, Serialize};

/// The side of a Chimera cell's K4,4 bipartite graph a qubit sits on.
///
/// `local` values `0..4` are the left column, `4..8` the right column;
/// `local` and `local + 4` are intra-cell partners on opposite sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    /// Locals `0..4`.
    Left,
    /// Locals `4..8`.
    Right,
}

/// The kind of coupler connecting two qubits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CouplerKind {
    /// A K4,4 coupler within a single cell.
    IntraCell,
    /// A coupler between vertically adjacent cells (same left-column local).
    InterCellVertical,
    /// A coupler between horizontally adjacent cells (same right-column local).
    InterCellHorizontal,
}

/// A single hardware qubit in the Chimera fabric.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Qubit {
    /// The unique ID of this qubit.
    pub id: QubitId,
    /// Cell column index.
    pub x: u32,
    /// Cell row index.
    pub y: u32,
    /// Position within the cell, `0..8`.
    pub local: u32,
}

impl Qubit {
    /// Which side of the K4,4 this qubit sits on.
    pub fn column(&self) -> Column {
        if self.local < 4 {
            Column::Left
        } else {
            Column::Right
        }
    }

    /// The local index of this qubit's intra-cell partner (`local ^ 4`... as `local +- 4`).
    pub fn partner_local(&self) -> u32 {
        if self.local < 4 {
            self.local + 4
        } else {
            self.local - 4
        }
    }
}

/// A single hardware coupler connecting two qubits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coupler {
    /// The unique ID of this coupler.
    pub id: CouplerId,
    /// The lower-indexed endpoint qubit (canonical ordering).
    pub a: QubitId,
    /// The higher-indexed endpoint qubit (canonical ordering).
    pub b: QubitId,
    /// What kind of coupler this is.
    pub kind: CouplerKind,
}

/// A single Chimera cell: its 8 qubits and 16 intra-cell couplers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    /// Column index of this cell.
    pub x: u32,
    /// Row index of this cell.
    pub y: u32,
    /// The 8 qubits of this cell, indexed by `local`.
    pub qubits: [QubitId; 8],
    /// The 16 intra-cell couplers of this cell (left × right, 4×4).
    pub intra_couplers: Vec<CouplerId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_split() {
        let left = Qubit {
            id: QubitId::from_raw(0),
            x: 0,
            y: 0,
            local: 2,
        };
        let right = Qubit {
            id: QubitId::from_raw(1),
            x: 0,
            y: 0,
            local: 6,
        };
        assert_eq!(left.column(), Column::Left);
        assert_eq!(right.column(), Column::Right);
    }

    #[test]
    fn partner_local_roundtrip() {
        let q = Qubit {
            id: QubitId::from_raw(0),
            x: 0,
            y: 0,
            local: 1,
        };
        assert_eq!(q.partner_local(), 5);
        let q2 = Qubit {
            id: QubitId::from_raw(0),
            x: 0,
            y: 0,
            local: 5,
        };
        assert_eq!(q2.partner_local(), 1);
    }
}
