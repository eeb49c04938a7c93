//! Placement/routing error kinds.

use qpar_routegraph::NodeId;

/// A placement or routing failure.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PnrError {
    /// A move was proposed into a cell occupied by a non-movable element.
    #[error("cannot move element into cell ({x},{y}), occupied by a fixed element")]
    OccupiedByFixed {
        /// Target cell x-coordinate.
        x: i64,
        /// Target cell y-coordinate.
        y: i64,
    },
    /// The fabric has no free cell for a movable element.
    #[error("fabric ({x_cells}x{y_cells} cells) has no room for {n_elements} movable elements")]
    FabricTooSmall {
        /// Fabric width in cells.
        x_cells: u32,
        /// Fabric height in cells.
        y_cells: u32,
        /// Number of movable elements requiring placement.
        n_elements: usize,
    },
    /// The router reached its iteration cap with nodes still overused.
    #[error("routing did not converge after {passes} passes; {} node(s) still overused", offending.len())]
    Unroutable {
        /// How many negotiation passes were attempted.
        passes: usize,
        /// The nodes that remained overused at the cap.
        offending: Vec<NodeId>,
    },
}
