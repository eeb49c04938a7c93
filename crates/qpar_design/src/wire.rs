//! Wires: the routable form of a multi-element net.

use crate::bbox::{BBox, EdgeCount};
use crate::ids::{ElementId, NetId, WireId};
use qpar_common::Checkpoint;
use serde::{Deserialize, Serialize};

/// The routable (or model-only) form of a net.
///
/// A wire spanning more than one element carries a bounding box that the
/// placer maintains incrementally; a wire touching exactly one element is
/// a "model wire" whose sole pin is pre-assigned a local and is excluded
/// from routing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wire {
    /// The unique ID of this wire.
    pub id: WireId,
    /// The net this wire routes.
    pub net: NetId,
    /// The distinct elements this wire's pins sit on.
    pub elements: Vec<ElementId>,
    /// Bounding box, checkpointed across placement moves.
    #[serde(skip)]
    pub bbox: Checkpoint<BBox>,
    /// Per-axis extreme-edge occupancy counts, checkpointed alongside `bbox`.
    #[serde(skip)]
    pub edge_count: Checkpoint<EdgeCount>,
}

impl Wire {
    /// Whether this wire spans a single element and is therefore excluded
    /// from routing (a "model wire").
    pub fn is_model_wire(&self) -> bool {
        self.elements.len() <= 1
    }

    /// Current half-perimeter wirelength of this wire's bounding box.
    pub fn hpwl(&self) -> i64 {
        self.bbox.current().hpwl()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero_bbox() -> BBox {
        BBox {
            xl: 0,
            xr: 0,
            yt: 0,
            yb: 0,
        }
    }

    fn zero_edges() -> EdgeCount {
        EdgeCount {
            xl_cnt: 1,
            xr_cnt: 1,
            yt_cnt: 1,
            yb_cnt: 1,
        }
    }

    #[test]
    fn single_element_wire_is_model_wire() {
        let w = Wire {
            id: WireId::from_raw(0),
            net: NetId::from_raw(0),
            elements: vec![ElementId::from_raw(0)],
            bbox: Checkpoint::new(zero_bbox()),
            edge_count: Checkpoint::new(zero_edges()),
        };
        assert!(w.is_model_wire());
    }

    #[test]
    fn multi_element_wire_is_routable() {
        let w = Wire {
            id: WireId::from_raw(0),
            net: NetId::from_raw(0),
            elements: vec![ElementId::from_raw(0), ElementId::from_raw(1)],
            bbox: Checkpoint::new(zero_bbox()),
            edge_count: Checkpoint::new(zero_edges()),
        };
        assert!(!w.is_model_wire());
    }

    #[test]
    fn hpwl_reads_through_checkpoint() {
        let w = Wire {
            id: WireId::from_raw(0),
            net: NetId::from_raw(0),
            elements: vec![ElementId::from_raw(0), ElementId::from_raw(1)],
            bbox: Checkpoint::new(BBox {
                xl: 0,
                xr: 3,
                yt: 1,
                yb: 4,
            }),
            edge_count: Checkpoint::new(zero_edges()),
        };
        assert_eq!(w.hpwl(), 6);
    }
}
