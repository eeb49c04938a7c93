//! Route paths: the physical chain a target's signal travels, as written
//! by the router.
//!
//! This is expressed in terms of fabric qubits/couplers and design pins
//! rather than routing-graph node ids, so that [`crate::Design`] (which
//! the router reads and writes into) never needs to depend back on the
//! routing-graph crate.

use qpar_common::{CouplerId, QubitId};
use serde::{Deserialize, Serialize};

use crate::ids::PinId;

/// One waypoint on a routed chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteWaypoint {
    /// A source/sink pin terminal.
    Pin(PinId),
    /// A hardware qubit, and whether it is a placed-gate logic qubit.
    Qubit(QubitId, bool),
    /// A hardware coupler used for transport.
    Interaction(CouplerId),
}

/// A complete path from a target's source pin to its sink pin.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoutePath {
    /// The ordered waypoints, starting and ending at the target's pins.
    pub waypoints: Vec<RouteWaypoint>,
}

impl RoutePath {
    /// Creates a route path from an ordered waypoint list.
    pub fn new(waypoints: Vec<RouteWaypoint>) -> Self {
        Self { waypoints }
    }

    /// Whether this path starts and ends at pins, alternating qubit/interaction in between.
    pub fn is_well_formed(&self) -> bool {
        let wp = &self.waypoints;
        if wp.len() < 2 {
            return false;
        }
        if !matches!(wp.first(), Some(RouteWaypoint::Pin(_))) {
            return false;
        }
        if !matches!(wp.last(), Some(RouteWaypoint::Pin(_))) {
            return false;
        }
        for window in wp[1..wp.len() - 1].windows(2) {
            let same_kind = matches!(
                (window[0], window[1]),
                (RouteWaypoint::Qubit(..), RouteWaypoint::Qubit(..))
                    | (RouteWaypoint::Interaction(_), RouteWaypoint::Interaction(_))
            );
            if same_kind {
                return false;
            }
        }
        true
    }
}
