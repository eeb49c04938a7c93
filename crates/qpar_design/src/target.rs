//! Targets: one source/sink pin pair on a routed (or don't-route) net.

use crate::ids::{PinId, TargetId, WireId};
use crate::route::RoutePath;
use serde::{Deserialize, Serialize};

/// One source/sink pin pair derived from a net, per the net→target policy
/// in the design construction rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    /// The unique ID of this target.
    pub id: TargetId,
    /// The wire this target belongs to.
    pub wire: WireId,
    /// The source pin for this target's route.
    pub source: PinId,
    /// The sink pin for this target's route.
    pub sink: PinId,
    /// Whether this target is excluded from routing (model-only fragment).
    pub dont_route: bool,
    /// Timing slack used for router criticality ordering (`1/slack`); missing
    /// slack defaults to `1.0`.
    pub slack: f64,
    /// The route found for this target, once routed.
    pub route: Option<RoutePath>,
}

impl Target {
    /// Creates a new, unrouted target.
    pub fn new(
        id: TargetId,
        wire: WireId,
        source: PinId,
        sink: PinId,
        dont_route: bool,
    ) -> Self {
        Self {
            id,
            wire,
            source,
            sink,
            dont_route,
            slack: 1.0,
            route: None,
        }
    }

    /// Routing criticality, `1/slack`; used to order targets within a pass.
    pub fn criticality(&self) -> f64 {
        1.0 / self.slack
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_slack_is_one() {
        let t = Target::new(
            TargetId::from_raw(0),
            WireId::from_raw(0),
            PinId::from_raw(0),
            PinId::from_raw(1),
            false,
        );
        assert_eq!(t.slack, 1.0);
        assert_eq!(t.criticality(), 1.0);
    }

    #[test]
    fn higher_criticality_for_lower_slack() {
        let mut t = Target::new(
            TargetId::from_raw(0),
            WireId::from_raw(0),
            PinId::from_raw(0),
            PinId::from_raw(1),
            false,
        );
        t.slack = 0.5;
        assert_eq!(t.criticality(), 2.0);
    }

    #[test]
    fn dont_route_target_has_no_route() {
        let t = Target::new(
            TargetId::from_raw(0),
            WireId::from_raw(0),
            PinId::from_raw(0),
            PinId::from_raw(0),
            true,
        );
        assert!(t.dont_route);
        assert!(t.route.is_none());
    }
}
