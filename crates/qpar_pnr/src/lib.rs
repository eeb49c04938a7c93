//! Placement and routing for the quantum-annealing Chimera place-and-route
//! compiler.
//!
//! # Pipeline
//!
//! 1. **Place** — random initial placement of movable gate elements onto
//!    fabric cells, refined by simulated annealing (spec §4.4).
//! 2. **Route** — build the routing graph over the placed design and
//!    negotiate congestion-free paths for every routable target with a
//!    Pathfinder-style algorithm (spec §4.3, §4.5).

#![warn(missing_docs)]

pub mod error;
pub mod placement;
pub mod routing;

pub use error::PnrError;
pub use placement::place;
pub use routing::route;

/// Places then routes `design` onto `fabric`, deterministically for `seed`.
pub fn place_and_route(
    design: &mut qpar_design::Design,
    fabric: &qpar_fabric::Fabric,
    seed: u64,
) -> Result<(), PnrError> {
    place(design, fabric, seed)?;
    route(design, fabric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qpar_design::{Design, GateInputSpec, GateSpec, NetSpec, NetlistSpec};
    use qpar_fabric::Fabric;

    #[test]
    fn and_gate_places_and_routes() {
        let spec = NetlistSpec {
            gates: vec![GateSpec {
                name: "g".into(),
                func: "AND".into(),
                inputs: vec![
                    GateInputSpec {
                        name: "a".into(),
                        phase: "+".into(),
                    },
                    GateInputSpec {
                        name: "b".into(),
                        phase: "+".into(),
                    },
                ],
                output: "y".into(),
            }],
            nets: vec![
                NetSpec {
                    name: "n_a".into(),
                    source: "a".into(),
                    sinks: vec![],
                },
                NetSpec {
                    name: "n_b".into(),
                    source: "b".into(),
                    sinks: vec![],
                },
                NetSpec {
                    name: "n_y".into(),
                    source: "y".into(),
                    sinks: vec![],
                },
            ],
            model_pins: vec!["a".into(), "b".into(), "y".into()],
        };
        let mut design = Design::from_spec(&spec).unwrap();
        design.derive_placement_model().unwrap();
        let fabric = Fabric::new(2, 2);

        place_and_route(&mut design, &fabric, 1).unwrap();

        for t in &design.targets {
            if !t.dont_route {
                assert!(t.route.is_some());
            }
        }
    }
}
