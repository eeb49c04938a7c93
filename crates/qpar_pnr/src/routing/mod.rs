//! Routing: builds the routing graph from a placed design, then negotiates
//! congestion-free paths for every routable target (spec §4.3, §4.5).

pub(crate) mod dijkstra;
mod pathfinder;

use crate::error::PnrError;
use qpar_design::Design;
use qpar_diag::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};
use qpar_fabric::Fabric;
use qpar_routegraph::{FastRoutingGraph, RoutingGraph};

/// Routes every non-`dont_route` target of an already-placed design,
/// writing each target's [`qpar_design::RoutePath`] in place.
///
/// Non-convergence before the pass cap is reported through
/// [`qpar_diag::DiagnosticSink`] rather than printed directly (spec §7's
/// eventual `Unroutable` error is still returned; the warning records how
/// close the negotiation got before giving up).
pub fn route(design: &mut Design, fabric: &Fabric) -> Result<(), PnrError> {
    let graph = RoutingGraph::build(design, fabric);
    let mut fast = FastRoutingGraph::sync_from(&graph);
    let sink = DiagnosticSink::new();
    let result = pathfinder::negotiate(design, &graph, fabric, &mut fast, &sink);
    for diag in sink.take_all() {
        eprintln!("{}: {}", diag.code, diag.message);
    }
    result
}

pub(crate) fn congestion_warning(pass: usize, overused: usize) -> Diagnostic {
    Diagnostic::warning(
        DiagnosticCode::new(Category::Route, 20),
        format!("pass {pass}: {overused} node(s) still overused"),
    )
}
