//! Session state for the interactive shell: the fabric (built once from
//! config), the design as it moves through build → init → place → route →
//! generate, and the file emission for each stage (spec §6.1, §6.3, §6.4).

use std::fmt::Write as _;
use std::path::Path;

use qpar_design::{Design, PinId, PinRole, RouteWaypoint};
use qpar_fabric::Fabric;
use qpar_gen::IsingModel;

use crate::config::QparConfig;
use crate::error::QparError;

/// The mutable state of one `qpar` shell session.
pub struct Session {
    fabric: Fabric,
    seed: u64,
    design: Option<Design>,
    initialized: bool,
    placed: bool,
    routed: bool,
}

impl Session {
    /// Builds the fabric from `config` and starts an empty session.
    pub fn new(config: &QparConfig) -> Self {
        Self {
            fabric: Fabric::new(config.x_cells, config.y_cells),
            seed: config.seed,
            design: None,
            initialized: false,
            placed: false,
            routed: false,
        }
    }

    fn design_mut(&mut self) -> Result<&mut Design, QparError> {
        self.design.as_mut().ok_or_else(QparError::no_design)
    }

    fn design(&self) -> Result<&Design, QparError> {
        self.design.as_ref().ok_or_else(QparError::no_design)
    }

    /// `build_qpar_nl <path>`: parses a netlist file and sets it as the design.
    pub fn build_qpar_nl(&mut self, path: &str) -> Result<(), QparError> {
        let source = std::fs::read_to_string(path)?;
        let spec = crate::netlist::parse(&source)?;
        let design = Design::from_spec(&spec)?;
        self.design = Some(design);
        self.initialized = false;
        self.placed = false;
        self.routed = false;
        Ok(())
    }

    /// `init_system`: requires a design and the (always-built) fabric;
    /// derives the placement/routing model from the loaded netlist.
    pub fn init_system(&mut self) -> Result<(), QparError> {
        if self.fabric.qubits().is_empty() {
            return Err(QparError::no_fabric());
        }
        self.design_mut()?.derive_placement_model()?;
        self.initialized = true;
        Ok(())
    }

    /// `place`: runs the placer and writes `final.place`.
    pub fn place(&mut self, out_dir: &Path) -> Result<(), QparError> {
        if !self.initialized {
            return Err(QparError::not_initialized());
        }
        let design = self.design.as_mut().ok_or_else(QparError::no_design)?;
        qpar_pnr::place(design, &self.fabric, self.seed)?;
        self.placed = true;
        self.routed = false;
        write_place_file(self.design()?, &out_dir.join("final.place"))?;
        Ok(())
    }

    /// `route`: runs the router and writes `final.route`.
    pub fn route(&mut self, out_dir: &Path) -> Result<(), QparError> {
        if !self.placed {
            return Err(QparError::not_placed());
        }
        let design = self.design.as_mut().ok_or_else(QparError::no_design)?;
        qpar_pnr::route(design, &self.fabric)?;
        self.routed = true;
        write_route_file(self.design()?, &self.fabric, &out_dir.join("final.route"))?;
        Ok(())
    }

    /// `generate`: builds the Ising model, writes `dwave.config`, and
    /// returns the ground energy to print.
    pub fn generate(&mut self, out_dir: &Path) -> Result<f64, QparError> {
        if !self.routed {
            return Err(QparError::not_routed());
        }
        let model = qpar_gen::generate(self.design()?, &self.fabric)?;
        write_dwave_config(&model, &self.fabric, &out_dir.join("dwave.config"))?;
        Ok(model.ground_energy())
    }
}

fn pin_label(design: &Design, pin: PinId) -> String {
    let p = design.pin(pin);
    match p.role {
        PinRole::GateInput { gate, .. } | PinRole::GateOutput { gate } => {
            format!("{}.{}", design.gate(gate).name, p.name)
        }
        PinRole::Model => p.name.clone(),
    }
}

fn write_place_file(design: &Design, path: &Path) -> std::io::Result<()> {
    let mut out = String::new();
    for element in &design.elements {
        if !element.movable {
            continue;
        }
        if let Some((x, y)) = *element.placement.current() {
            let _ = writeln!(out, "{} {x} {y}", element.name);
        }
    }
    std::fs::write(path, out)
}

/// Renders one route waypoint as spec §6.4's parenthesized token.
fn waypoint_token(design: &Design, fabric: &Fabric, waypoint: RouteWaypoint) -> String {
    match waypoint {
        RouteWaypoint::Pin(pin) => format!("({})", pin_label(design, pin)),
        RouteWaypoint::Qubit(qubit, is_logic) => {
            let q = fabric
                .qubit_by_global_index(qubit.as_raw())
                .expect("routed qubit exists in fabric");
            format!("({},{},{},{is_logic})", q.x, q.y, q.local)
        }
        // Callers filter these out before calling; the coupler itself
        // doesn't appear in the printed path, only the qubits it joins.
        RouteWaypoint::Interaction(_) => String::new(),
    }
}

fn write_route_file(design: &Design, fabric: &Fabric, path: &Path) -> std::io::Result<()> {
    let mut out = String::new();
    for target in &design.targets {
        let Some(route) = &target.route else { continue };
        let tokens: Vec<String> = route
            .waypoints
            .iter()
            .filter(|wp| !matches!(wp, RouteWaypoint::Interaction(_)))
            .map(|&wp| waypoint_token(design, fabric, wp))
            .collect();
        let _ = writeln!(out, "{}", tokens.join(" \u{2192} "));
    }
    std::fs::write(path, out)
}

fn write_dwave_config(model: &IsingModel, fabric: &Fabric, path: &Path) -> std::io::Result<()> {
    let mut out = String::new();
    let bias_lines = model.bias_lines();
    let coupler_lines = model.coupler_lines();
    let _ = writeln!(
        out,
        "{} {}",
        fabric.qubits().len(),
        bias_lines.len() + coupler_lines.len()
    );
    for (qubit, h) in &bias_lines {
        let _ = writeln!(out, "{} {} {}", qubit.as_raw(), qubit.as_raw(), h);
    }
    for ((a, b), j) in &coupler_lines {
        let _ = writeln!(out, "{a} {b} {j}");
    }
    std::fs::write(path, out)
}
