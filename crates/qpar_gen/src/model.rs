//! The Ising model under construction: qubit biases, coupler weights, and
//! the expected ground-state spin assignment, all write-once-merge-checked
//! (spec §4.6 "Merging").

use crate::error::GenError;
use qpar_common::QubitId;
use std::collections::HashMap;

/// Two writes to the same bias/coupler/spin agree if they're within this
/// tolerance (floating-point gadget arithmetic, not user-facing rounding).
const MERGE_EPS: f64 = 1e-9;

/// An Ising model: `H = Σ h_i s_i + Σ J_ij s_i s_j`, assembled gadget by
/// gadget. Every write is checked against any prior write to the same
/// qubit/coupler/spin; disagreement is a fatal gadget conflict naming both
/// origins.
#[derive(Debug, Clone, Default)]
pub struct IsingModel {
    bias_order: Vec<QubitId>,
    biases: HashMap<QubitId, (f64, String)>,
    ground: HashMap<QubitId, (i8, String)>,
    couplers: HashMap<(u32, u32), (f64, String)>,
}

fn canonical_key(a: QubitId, b: QubitId) -> (u32, u32) {
    let (ra, rb) = (a.as_raw(), b.as_raw());
    if ra <= rb {
        (ra, rb)
    } else {
        (rb, ra)
    }
}

impl IsingModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a qubit's linear bias, merge-checking against any prior write.
    pub fn write_bias(
        &mut self,
        qubit: QubitId,
        value: f64,
        origin: impl Into<String>,
    ) -> Result<(), GenError> {
        let origin = origin.into();
        if let Some((existing, existing_origin)) = self.biases.get(&qubit) {
            if (existing - value).abs() > MERGE_EPS {
                return Err(GenError::QubitBiasConflict {
                    qubit: qubit.as_raw(),
                    first: *existing,
                    first_origin: existing_origin.clone(),
                    second: value,
                    second_origin: origin,
                });
            }
            return Ok(());
        }
        self.bias_order.push(qubit);
        self.biases.insert(qubit, (value, origin));
        Ok(())
    }

    /// Writes a coupler weight between two qubits, canonicalizing the
    /// endpoint order and merge-checking against any prior write.
    pub fn write_coupler(
        &mut self,
        a: QubitId,
        b: QubitId,
        value: f64,
        origin: impl Into<String>,
    ) -> Result<(), GenError> {
        let origin = origin.into();
        let key = canonical_key(a, b);
        if let Some((existing, existing_origin)) = self.couplers.get(&key) {
            if (existing - value).abs() > MERGE_EPS {
                return Err(GenError::CouplerConflict {
                    a: key.0,
                    b: key.1,
                    first: *existing,
                    first_origin: existing_origin.clone(),
                    second: value,
                    second_origin: origin,
                });
            }
            return Ok(());
        }
        self.couplers.insert(key, (value, origin));
        Ok(())
    }

    /// Writes a qubit's expected ground-state spin (`+1`/`-1`), merge-checked.
    pub fn write_ground_spin(
        &mut self,
        qubit: QubitId,
        spin: i8,
        origin: impl Into<String>,
    ) -> Result<(), GenError> {
        let origin = origin.into();
        if let Some((existing, existing_origin)) = self.ground.get(&qubit) {
            if *existing != spin {
                return Err(GenError::GroundSpinConflict {
                    qubit: qubit.as_raw(),
                    first: *existing,
                    first_origin: existing_origin.clone(),
                    second: spin,
                    second_origin: origin,
                });
            }
            return Ok(());
        }
        self.ground.insert(qubit, (spin, origin));
        Ok(())
    }

    /// Qubit bias lines, `(qubit, h)`, in the order each qubit was first written.
    pub fn bias_lines(&self) -> Vec<(QubitId, f64)> {
        self.bias_order
            .iter()
            .map(|&q| (q, self.biases[&q].0))
            .collect()
    }

    /// Coupler lines, `((a,b), J)`, sorted by canonical `(min,max)` order.
    pub fn coupler_lines(&self) -> Vec<((u32, u32), f64)> {
        let mut lines: Vec<((u32, u32), f64)> =
            self.couplers.iter().map(|(&k, &(v, _))| (k, v)).collect();
        lines.sort_by_key(|&(k, _)| k);
        lines
    }

    /// Total number of data lines (biases + couplers) the config body holds.
    pub fn line_count(&self) -> usize {
        self.bias_order.len() + self.couplers.len()
    }

    /// The expected ground configuration's energy, `Σ h_i s_i + Σ J_ij s_i s_j`.
    pub fn ground_energy(&self) -> f64 {
        let mut energy = 0.0;
        for (&qubit, &(h, _)) in &self.biases {
            if let Some(&(s, _)) = self.ground.get(&qubit) {
                energy += h * s as f64;
            }
        }
        for (&(a, b), &(j, _)) in &self.couplers {
            let sa = self.spin_of(a);
            let sb = self.spin_of(b);
            energy += j * sa * sb;
        }
        energy
    }

    fn spin_of(&self, raw: u32) -> f64 {
        self.ground
            .get(&QubitId::from_raw(raw))
            .map(|&(s, _)| s as f64)
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agreeing_writes_are_silently_merged() {
        let mut m = IsingModel::new();
        m.write_bias(QubitId::from_raw(0), 0.5, "a").unwrap();
        m.write_bias(QubitId::from_raw(0), 0.5 + 1e-12, "b").unwrap();
        assert_eq!(m.bias_lines().len(), 1);
    }

    #[test]
    fn disagreeing_bias_writes_conflict() {
        let mut m = IsingModel::new();
        m.write_bias(QubitId::from_raw(0), 0.5, "a").unwrap();
        let err = m.write_bias(QubitId::from_raw(0), -0.5, "b").unwrap_err();
        assert!(matches!(err, GenError::QubitBiasConflict { .. }));
    }

    #[test]
    fn coupler_writes_canonicalize_endpoint_order() {
        let mut m = IsingModel::new();
        m.write_coupler(QubitId::from_raw(5), QubitId::from_raw(2), -1.0, "a")
            .unwrap();
        m.write_coupler(QubitId::from_raw(2), QubitId::from_raw(5), -1.0, "b")
            .unwrap();
        assert_eq!(m.coupler_lines(), vec![((2, 5), -1.0)]);
    }

    #[test]
    fn bias_lines_preserve_insertion_order() {
        let mut m = IsingModel::new();
        m.write_bias(QubitId::from_raw(9), 1.0, "a").unwrap();
        m.write_bias(QubitId::from_raw(3), 2.0, "b").unwrap();
        let lines = m.bias_lines();
        assert_eq!(lines[0].0, QubitId::from_raw(9));
        assert_eq!(lines[1].0, QubitId::from_raw(3));
    }

    #[test]
    fn ground_energy_sums_bias_and_coupler_terms() {
        let mut m = IsingModel::new();
        m.write_bias(QubitId::from_raw(0), 2.0, "a").unwrap();
        m.write_ground_spin(QubitId::from_raw(0), 1, "a").unwrap();
        m.write_bias(QubitId::from_raw(1), -1.0, "b").unwrap();
        m.write_ground_spin(QubitId::from_raw(1), -1, "b").unwrap();
        m.write_coupler(QubitId::from_raw(0), QubitId::from_raw(1), -1.0, "c")
            .unwrap();
        // h0*s0 + h1*s1 + J*s0*s1 = 2*1 + (-1)*(-1) + (-1)*1*(-1) = 2 + 1 + 1 = 4
        assert_eq!(m.ground_energy(), 4.0);
    }
}
