//! Placement/routing elements: movable gates and fixed model-pin boundaries.

use crate::ids::{ElementId, GateId, PinId};
use qpar_common::Checkpoint;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What an element represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    /// A movable gate instance.
    Gate(GateId),
    /// A fixed, non-movable model-pin boundary.
    ModelPin(PinId),
}

/// A grid cell coordinate, or `None` before placement.
pub type Placement = Option<(i64, i64)>;

/// A placement/routing element: one per gate (movable) or per model pin
/// (fixed boundary).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    /// The unique ID of this element.
    pub id: ElementId,
    /// Human-readable element name.
    pub name: String,
    /// What this element represents.
    pub kind: ElementKind,
    /// Whether the placer may move this element.
    pub movable: bool,
    /// Current grid cell, checkpointed for placer save/restore.
    #[serde(skip)]
    pub placement: Checkpoint<Placement>,
    /// Which fabric-cell local (`0..4`) each of this element's pins occupies.
    pub pin_locals: HashMap<PinId, u32>,
}

impl Element {
    /// Creates a new, unplaced element.
    pub fn new(id: ElementId, name: impl Into<String>, kind: ElementKind, movable: bool) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            movable,
            placement: Checkpoint::new(None),
            pin_locals: HashMap::new(),
        }
    }

    /// Assigns the local index a pin enters its owning cell at.
    pub fn assign_pin_local(&mut self, pin: PinId, local: u32) {
        self.pin_locals.insert(pin, local);
    }

    /// The local index previously assigned to a pin, if any.
    pub fn pin_local(&self, pin: PinId) -> Option<u32> {
        self.pin_locals.get(&pin).copied()
    }
}
