//! Nets: one source pin driving one or more sink pins.

use crate::ids::{NetId, PinId};
use serde::{Deserialize, Serialize};

/// A net: exactly one source pin and one or more sink pins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Net {
    /// The unique ID of this net.
    pub id: NetId,
    /// Human-readable net name.
    pub name: String,
    /// The driving (source) pin.
    pub source: PinId,
    /// The driven (sink) pins.
    pub sinks: Vec<PinId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction() {
        let net = Net {
            id: NetId::from_raw(0),
            name: "n0".into(),
            source: PinId::from_raw(0),
            sinks: vec![PinId::from_raw(1), PinId::from_raw(2)],
        };
        assert_eq!(net.sinks.len(), 2);
    }
}
