//! Session configuration: fabric dimensions and the placer's seed.
//!
//! There is no CLI command to load the fabric (spec §6.1's five commands
//! have no such entry), so these are supplied once, up front, as flags on
//! the `qpar` binary invocation itself — not a project file — and the
//! fabric is built at startup, the way `init_system` expects it to already
//! be "loaded" by the time it runs.

use clap::Args;

/// Fabric/placement configuration, parsed as top-level flags on `qpar`
/// (not a `qpar.toml` project file — there is no multi-target project
/// model here).
#[derive(Debug, Clone, Args)]
pub struct QparConfig {
    /// Number of Chimera cells along X.
    #[arg(long, default_value_t = 16)]
    pub x_cells: u32,
    /// Number of Chimera cells along Y.
    #[arg(long, default_value_t = 16)]
    pub y_cells: u32,
    /// Seed for the placer's PRNG (spec §5: deterministic given a seed).
    #[arg(long, default_value_t = 1)]
    pub seed: u64,
}

impl Default for QparConfig {
    fn default() -> Self {
        // 16x16x8 = 2048 qubits, the Chimera size spec §6.3 cites as its
        // own worked example.
        Self {
            x_cells: 16,
            y_cells: 16,
            seed: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        config: QparConfig,
    }

    #[test]
    fn defaults_match_chimera_example() {
        let config = QparConfig::default();
        assert_eq!(config.x_cells, 16);
        assert_eq!(config.y_cells, 16);
        assert_eq!(config.x_cells * config.y_cells * 8, 2048);
    }

    #[test]
    fn parses_overrides_from_flags() {
        let harness = Harness::parse_from(["qpar", "--x-cells", "2", "--y-cells", "2"]);
        assert_eq!(harness.config.x_cells, 2);
        assert_eq!(harness.config.y_cells, 2);
        assert_eq!(harness.config.seed, 1);
    }

    #[test]
    fn zero_cells_is_a_valid_empty_fabric() {
        let harness = Harness::parse_from(["qpar", "--x-cells", "0", "--y-cells", "0"]);
        assert_eq!(harness.config.x_cells, 0);
    }
}
