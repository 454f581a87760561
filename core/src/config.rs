use crate::{
    channel::{ChannelAlphabet, DEFAULT_CHANNELS},
    error::{PlanError, PlanResult},
    interference::{InterferenceModel, INTERFERENCE_RADIUS},
    placement::PlacementParams,
    types::DomainBounds,
};
use serde::{Deserialize, Serialize};

/// Hotspots placed by a default run.
pub const DEFAULT_TARGET_COUNT: usize = 1000;

/// Minimum separation between placed hotspots.
pub const DEFAULT_MIN_DISTANCE: f64 = 50.0;

/// Sweeps allowed when optimising until nothing changes.
pub const DEFAULT_MAX_PASSES: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    pub seed: u64,
    pub target_count: usize,
    pub min_distance: f64,
    pub bounds: DomainBounds,
    /// Channel symbols in optimiser trial order.
    pub channels: Vec<String>,
    pub interference_radius: f64,
    pub max_consecutive_rejections: Option<u64>,
    pub max_passes: usize,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            target_count: DEFAULT_TARGET_COUNT,
            min_distance: DEFAULT_MIN_DISTANCE,
            bounds: DomainBounds::default(),
            channels: DEFAULT_CHANNELS.iter().map(|s| s.to_string()).collect(),
            interference_radius: INTERFERENCE_RADIUS,
            max_consecutive_rejections: None,
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

impl PlanConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    /// In tests, use PlanConfig::default_test().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: PlanConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Small, fast configuration for unit and integration tests.
    pub fn default_test() -> Self {
        Self {
            seed: 0xC0FF_EE00,
            target_count: 60,
            min_distance: 50.0,
            bounds: DomainBounds::square(1, 1500),
            max_passes: 10,
            ..Self::default()
        }
    }

    pub fn alphabet(&self) -> PlanResult<ChannelAlphabet> {
        ChannelAlphabet::new(self.channels.iter().cloned())
    }

    pub fn placement_params(&self) -> PlacementParams {
        PlacementParams {
            target_count: self.target_count,
            min_distance: self.min_distance,
            bounds: self.bounds,
            max_consecutive_rejections: self.max_consecutive_rejections,
        }
    }

    pub fn model(&self) -> InterferenceModel {
        InterferenceModel::new(self.interference_radius)
    }

    pub fn validate(&self) -> PlanResult<()> {
        self.alphabet()?;
        self.placement_params().validate()?;
        if !self.interference_radius.is_finite() || self.interference_radius < 0.0 {
            return Err(PlanError::InvalidConfiguration(format!(
                "interference_radius must be a non-negative number, got {}",
                self.interference_radius
            )));
        }
        if self.max_passes == 0 {
            return Err(PlanError::InvalidConfiguration(
                "max_passes must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_deployment() {
        let config = PlanConfig::default();
        assert_eq!(config.target_count, 1000);
        assert_eq!(config.min_distance, 50.0);
        assert_eq!(config.bounds, DomainBounds::square(1, 5000));
        assert_eq!(config.interference_radius, 275.0);
        assert_eq!(config.alphabet().unwrap().len(), 5);
        config.validate().unwrap();
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config: PlanConfig =
            serde_json::from_str(r#"{ "seed": 7, "channels": ["X", "Y"] }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.channels, vec!["X", "Y"]);
        assert_eq!(config.target_count, DEFAULT_TARGET_COUNT);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut config = PlanConfig::default_test();
        config.channels.clear();
        assert!(matches!(config.validate(), Err(PlanError::InvalidConfiguration(_))));

        let mut config = PlanConfig::default_test();
        config.min_distance = 0.0;
        assert!(matches!(config.validate(), Err(PlanError::InvalidConfiguration(_))));

        let mut config = PlanConfig::default_test();
        config.bounds = DomainBounds::square(10, 10);
        assert!(matches!(config.validate(), Err(PlanError::InvalidConfiguration(_))));

        let mut config = PlanConfig::default_test();
        config.bounds = DomainBounds { x_min: i64::MIN, x_max: i64::MAX, y_min: 1, y_max: 100 };
        assert!(matches!(config.validate(), Err(PlanError::InvalidConfiguration(_))));

        let mut config = PlanConfig::default_test();
        config.target_count = 0;
        assert!(matches!(config.validate(), Err(PlanError::InvalidConfiguration(_))));
    }
}
