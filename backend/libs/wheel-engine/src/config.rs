use crate::error::{Result, WheelError};
use crate::models::BiasMode;
use crate::session::DEFAULT_SPIN_DURATION_MS;
use serde::Deserialize;
use tracing::warn;

pub const ENV_PREFIX: &str = "WHEEL_";

/// Wheel settings read from `WHEEL_*` environment variables
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WheelConfig {
    /// WHEEL_DEFAULT_BIAS_MODE: none | rating | date
    #[serde(default)]
    pub default_bias_mode: BiasMode,
    /// WHEEL_SPIN_DURATION_MS: animation length handed to the presentation layer
    #[serde(default = "default_spin_duration_ms")]
    pub spin_duration_ms: u64,
    /// WHEEL_RNG_SEED: fixed seed for reproducible draws
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

fn default_spin_duration_ms() -> u64 {
    DEFAULT_SPIN_DURATION_MS
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            default_bias_mode: BiasMode::None,
            spin_duration_ms: DEFAULT_SPIN_DURATION_MS,
            rng_seed: None,
        }
    }
}

impl WheelConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = envy::prefixed(ENV_PREFIX)
            .from_env::<WheelConfig>()
            .map_err(|e| WheelError::Config(e.to_string()))?;

        if config.spin_duration_ms == 0 {
            warn!("WHEEL_SPIN_DURATION_MS is 0, the wheel will stop instantly");
        }

        Ok(config)
    }
}
