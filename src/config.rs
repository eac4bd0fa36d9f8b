use serde::{Deserialize, Serialize};

use crate::decimal::{RoundingMode, RoundingPolicy};
use crate::errors::{LoanError, Result};

/// largest scale a `rust_decimal::Decimal` can carry
const MAX_DECIMAL_SCALE: u32 = 28;

/// amortization engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// rounding applied at every money realization point
    pub rounding: RoundingPolicy,
    /// longest term the engine will replay, `None` for no limit
    #[serde(default)]
    pub max_term_months: Option<u32>,
}

impl EngineConfig {
    /// cent rounding, half up, no term limit
    pub fn standard() -> Self {
        Self {
            rounding: RoundingPolicy::CENTS,
            max_term_months: None,
        }
    }

    /// cents with banker's rounding
    pub fn bankers_rounding() -> Self {
        Self {
            rounding: RoundingPolicy::new(2, RoundingMode::HalfEven),
            max_term_months: None,
        }
    }

    /// standard rounding capped at a 50 year term
    pub fn consumer() -> Self {
        Self {
            rounding: RoundingPolicy::CENTS,
            max_term_months: Some(600),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| LoanError::InvalidConfiguration {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| LoanError::InvalidConfiguration {
            message: e.to_string(),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.rounding.scale > MAX_DECIMAL_SCALE {
            return Err(LoanError::InvalidConfiguration {
                message: format!(
                    "rounding scale {} exceeds decimal precision of {}",
                    self.rounding.scale, MAX_DECIMAL_SCALE
                ),
            });
        }
        if self.max_term_months == Some(0) {
            return Err(LoanError::InvalidConfiguration {
                message: "max_term_months must be positive".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::standard()
    }
}
