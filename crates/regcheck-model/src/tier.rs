use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Confidence tier of a match.
///
/// Ordered by confidence: `Sin < Revisar < Alta`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    /// No usable match.
    Sin,
    /// Needs human review.
    Revisar,
    /// High confidence.
    Alta,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alta => "ALTA",
            Self::Revisar => "REVISAR",
            Self::Sin => "SIN",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two tier cut-offs. `score >= alta` is ALTA, `baja <= score < alta`
/// is REVISAR, anything lower is SIN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub alta: f64,
    pub baja: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            alta: 0.85,
            baja: 0.65,
        }
    }
}

impl Thresholds {
    pub fn new(alta: f64, baja: f64) -> Result<Self, ModelError> {
        let thresholds = Self { alta, baja };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        let Self { alta, baja } = *self;
        if !(alta.is_finite() && baja.is_finite()) || !(0.0 <= baja && baja < alta && alta <= 1.0)
        {
            return Err(ModelError::InvalidThresholds { alta, baja });
        }
        Ok(())
    }

    pub fn classify(&self, score: f64) -> Tier {
        if score >= self.alta {
            Tier::Alta
        } else if score >= self.baja {
            Tier::Revisar
        } else {
            Tier::Sin
        }
    }
}
