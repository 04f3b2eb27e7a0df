//! Soil status evaluator.
//!
//! [`assess`] maps a [`SoilSample`] to one categorical status per metric
//! plus an ordered list of recommendations.
//!
//! ## Threshold rules
//!
//! | metric     | low    | high   | low status | high status | normal     |
//! |------------|--------|--------|------------|-------------|------------|
//! | pH         | < 6.0  | > 7.5  | Acidic     | Alkaline    | Optimal    |
//! | moisture   | < 50   | > 80   | Low        | High        | Adequate   |
//! | nitrogen   | < 20   | —      | Deficient  | —           | Sufficient |
//! | phosphorus | < 15   | —      | Deficient  | —           | Sufficient |
//! | potassium  | < 20   | —      | Deficient  | —           | Sufficient |
//!
//! Each metric is evaluated independently with strict comparisons, so the
//! boundary values themselves are normal.  Recommendations are appended in
//! the fixed order pH, moisture, nitrogen, phosphorus, potassium.
//!
//! A NaN reading fails every comparison and therefore reports the normal
//! status.  Callers that want to reject such input run
//! [`SoilSample::validate`] first.

use core::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// ── Thresholds ────────────────────────────────────────────────

pub const PH_ACIDIC_BELOW: f64 = 6.0;
pub const PH_ALKALINE_ABOVE: f64 = 7.5;
pub const MOISTURE_LOW_BELOW: f64 = 50.0;
pub const MOISTURE_HIGH_ABOVE: f64 = 80.0;
pub const NITROGEN_DEFICIENT_BELOW: f64 = 20.0;
pub const PHOSPHORUS_DEFICIENT_BELOW: f64 = 15.0;
pub const POTASSIUM_DEFICIENT_BELOW: f64 = 20.0;

// ── Recommendations ───────────────────────────────────────────

pub const ADD_LIME: &str = "Add lime to increase pH";
pub const ADD_SULFUR: &str = "Add sulfur to decrease pH";
pub const INCREASE_IRRIGATION: &str = "Increase irrigation frequency";
pub const IMPROVE_DRAINAGE: &str = "Improve drainage";
pub const APPLY_NITROGEN: &str = "Apply nitrogen-rich fertilizer";
pub const APPLY_PHOSPHORUS: &str = "Apply phosphorus-rich fertilizer";
pub const APPLY_POTASSIUM: &str = "Apply potassium-rich fertilizer";

// ── Input ─────────────────────────────────────────────────────

/// One soil measurement.  Moisture is a percentage; nutrients are ppm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilSample {
    pub ph: f64,
    pub moisture: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
}

impl SoilSample {
    /// Range-check every field (pH 0–14, moisture 0–100, NPK 0–1000).
    /// NaN is out of range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check(self.ph, 0.0, 14.0, ValidationError::PhOutOfRange)?;
        check(self.moisture, 0.0, 100.0, ValidationError::MoistureOutOfRange)?;
        check(self.nitrogen, 0.0, 1000.0, ValidationError::NitrogenOutOfRange)?;
        check(self.phosphorus, 0.0, 1000.0, ValidationError::PhosphorusOutOfRange)?;
        check(self.potassium, 0.0, 1000.0, ValidationError::PotassiumOutOfRange)?;
        Ok(())
    }
}

/// A full soil form entry: the sample plus temperature and soil type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilReading {
    #[serde(flatten)]
    pub sample: SoilSample,
    pub temperature_c: f64,
    pub soil_type: String,
}

impl SoilReading {
    /// Validate in form order: sample fields, temperature (−10–50 °C),
    /// then a non-blank soil type.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.sample.validate()?;
        check(
            self.temperature_c,
            -10.0,
            50.0,
            ValidationError::SoilTemperatureOutOfRange,
        )?;
        if self.soil_type.trim().is_empty() {
            return Err(ValidationError::SoilTypeMissing);
        }
        Ok(())
    }
}

fn check(value: f64, min: f64, max: f64, err: ValidationError) -> Result<(), ValidationError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(err)
    }
}

// ── Output ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PhStatus {
    #[default]
    Optimal,
    Acidic,
    Alkaline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MoistureStatus {
    #[default]
    Adequate,
    Low,
    High,
}

/// Status shared by nitrogen, phosphorus and potassium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NutrientStatus {
    #[default]
    Sufficient,
    Deficient,
}

impl fmt::Display for PhStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Optimal => write!(f, "Optimal"),
            Self::Acidic => write!(f, "Acidic"),
            Self::Alkaline => write!(f, "Alkaline"),
        }
    }
}

impl fmt::Display for MoistureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Adequate => write!(f, "Adequate"),
            Self::Low => write!(f, "Low"),
            Self::High => write!(f, "High"),
        }
    }
}

impl fmt::Display for NutrientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sufficient => write!(f, "Sufficient"),
            Self::Deficient => write!(f, "Deficient"),
        }
    }
}

/// Result of [`assess`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SoilAssessment {
    pub ph_status: PhStatus,
    pub moisture_status: MoistureStatus,
    pub nitrogen_status: NutrientStatus,
    pub phosphorus_status: NutrientStatus,
    pub potassium_status: NutrientStatus,
    pub recommendations: Vec<String>,
}

impl SoilAssessment {
    /// True if every metric reports its normal status.
    pub fn is_all_normal(&self) -> bool {
        self.ph_status == PhStatus::Optimal
            && self.moisture_status == MoistureStatus::Adequate
            && self.nitrogen_status == NutrientStatus::Sufficient
            && self.phosphorus_status == NutrientStatus::Sufficient
            && self.potassium_status == NutrientStatus::Sufficient
    }

    /// True if there is at least one recommendation.
    pub fn needs_attention(&self) -> bool {
        !self.recommendations.is_empty()
    }
}

// ── Evaluator ─────────────────────────────────────────────────

/// Interpret a soil sample.  Total and side-effect free apart from
/// debug logging.
pub fn assess(sample: &SoilSample) -> SoilAssessment {
    let mut out = SoilAssessment::default();

    // ── pH ────────────────────────────────────────────────────
    if sample.ph < PH_ACIDIC_BELOW {
        out.ph_status = PhStatus::Acidic;
        recommend(&mut out, "ph", sample.ph, ADD_LIME);
    } else if sample.ph > PH_ALKALINE_ABOVE {
        out.ph_status = PhStatus::Alkaline;
        recommend(&mut out, "ph", sample.ph, ADD_SULFUR);
    }

    // ── Moisture ──────────────────────────────────────────────
    if sample.moisture < MOISTURE_LOW_BELOW {
        out.moisture_status = MoistureStatus::Low;
        recommend(&mut out, "moisture", sample.moisture, INCREASE_IRRIGATION);
    } else if sample.moisture > MOISTURE_HIGH_ABOVE {
        out.moisture_status = MoistureStatus::High;
        recommend(&mut out, "moisture", sample.moisture, IMPROVE_DRAINAGE);
    }

    // ── Nutrients ─────────────────────────────────────────────
    if sample.nitrogen < NITROGEN_DEFICIENT_BELOW {
        out.nitrogen_status = NutrientStatus::Deficient;
        recommend(&mut out, "nitrogen", sample.nitrogen, APPLY_NITROGEN);
    }
    if sample.phosphorus < PHOSPHORUS_DEFICIENT_BELOW {
        out.phosphorus_status = NutrientStatus::Deficient;
        recommend(&mut out, "phosphorus", sample.phosphorus, APPLY_PHOSPHORUS);
    }
    if sample.potassium < POTASSIUM_DEFICIENT_BELOW {
        out.potassium_status = NutrientStatus::Deficient;
        recommend(&mut out, "potassium", sample.potassium, APPLY_POTASSIUM);
    }

    out
}

/// Validate, then assess.  Use this where NaN or out-of-range input
/// must be rejected instead of reported as normal.
pub fn assess_checked(sample: &SoilSample) -> crate::error::Result<SoilAssessment> {
    sample.validate()?;
    Ok(assess(sample))
}

fn recommend(out: &mut SoilAssessment, metric: &str, value: f64, text: &str) {
    debug!("soil: {metric}={value} crossed threshold -> {text}");
    out.recommendations.push(text.to_owned());
}
