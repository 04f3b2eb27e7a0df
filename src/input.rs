//! Client-side input formatting and validation.
//!
//! The sanitizers mirror what the page does on every keystroke: strip
//! non-digits and truncate.  The validators carry the server's range rules
//! so a form can be rejected before it is submitted.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Digits kept in a mobile number.
pub const MOBILE_DIGITS: usize = 10;

/// Digits kept in an Indian postal pincode.
pub const PINCODE_DIGITS: usize = 6;

/// Keep only ASCII digits, truncated to `max`.
pub fn digits_only(raw: &str, max: usize) -> String {
    raw.chars().filter(char::is_ascii_digit).take(max).collect()
}

pub fn sanitize_mobile(raw: &str) -> String {
    digits_only(raw, MOBILE_DIGITS)
}

pub fn sanitize_pincode(raw: &str) -> String {
    digits_only(raw, PINCODE_DIGITS)
}

/// Password confirmation check.
pub fn confirm_password(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if password == confirmation {
        Ok(())
    } else {
        Err(ValidationError::PasswordMismatch)
    }
}

/// A manual weather entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temperature_c: f64,
    pub humidity_percent: f64,
    pub rainfall_mm: f64,
}

impl WeatherReading {
    /// Temperature −50–50 °C, humidity 0–100 %, rainfall ≥ 0.  NaN fails.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(-50.0..=50.0).contains(&self.temperature_c) {
            return Err(ValidationError::AirTemperatureOutOfRange);
        }
        if !(0.0..=100.0).contains(&self.humidity_percent) {
            return Err(ValidationError::HumidityOutOfRange);
        }
        if self.rainfall_mm.is_nan() {
            return Err(ValidationError::RainfallNotANumber);
        }
        if self.rainfall_mm < 0.0 {
            return Err(ValidationError::NegativeRainfall);
        }
        Ok(())
    }
}
