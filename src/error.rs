//! Unified error types for the KrishiMitra dashboard client.
//!
//! A single [`Error`] enum that every subsystem converts into, so the
//! runner's top-level handling stays uniform.  The poll/refresh workflow
//! never propagates [`FetchError`] upward: it is converted into a
//! notification or a log line at the call site.

use core::fmt;

use crate::app::ports::ConfigError;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An HTTP request to the dashboard server failed.
    Fetch(FetchError),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
    /// A form value failed range or consistency validation.
    Validation(ValidationError),
    /// A value could not be formatted for display.
    Format(FormatError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch(e) => write!(f, "fetch: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Validation(e) => write!(f, "validation: {e}"),
            Self::Format(e) => write!(f, "format: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Fetch errors
// ---------------------------------------------------------------------------

/// The two failure kinds of a dashboard request.
///
/// No distinction is made between transient and permanent failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Network, DNS, TLS or body-read failure.
    Transport(String),
    /// The server answered outside the 2xx range.
    Status(u16),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "transport failure: {msg}"),
            Self::Status(code) => write!(f, "HTTP status {code}"),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<FetchError> for Error {
    fn from(e: FetchError) -> Self {
        Self::Fetch(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Validation errors
// ---------------------------------------------------------------------------

/// Form validation failures.  `Display` yields the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    PhOutOfRange,
    MoistureOutOfRange,
    NitrogenOutOfRange,
    PhosphorusOutOfRange,
    PotassiumOutOfRange,
    /// Soil temperature outside −10–50 °C.
    SoilTemperatureOutOfRange,
    SoilTypeMissing,
    /// Air temperature outside −50–50 °C.
    AirTemperatureOutOfRange,
    HumidityOutOfRange,
    NegativeRainfall,
    RainfallNotANumber,
    PasswordMismatch,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::PhOutOfRange => "pH value must be between 0 and 14!",
            Self::MoistureOutOfRange => "Moisture level must be between 0 and 100%!",
            Self::NitrogenOutOfRange => "Nitrogen level must be between 0 and 1000 ppm!",
            Self::PhosphorusOutOfRange => "Phosphorus level must be between 0 and 1000 ppm!",
            Self::PotassiumOutOfRange => "Potassium level must be between 0 and 1000 ppm!",
            Self::SoilTemperatureOutOfRange => "Temperature must be between -10\u{00b0}C and 50\u{00b0}C!",
            Self::SoilTypeMissing => "Please select a soil type!",
            Self::AirTemperatureOutOfRange => "Temperature must be between -50\u{00b0}C and 50\u{00b0}C!",
            Self::HumidityOutOfRange => "Humidity must be between 0 and 100%!",
            Self::NegativeRainfall => "Rainfall cannot be negative!",
            Self::RainfallNotANumber => "Rainfall must be a number!",
            Self::PasswordMismatch => "Passwords do not match",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

// ---------------------------------------------------------------------------
// Format errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The input string is not a recognised date or date-time.
    InvalidDate(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDate(raw) => write!(f, "invalid date: {raw:?}"),
        }
    }
}

impl std::error::Error for FormatError {}

impl From<FormatError> for Error {
    fn from(e: FormatError) -> Self {
        Self::Format(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
