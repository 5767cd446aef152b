//! Construction-time options and their validated form.

use thiserror::Error;

use crate::input::condition::{self, Condition};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("missing required option `{0}`")]
    MissingField(&'static str),
    #[error("option `{name}` must be finite, got {value}")]
    NotFinite { name: &'static str, value: f64 },
    #[error("option `{name}` = {value} is outside {expected}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },
}

/// Raw options as supplied by the embedding application.
///
/// Every numeric field is required; [`DragShearConfig::try_from`] rejects a
/// missing or out-of-range value instead of deferring the failure to the
/// first drag.
#[derive(Clone, Default)]
pub struct DragShearOptions {
    pub threshold: Option<f64>,
    pub spring_coefficient: Option<f64>,
    pub friction_force: Option<f64>,
    pub min_zoom: Option<f64>,
    pub spring_length: Option<f64>,
    pub hybrid_shearing_radius_px: Option<f64>,
    pub condition: Option<Condition>,
}

impl DragShearOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn threshold(mut self, value: f64) -> Self {
        self.threshold = Some(value);
        self
    }

    pub fn spring_coefficient(mut self, value: f64) -> Self {
        self.spring_coefficient = Some(value);
        self
    }

    pub fn friction_force(mut self, value: f64) -> Self {
        self.friction_force = Some(value);
        self
    }

    pub fn min_zoom(mut self, value: f64) -> Self {
        self.min_zoom = Some(value);
        self
    }

    pub fn spring_length(mut self, value: f64) -> Self {
        self.spring_length = Some(value);
        self
    }

    pub fn hybrid_shearing_radius_px(mut self, value: f64) -> Self {
        self.hybrid_shearing_radius_px = Some(value);
        self
    }

    pub fn condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Activation condition, falling back to "no modifier keys held".
    pub fn condition_or_default(&self) -> Condition {
        self.condition
            .clone()
            .unwrap_or_else(condition::no_modifier_keys)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragShearConfig {
    /// Smallest per-axis change still treated as motion.
    pub threshold: f64,
    pub spring_coefficient: f64,
    /// Fraction of velocity lost per tick, in `[0, 1)`.
    pub friction_force: f64,
    /// Below this zoom the high-elevation pan is pulled back.
    pub min_zoom: f64,
    /// Natural spring length in map units.
    pub spring_length: f64,
    /// Zero disables hybrid shearing.
    pub hybrid_shearing_radius_px: f64,
}

impl DragShearConfig {
    pub fn hybrid_enabled(&self) -> bool {
        self.hybrid_shearing_radius_px > 0.0
    }
}

fn required(value: Option<f64>, name: &'static str) -> Result<f64, ConfigError> {
    let value = value.ok_or(ConfigError::MissingField(name))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NotFinite { name, value })
    }
}

fn non_negative(value: f64, name: &'static str) -> Result<f64, ConfigError> {
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            expected: "[0, inf)",
        })
    }
}

impl TryFrom<&DragShearOptions> for DragShearConfig {
    type Error = ConfigError;

    fn try_from(options: &DragShearOptions) -> Result<Self, Self::Error> {
        let threshold = non_negative(required(options.threshold, "threshold")?, "threshold")?;
        let spring_coefficient = non_negative(
            required(options.spring_coefficient, "spring_coefficient")?,
            "spring_coefficient",
        )?;
        let friction_force = required(options.friction_force, "friction_force")?;
        if !(0.0..1.0).contains(&friction_force) {
            return Err(ConfigError::OutOfRange {
                name: "friction_force",
                value: friction_force,
                expected: "[0, 1)",
            });
        }
        let min_zoom = non_negative(required(options.min_zoom, "min_zoom")?, "min_zoom")?;
        let spring_length = non_negative(
            required(options.spring_length, "spring_length")?,
            "spring_length",
        )?;
        let hybrid_shearing_radius_px = non_negative(
            required(options.hybrid_shearing_radius_px, "hybrid_shearing_radius_px")?,
            "hybrid_shearing_radius_px",
        )?;

        Ok(Self {
            threshold,
            spring_coefficient,
            friction_force,
            min_zoom,
            spring_length,
            hybrid_shearing_radius_px,
        })
    }
}

impl TryFrom<DragShearOptions> for DragShearConfig {
    type Error = ConfigError;

    fn try_from(options: DragShearOptions) -> Result<Self, Self::Error> {
        Self::try_from(&options)
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
