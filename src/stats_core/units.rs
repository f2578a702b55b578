//! Concrete quantity kinds for common weather observations

use serde::{Deserialize, Serialize};

use super::quantity::{Quantity, QuantityError};

/// Units of rainfall depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RainfallUnit {
    Millimeters,
    Inches,
}

const MILLIMETERS_PER_INCH: f64 = 25.4;

/// Accumulated rainfall depth, stored canonically in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Rainfall {
    millimeters: f64,
}

impl Rainfall {
    pub fn millimeters(depth: f64) -> Self {
        Self { millimeters: depth }
    }

    pub fn inches(depth: f64) -> Self {
        Self {
            millimeters: depth * MILLIMETERS_PER_INCH,
        }
    }

    pub fn as_millimeters(&self) -> f64 {
        self.millimeters
    }
}

impl Quantity for Rainfall {
    type Unit = RainfallUnit;

    fn canonical_unit() -> RainfallUnit {
        RainfallUnit::Millimeters
    }

    fn magnitude_in(&self, unit: RainfallUnit) -> f64 {
        match unit {
            RainfallUnit::Millimeters => self.millimeters,
            RainfallUnit::Inches => self.millimeters / MILLIMETERS_PER_INCH,
        }
    }

    fn from_magnitude(magnitude: f64, unit: RainfallUnit) -> Result<Self, QuantityError> {
        if !magnitude.is_finite() {
            return Err(QuantityError::InvalidMagnitude(magnitude));
        }
        Ok(match unit {
            RainfallUnit::Millimeters => Rainfall::millimeters(magnitude),
            RainfallUnit::Inches => Rainfall::inches(magnitude),
        })
    }

    fn zero() -> Self {
        Rainfall::millimeters(0.0)
    }

    fn subtract(&self, other: &Self) -> Self {
        Rainfall::millimeters(self.millimeters - other.millimeters)
    }
}

/// Units of temperature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

/// Air temperature, stored canonically in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Temperature {
    degrees_celsius: f64,
}

impl Temperature {
    pub fn celsius(degrees: f64) -> Self {
        Self {
            degrees_celsius: degrees,
        }
    }

    pub fn fahrenheit(degrees: f64) -> Self {
        Self {
            degrees_celsius: (degrees - 32.0) * 5.0 / 9.0,
        }
    }

    pub fn as_celsius(&self) -> f64 {
        self.degrees_celsius
    }
}

impl Quantity for Temperature {
    type Unit = TemperatureUnit;

    fn canonical_unit() -> TemperatureUnit {
        TemperatureUnit::Celsius
    }

    fn magnitude_in(&self, unit: TemperatureUnit) -> f64 {
        match unit {
            TemperatureUnit::Celsius => self.degrees_celsius,
            TemperatureUnit::Fahrenheit => self.degrees_celsius * 9.0 / 5.0 + 32.0,
        }
    }

    fn from_magnitude(magnitude: f64, unit: TemperatureUnit) -> Result<Self, QuantityError> {
        if !magnitude.is_finite() {
            return Err(QuantityError::InvalidMagnitude(magnitude));
        }
        Ok(match unit {
            TemperatureUnit::Celsius => Temperature::celsius(magnitude),
            TemperatureUnit::Fahrenheit => Temperature::fahrenheit(magnitude),
        })
    }

    fn zero() -> Self {
        Temperature::celsius(0.0)
    }

    /// Difference in degrees, expressed as a Celsius delta
    fn subtract(&self, other: &Self) -> Self {
        Temperature::celsius(self.degrees_celsius - other.degrees_celsius)
    }
}
