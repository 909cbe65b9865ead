//! Semantic unit types for the fixed weather inputs of a run
//!
//! Newtype wrappers keep temperature, humidity and wind speed from being mixed
//! up at call sites. Each wraps an `f32`, derefs to it, and orders totally
//! (NaN sorts above every other value).
//!
//! # Usage
//! ```
//! use fire_grid_core::core_types::units::{Fahrenheit, MilesPerHour, Percent};
//!
//! let temp = Fahrenheit::new(70.0);
//! assert_eq!(*temp, 70.0);
//! assert!((Percent::new(30.0).to_fraction() - 0.3).abs() < 1e-6);
//! assert!(MilesPerHour::new(8.0) < MilesPerHour::new(12.0));
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;

/// Compare f32 values with total ordering
#[inline]
fn f32_total_cmp(a: f32, b: f32) -> Ordering {
    a.total_cmp(&b)
}

// ============================================================================
// TEMPERATURE
// ============================================================================

/// Air temperature in degrees Fahrenheit
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Fahrenheit(f32);

impl Eq for Fahrenheit {}

impl PartialOrd for Fahrenheit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fahrenheit {
    fn cmp(&self, other: &Self) -> Ordering {
        f32_total_cmp(self.0, other.0)
    }
}

impl Deref for Fahrenheit {
    type Target = f32;
    #[inline]
    fn deref(&self) -> &f32 {
        &self.0
    }
}

impl Fahrenheit {
    /// Coldest temperature accepted by an [`Environment`](crate::Environment)
    pub const MIN: Fahrenheit = Fahrenheit(32.0);

    /// Hottest temperature accepted by an [`Environment`](crate::Environment)
    pub const MAX: Fahrenheit = Fahrenheit(100.0);

    /// Create a new temperature
    #[inline]
    #[must_use]
    pub const fn new(value: f32) -> Self {
        Fahrenheit(value)
    }

    /// Get the raw f32 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl From<f32> for Fahrenheit {
    fn from(v: f32) -> Self {
        Fahrenheit(v)
    }
}

impl fmt::Display for Fahrenheit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°F", self.0)
    }
}

// ============================================================================
// HUMIDITY
// ============================================================================

/// A percentage (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Percent(f32);

impl Eq for Percent {}

impl PartialOrd for Percent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Percent {
    fn cmp(&self, other: &Self) -> Ordering {
        f32_total_cmp(self.0, other.0)
    }
}

impl Deref for Percent {
    type Target = f32;
    #[inline]
    fn deref(&self) -> &f32 {
        &self.0
    }
}

impl Percent {
    /// Create a new percentage
    #[inline]
    #[must_use]
    pub const fn new(value: f32) -> Self {
        Percent(value)
    }

    /// Get the raw f32 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Convert to fraction (0-1)
    #[inline]
    #[must_use]
    pub fn to_fraction(self) -> f32 {
        self.0 / 100.0
    }
}

impl From<f32> for Percent {
    fn from(v: f32) -> Self {
        Percent(v)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

// ============================================================================
// WIND SPEED
// ============================================================================

/// Wind speed in miles per hour
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct MilesPerHour(f32);

impl Eq for MilesPerHour {}

impl PartialOrd for MilesPerHour {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MilesPerHour {
    fn cmp(&self, other: &Self) -> Ordering {
        f32_total_cmp(self.0, other.0)
    }
}

impl Deref for MilesPerHour {
    type Target = f32;
    #[inline]
    fn deref(&self) -> &f32 {
        &self.0
    }
}

impl MilesPerHour {
    /// Dead calm
    pub const CALM: MilesPerHour = MilesPerHour(0.0);

    /// Create a new wind speed
    #[inline]
    #[must_use]
    pub const fn new(value: f32) -> Self {
        MilesPerHour(value)
    }

    /// Get the raw f32 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl From<f32> for MilesPerHour {
    fn from(v: f32) -> Self {
        MilesPerHour(v)
    }
}

impl fmt::Display for MilesPerHour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} mph", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_ordering_handles_nan() {
        let nan = Percent::new(f32::NAN);
        assert!(nan > Percent::new(100.0));
        assert_eq!(
            Fahrenheit::new(40.0).max(Fahrenheit::new(90.0)),
            Fahrenheit::new(90.0)
        );
    }

    #[test]
    fn test_serde_is_transparent() {
        let json = serde_json::to_string(&MilesPerHour::new(12.5)).unwrap();
        assert_eq!(json, "12.5");
        let back: Percent = serde_json::from_str("30.0").unwrap();
        assert_eq!(back, Percent::new(30.0));
    }
}
