//! Fixed weather snapshot for one simulation run
//!
//! Wind, temperature and humidity do not change while a run is in progress.
//! The engine only ever reads an [`Environment`].

use crate::core_types::coord::Vec2;
use crate::core_types::error::SimError;
use crate::core_types::units::{Fahrenheit, MilesPerHour, Percent};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Eight compass points the wind can carry fire toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindDirection {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "W")]
    West,
    #[serde(rename = "NE")]
    NorthEast,
    #[serde(rename = "NW")]
    NorthWest,
    #[serde(rename = "SE")]
    SouthEast,
    #[serde(rename = "SW")]
    SouthWest,
}

impl WindDirection {
    pub const ALL: [WindDirection; 8] = [
        WindDirection::North,
        WindDirection::South,
        WindDirection::East,
        WindDirection::West,
        WindDirection::NorthEast,
        WindDirection::NorthWest,
        WindDirection::SouthEast,
        WindDirection::SouthWest,
    ];

    /// Grid offset for this direction (+y is north). Diagonals are not normalized.
    pub fn offset(self) -> (i32, i32) {
        match self {
            WindDirection::North => (0, 1),
            WindDirection::South => (0, -1),
            WindDirection::East => (1, 0),
            WindDirection::West => (-1, 0),
            WindDirection::NorthEast => (1, 1),
            WindDirection::NorthWest => (-1, 1),
            WindDirection::SouthEast => (1, -1),
            WindDirection::SouthWest => (-1, -1),
        }
    }

    /// Compass abbreviation ("N", "SW", ...)
    pub fn abbreviation(self) -> &'static str {
        match self {
            WindDirection::North => "N",
            WindDirection::South => "S",
            WindDirection::East => "E",
            WindDirection::West => "W",
            WindDirection::NorthEast => "NE",
            WindDirection::NorthWest => "NW",
            WindDirection::SouthEast => "SE",
            WindDirection::SouthWest => "SW",
        }
    }
}

impl FromStr for WindDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WindDirection::ALL
            .into_iter()
            .find(|d| d.abbreviation().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("unknown wind direction '{s}' (expected N, S, E, W, NE, NW, SE or SW)")
            })
    }
}

impl fmt::Display for WindDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Immutable weather inputs for a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    wind_direction: WindDirection,
    /// 0-20
    wind_speed: MilesPerHour,
    /// 32-100
    temperature: Fahrenheit,
    /// 0-50
    humidity: Percent,
}

impl Environment {
    /// Upper bound on wind speed
    pub const MAX_WIND_SPEED: MilesPerHour = MilesPerHour::new(20.0);

    /// Upper bound on relative humidity
    pub const MAX_HUMIDITY: Percent = Percent::new(50.0);

    /// Create a validated environment
    ///
    /// # Errors
    /// Returns [`SimError::InvalidEnvironment`] if wind speed is outside 0-20,
    /// temperature outside 32-100 or humidity outside 0-50 (NaN is rejected).
    pub fn new(
        wind_direction: WindDirection,
        wind_speed: MilesPerHour,
        temperature: Fahrenheit,
        humidity: Percent,
    ) -> Result<Self, SimError> {
        check_range("wind_speed", *wind_speed, 0.0, *Self::MAX_WIND_SPEED)?;
        check_range(
            "temperature",
            *temperature,
            *Fahrenheit::MIN,
            *Fahrenheit::MAX,
        )?;
        check_range("humidity", *humidity, 0.0, *Self::MAX_HUMIDITY)?;

        Ok(Environment {
            wind_direction,
            wind_speed,
            temperature,
            humidity,
        })
    }

    /// Re-check ranges, for values that arrived through deserialization
    ///
    /// # Errors
    /// Same as [`Environment::new`].
    pub fn validated(self) -> Result<Self, SimError> {
        Environment::new(
            self.wind_direction,
            self.wind_speed,
            self.temperature,
            self.humidity,
        )
    }

    /// Unit vector the wind blows along
    pub fn wind_unit_vector(&self) -> Vec2 {
        let (dx, dy) = self.wind_direction.offset();
        Vec2::new(dx as f32, dy as f32).normalize()
    }

    #[inline]
    pub fn wind_direction(&self) -> WindDirection {
        self.wind_direction
    }

    #[inline]
    pub fn wind_speed(&self) -> MilesPerHour {
        self.wind_speed
    }

    #[inline]
    pub fn temperature(&self) -> Fahrenheit {
        self.temperature
    }

    #[inline]
    pub fn humidity(&self) -> Percent {
        self.humidity
    }
}

impl Default for Environment {
    /// Westerly 8 mph wind, 70°F, 30% humidity
    fn default() -> Self {
        Environment {
            wind_direction: WindDirection::West,
            wind_speed: MilesPerHour::new(8.0),
            temperature: Fahrenheit::new(70.0),
            humidity: Percent::new(30.0),
        }
    }
}

fn check_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), SimError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(SimError::InvalidEnvironment {
            field,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wind_unit_vectors_are_normalized() {
        for direction in WindDirection::ALL {
            let env = Environment::new(
                direction,
                MilesPerHour::new(5.0),
                Fahrenheit::new(70.0),
                Percent::new(10.0),
            )
            .unwrap();
            assert_relative_eq!(env.wind_unit_vector().norm(), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_north_east_points_up_right() {
        let env = Environment::new(
            WindDirection::NorthEast,
            MilesPerHour::CALM,
            Fahrenheit::new(70.0),
            Percent::new(10.0),
        )
        .unwrap();
        let v = env.wind_unit_vector();
        assert_relative_eq!(v.x, std::f32::consts::FRAC_1_SQRT_2, epsilon = 1e-6);
        assert_relative_eq!(v.y, std::f32::consts::FRAC_1_SQRT_2, epsilon = 1e-6);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let bad_temp = Environment::new(
            WindDirection::West,
            MilesPerHour::new(8.0),
            Fahrenheit::new(120.0),
            Percent::new(30.0),
        );
        assert!(matches!(
            bad_temp,
            Err(SimError::InvalidEnvironment {
                field: "temperature",
                ..
            })
        ));

        let bad_humidity = Environment::new(
            WindDirection::West,
            MilesPerHour::new(8.0),
            Fahrenheit::new(70.0),
            Percent::new(f32::NAN),
        );
        assert!(bad_humidity.is_err());
    }

    #[test]
    fn test_default_is_valid() {
        let env = Environment::default();
        assert_eq!(env.validated().unwrap(), env);
        assert_eq!(env.wind_direction(), WindDirection::West);
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!(
            "sw".parse::<WindDirection>().unwrap(),
            WindDirection::SouthWest
        );
        assert_eq!(
            " N ".parse::<WindDirection>().unwrap(),
            WindDirection::North
        );
        assert!("NNE".parse::<WindDirection>().is_err());
    }

    #[test]
    fn test_serde_uses_compass_abbreviations() {
        let json = serde_json::to_string(&Environment::default()).unwrap();
        assert!(json.contains("\"wind_direction\":\"W\""), "{json}");
        let back: Environment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Environment::default());
    }
}
