//! Burn probability between a burning tile and one of its neighbors
//!
//! ```text
//! base     = fuel_load * temperature * 0.01
//! wind     = max(0.5, 1 + wind_influence * wind_speed * 0.05)
//! humidity = clamp01(1 - humidity * 0.02)
//! P        = clamp01(base * wind * humidity / max(1, distance))
//! ```
//!
//! `wind_influence` is the cosine between the wind vector and the
//! source-to-target direction, so +1 means the wind blows straight from the
//! source toward the target. Diagonal neighbors are penalized only through
//! the distance divisor (√2 vs 1).

use crate::core_types::coord::Vec2;
use crate::core_types::environment::Environment;
use crate::core_types::tile::Tile;

/// Temperature (°F) to base-probability scale
pub const TEMPERATURE_SCALE: f32 = 0.01;

/// Wind speed (mph) to wind-factor scale
pub const WIND_SCALE: f32 = 0.05;

/// Floor on the wind factor; downwind spread is damped but never suppressed
pub const MIN_WIND_FACTOR: f32 = 0.5;

/// Humidity (%) to damping scale
pub const HUMIDITY_SCALE: f32 = 0.02;

/// Probability that `source` ignites `target` in one step (0-1)
///
/// Non-flammable targets always yield 0, as does `source == target`.
pub fn burn_probability(source: &Tile, target: &Tile, environment: &Environment) -> f32 {
    let direction = source.coord().direction_to(target.coord());
    spread_probability(target.fuel_load(), direction, environment)
}

/// Burn probability for a target with `fuel_load` at offset `direction` from the source
pub fn spread_probability(fuel_load: f32, direction: Vec2, environment: &Environment) -> f32 {
    if fuel_load <= 0.0 {
        return 0.0;
    }
    let distance = direction.norm();
    if distance <= 0.0 {
        return 0.0;
    }

    let wind_influence = environment.wind_unit_vector().dot(&(direction / distance));

    let base = fuel_load * *environment.temperature() * TEMPERATURE_SCALE;
    let wind_factor =
        (1.0 + wind_influence * *environment.wind_speed() * WIND_SCALE).max(MIN_WIND_FACTOR);
    let humidity_factor = (1.0 - *environment.humidity() * HUMIDITY_SCALE).clamp(0.0, 1.0);

    (base * wind_factor * humidity_factor / distance.max(1.0)).clamp(0.0, 1.0)
}
