use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Tunables for the city window, cell generation, collision and doors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Cells per window side.
    pub grid_size: usize,
    /// World-space spacing between neighbouring cell origins.
    pub pitch: f64,
    /// Side length of a cell's square footprint.
    pub footprint: f64,
    pub min_stories: i32,
    pub max_stories: i32,
    /// Height the very first cell is walked from.
    pub seed_height: i32,
    /// Inclusive range of the per-cell height step.
    pub height_step_min: i32,
    pub height_step_max: i32,
    /// One in `lock_probability` cells spawns unlocked.
    pub lock_probability: u32,
    /// Half side of the observer's collision box.
    pub observer_half_extent: f64,
    /// Per-axis distance from a door point within which interaction works.
    pub door_reach: f64,
    /// Below this speed on both axes the push-out velocity is forced.
    pub collision_epsilon: f64,
    pub forced_velocity: f64,
    /// Factor applied to the velocity before stepping out of a footprint.
    pub push_damping: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            grid_size: 10,
            pitch: 15.0,
            footprint: 9.0,
            min_stories: 3,
            max_stories: 20,
            seed_height: 11,
            height_step_min: -8,
            height_step_max: 7,
            lock_probability: 20,
            observer_half_extent: 0.5,
            door_reach: 1.0,
            collision_epsilon: 0.01,
            forced_velocity: 0.1,
            push_damping: -0.1,
        }
    }
}

/// Errors from validating configuration values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("grid size must be at least 2, got {0}")]
    GridTooSmall(usize),
    #[error("pitch must be positive, got {0}")]
    NonPositivePitch(f64),
    #[error("footprint {footprint} must be positive and smaller than pitch {pitch}")]
    FootprintOutOfRange { footprint: f64, pitch: f64 },
    #[error("story range {min}..={max} is empty or below 1")]
    StoryRange { min: i32, max: i32 },
    #[error("height step range {min}..={max} is empty")]
    StepRange { min: i32, max: i32 },
    #[error("lock probability must be at least 1")]
    ZeroLockProbability,
    #[error("velocity retention must lie in [0, 1), got {0}")]
    Retention(f64),
    #[error("push damping must lie in [-1, 0), got {0}")]
    PushDamping(f64),
    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f64 },
}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < 2 {
            return Err(ConfigError::GridTooSmall(self.grid_size));
        }
        if !(self.pitch.is_finite() && self.pitch > 0.0) {
            return Err(ConfigError::NonPositivePitch(self.pitch));
        }
        if !(self.footprint > 0.0 && self.footprint < self.pitch) {
            return Err(ConfigError::FootprintOutOfRange {
                footprint: self.footprint,
                pitch: self.pitch,
            });
        }
        if self.min_stories < 1 || self.min_stories > self.max_stories {
            return Err(ConfigError::StoryRange {
                min: self.min_stories,
                max: self.max_stories,
            });
        }
        if self.height_step_min > self.height_step_max {
            return Err(ConfigError::StepRange {
                min: self.height_step_min,
                max: self.height_step_max,
            });
        }
        if self.lock_probability == 0 {
            return Err(ConfigError::ZeroLockProbability);
        }
        for (name, value) in [
            ("observer_half_extent", self.observer_half_extent),
            ("door_reach", self.door_reach),
            ("collision_epsilon", self.collision_epsilon),
            ("forced_velocity", self.forced_velocity),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        // Push-out must step back out the way the observer came in.
        if !(-1.0..0.0).contains(&self.push_damping) {
            return Err(ConfigError::PushDamping(self.push_damping));
        }
        Ok(())
    }

    /// World position of cell (0,0) for a window centred on the world origin.
    pub fn centred_origin(&self) -> DVec2 {
        DVec2::splat(-((self.grid_size - 1) as f64) * self.pitch / 2.0)
    }
}

/// Tunables for the observer's movement model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub acceleration: f64,
    /// Fraction of velocity kept each tick.
    pub retention: f64,
    pub sprint_multiplier: f64,
    /// Radians per pointer unit.
    pub look_sensitivity: f64,
    pub spawn_position: DVec2,
    /// `(yaw, pitch)` at spawn.
    pub spawn_look: DVec2,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            acceleration: 0.01,
            retention: 0.85,
            sprint_multiplier: 2.0,
            look_sensitivity: 1.0 / 300.0,
            spawn_position: DVec2::new(3.0, -7.0),
            spawn_look: DVec2::new(-1.5, 1.5),
        }
    }
}

impl MovementConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.retention) {
            return Err(ConfigError::Retention(self.retention));
        }
        for (name, value) in [
            ("acceleration", self.acceleration),
            ("sprint_multiplier", self.sprint_multiplier),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = WorldConfig::default();
        assert_eq!(config.grid_size, 10);
        assert_eq!(config.lock_probability, 20);
        assert!(config.validate().is_ok());
        assert!(MovementConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_lock_probability() {
        let config = WorldConfig {
            lock_probability: 0,
            ..WorldConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroLockProbability));
    }

    #[test]
    fn rejects_footprint_wider_than_pitch() {
        let config = WorldConfig {
            footprint: 15.0,
            ..WorldConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FootprintOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_inverted_story_range() {
        let config = WorldConfig {
            min_stories: 12,
            max_stories: 4,
            ..WorldConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::StoryRange { .. })));
    }

    #[test]
    fn rejects_damping_that_does_not_reverse() {
        for damping in [0.0, 0.5, -1.5, f64::NAN] {
            let config = WorldConfig {
                push_damping: damping,
                ..WorldConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(ConfigError::PushDamping(_))),
                "damping {damping} accepted"
            );
        }
        let full_reverse = WorldConfig {
            push_damping: -1.0,
            ..WorldConfig::default()
        };
        assert!(full_reverse.validate().is_ok());
    }

    #[test]
    fn rejects_non_finite_lengths() {
        let nan_pitch = WorldConfig {
            pitch: f64::NAN,
            ..WorldConfig::default()
        };
        assert!(matches!(nan_pitch.validate(), Err(ConfigError::NonPositivePitch(_))));

        let nan_footprint = WorldConfig {
            footprint: f64::NAN,
            ..WorldConfig::default()
        };
        assert!(matches!(
            nan_footprint.validate(),
            Err(ConfigError::FootprintOutOfRange { .. })
        ));

        let nan_extent = WorldConfig {
            observer_half_extent: f64::NAN,
            ..WorldConfig::default()
        };
        assert!(matches!(
            nan_extent.validate(),
            Err(ConfigError::NonPositive { name: "observer_half_extent", .. })
        ));

        let infinite_reach = WorldConfig {
            door_reach: f64::INFINITY,
            ..WorldConfig::default()
        };
        assert!(infinite_reach.validate().is_err());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: WorldConfig = serde_json::from_str(r#"{ "grid_size": 6 }"#).unwrap();
        assert_eq!(config.grid_size, 6);
        assert_eq!(config.pitch, 15.0);
    }

    #[test]
    fn centred_origin_puts_window_centre_at_zero() {
        let config = WorldConfig::default();
        let origin = config.centred_origin();
        let far = origin + DVec2::splat((config.grid_size - 1) as f64 * config.pitch);
        assert_eq!((origin + far) / 2.0, DVec2::ZERO);
    }
}
