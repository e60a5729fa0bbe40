use cityscape_common::Footprint;
use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::config::MovementConfig;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LookAngles {
    pub yaw: f64,
    pub pitch: f64,
}

/// Movement requested for one tick, already translated from raw input.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveIntent {
    pub forward: bool,
    pub back: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub sprint: bool,
    pub look_delta: DVec2,
}

/// The single viewpoint walking through the city.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    pub position: DVec2,
    pub velocity: DVec2,
    pub look: LookAngles,
}

impl Observer {
    pub fn spawn(config: &MovementConfig) -> Self {
        Self {
            position: config.spawn_position,
            velocity: DVec2::ZERO,
            look: LookAngles {
                yaw: config.spawn_look.x,
                pitch: config.spawn_look.y,
            },
        }
    }

    /// Advance look angles and velocity by one tick, then move.
    ///
    /// Forward wins over back and left wins over right when both are held.
    pub fn integrate(&mut self, intent: &MoveIntent, config: &MovementConfig) {
        self.look.yaw += intent.look_delta.x * config.look_sensitivity;
        self.look.pitch += intent.look_delta.y * config.look_sensitivity;

        let (sin, cos) = self.look.yaw.sin_cos();
        let forward = DVec2::new(cos, -sin);
        let left = DVec2::new(-sin, -cos);

        let mut acc = DVec2::ZERO;
        if intent.forward {
            acc += forward;
        } else if intent.back {
            acc -= forward;
        }
        if intent.strafe_left {
            acc += left;
        } else if intent.strafe_right {
            acc -= left;
        }
        let mut acc = acc.normalize_or_zero() * config.acceleration;
        if intent.sprint {
            acc *= config.sprint_multiplier;
        }

        self.velocity = self.velocity * config.retention + acc;
        self.position += self.velocity;
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    pub fn bounding_box(&self, half_extent: f64) -> Footprint {
        Footprint::centered(self.position, half_extent)
    }
}
