use serde::{Deserialize, Serialize};

use crate::sink::AudioSink;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Observer speed (units per tick) above which footsteps play.
    pub speed_threshold: f64,
    pub footstep_clip: String,
    pub fade_ms: u32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            speed_threshold: 0.02,
            footstep_clip: "footsteps".to_string(),
            fade_ms: 250,
        }
    }
}

/// Starts the footstep loop when the observer speeds up past the threshold
/// and stops it when they slow back under it.
#[derive(Debug, Clone)]
pub struct FootstepLoop {
    config: AudioConfig,
    playing: bool,
}

impl FootstepLoop {
    pub fn new(config: AudioConfig) -> Self {
        Self {
            config,
            playing: false,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Feed this tick's speed. Calls the sink only on a state change.
    pub fn update(&mut self, speed: f64, sink: &mut impl AudioSink) {
        let moving = speed > self.config.speed_threshold;
        if moving && !self.playing {
            sink.play_loop(&self.config.footstep_clip);
            self.playing = true;
            tracing::debug!(speed, "footsteps started");
        } else if !moving && self.playing {
            sink.stop(self.config.fade_ms);
            self.playing = false;
            tracing::debug!(speed, "footsteps stopped");
        }
    }
}
