use std::time::Instant;

use cityscape_audio::{AudioSink, FootstepLoop, NullAudio};
use cityscape_common::{GridPos, ShiftDirection};
use cityscape_input::{Action, InputSource, InputState};
use cityscape_kernel::{MovementConfig, PushOut, WorldState};
use cityscape_render::{Frame, RenderView, Renderer};
use cityscape_stream::{StreamController, StreamStats, TickTimer};

use crate::config::{SimConfig, SimError};

/// Number of recent tick durations kept for timing stats.
const TIMER_WINDOW: usize = 120;

/// What happened during one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Tick number after the step.
    pub tick: u64,
    pub shift: Option<ShiftDirection>,
    pub push_outs: Vec<PushOut>,
    pub doors_opened: Vec<GridPos>,
    pub footsteps_playing: bool,
}

/// Outcome of `Simulation::run`.
#[derive(Debug)]
pub struct RunSummary<O> {
    pub ticks: u64,
    /// The run ended because input asked to quit.
    pub quit: bool,
    /// Renderer output of the last completed tick.
    pub last_output: Option<O>,
}

/// Owns the world and every per-run controller, and advances them in the
/// fixed per-tick order.
pub struct Simulation<A: AudioSink = NullAudio> {
    world: WorldState,
    movement: MovementConfig,
    stream: StreamController,
    footsteps: FootstepLoop,
    audio: A,
    timer: TickTimer,
}

impl Simulation<NullAudio> {
    /// Headless simulation with a silent audio sink.
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, SimError> {
        Self::with_audio(config, seed, NullAudio)
    }
}

impl<A: AudioSink> Simulation<A> {
    pub fn with_audio(config: SimConfig, seed: u64, audio: A) -> Result<Self, SimError> {
        config.validate()?;
        let SimConfig {
            world,
            movement,
            audio: audio_config,
        } = config;
        let world = WorldState::new(world, &movement, seed)?;
        Ok(Self {
            world,
            movement,
            stream: StreamController::new(),
            footsteps: FootstepLoop::new(audio_config),
            audio,
            timer: TickTimer::new(TIMER_WINDOW),
        })
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    /// Mutable world access for tools and tests that place the observer.
    pub fn world_mut(&mut self) -> &mut WorldState {
        &mut self.world
    }

    pub fn stream_stats(&self) -> &StreamStats {
        self.stream.stats()
    }

    pub fn timer(&self) -> &TickTimer {
        &self.timer
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Advance one tick with an already-polled input snapshot.
    pub fn tick(&mut self, input: &InputState) -> TickReport {
        let started = Instant::now();
        let _span = tracing::info_span!("tick", tick = self.world.tick()).entered();

        self.world.move_observer(&input.move_intent(), &self.movement);
        let shift = self.stream.update(&mut self.world);
        let push_outs = self.world.resolve_collisions();
        self.footsteps
            .update(self.world.observer().speed(), &mut self.audio);
        let doors_opened = if input.is_held(Action::Interact) {
            self.world.interact()
        } else {
            Vec::new()
        };
        self.world.step();

        self.timer.record(started.elapsed());
        TickReport {
            tick: self.world.tick(),
            shift,
            push_outs,
            doors_opened,
            footsteps_playing: self.footsteps.is_playing(),
        }
    }

    /// Capture the current frame and view and hand them to `renderer`.
    pub fn render<R: Renderer>(&self, renderer: &R) -> R::Output {
        let frame = Frame::capture(&self.world);
        let view = RenderView::from_observer(self.world.observer());
        renderer.render(&frame, &view)
    }

    /// Poll, tick and render until input asks to quit or `max_ticks` ticks
    /// have run.
    pub fn run<I, R>(&mut self, source: &mut I, renderer: &R, max_ticks: u64) -> RunSummary<R::Output>
    where
        I: InputSource,
        R: Renderer,
    {
        let mut summary = RunSummary {
            ticks: 0,
            quit: false,
            last_output: None,
        };
        while summary.ticks < max_ticks {
            let input = source.poll();
            if input.quit_requested() {
                tracing::info!(tick = self.world.tick(), "quit requested");
                summary.quit = true;
                break;
            }
            self.tick(&input);
            summary.last_output = Some(self.render(renderer));
            summary.ticks += 1;
        }
        tracing::info!(
            ticks = summary.ticks,
            shifts = self.stream.stats().shifts_total,
            avg_tick_us = self.timer.average().as_micros() as u64,
            "run finished"
        );
        summary
    }
}
