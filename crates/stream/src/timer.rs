use std::time::Duration;

/// Ring buffer of recent tick durations for instrumentation.
#[derive(Debug, Clone)]
pub struct TickTimer {
    samples: Vec<Duration>,
    next: usize,
    wrapped: bool,
}

impl TickTimer {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "tick timer needs room for one sample");
        Self {
            samples: vec![Duration::ZERO; capacity],
            next: 0,
            wrapped: false,
        }
    }

    pub fn record(&mut self, elapsed: Duration) {
        self.samples[self.next] = elapsed;
        self.next = (self.next + 1) % self.samples.len();
        self.wrapped |= self.next == 0;
    }

    fn window(&self) -> &[Duration] {
        if self.wrapped {
            &self.samples
        } else {
            &self.samples[..self.next]
        }
    }

    pub fn len(&self) -> usize {
        self.window().len()
    }

    pub fn is_empty(&self) -> bool {
        self.window().is_empty()
    }

    pub fn average(&self) -> Duration {
        let window = self.window();
        if window.is_empty() {
            return Duration::ZERO;
        }
        window.iter().sum::<Duration>() / window.len() as u32
    }

    pub fn max(&self) -> Duration {
        self.window().iter().copied().max().unwrap_or_default()
    }

    pub fn min(&self) -> Duration {
        self.window().iter().copied().min().unwrap_or_default()
    }
}
