/// Something that can play a looping clip and fade it out.
///
/// A missing clip or audio device is handled inside the sink (typically by
/// logging once and doing nothing).
pub trait AudioSink {
    fn play_loop(&mut self, clip: &str);
    fn stop(&mut self, fade_ms: u32);
}

/// Sink for headless runs. Logs at trace level and plays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_loop(&mut self, clip: &str) {
        tracing::trace!(clip, "play_loop (null sink)");
    }

    fn stop(&mut self, fade_ms: u32) {
        tracing::trace!(fade_ms, "stop (null sink)");
    }
}
