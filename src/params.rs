/// Playback parameters
///
/// Per-call knobs for a play request, combined builder-style.
use std::time::Duration;

/// Parameters applied when a node is activated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackParams {
    /// Scheduled stop for non-looping playback.
    pub duration: Duration,

    /// Whether playback auto-repeats. Looping playback has no scheduled
    /// stop; it plays until explicitly paused or removed.
    pub looped: bool,

    /// Volume multiplier (0.0-1.0), applied immediately on activation.
    pub volume: f32,
}

impl PlaybackParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_loop(mut self, looped: bool) -> Self {
        self.looped = looped;
        self
    }

    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume.clamp(0.0, 1.0);
        self
    }
}

impl Default for PlaybackParams {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(1),
            looped: false,
            volume: 1.0,
        }
    }
}
