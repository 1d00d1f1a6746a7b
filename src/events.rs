/// Event types for the playback core
///
/// Events represent things that have happened (past tense). They are
/// broadcast to all subscribers of the controller's event bus.
use crate::node::NodeHandle;

/// Playback events
#[derive(Debug, Clone)]
pub enum SoundEvent {
    /// A node began playing (fresh start or resume)
    PlaybackStarted { name: String, handle: NodeHandle },

    /// A non-looping node reached its scheduled stop
    PlaybackFinished { name: String, handle: NodeHandle },

    /// All prepared nodes for a name were paused
    PlaybackPaused { name: String },

    /// The oldest cached node was evicted to make room for a new one
    NodeEvicted { name: String, handle: NodeHandle },

    /// The temporary cache was cleared
    CacheCleared { discarded: usize },

    /// The controller shut down and released every node
    Shutdown,
}

impl SoundEvent {
    /// Get a human-readable description of the event
    pub fn description(&self) -> String {
        match self {
            SoundEvent::PlaybackStarted { name, handle } => {
                format!("Playback started: {} ({})", name, handle)
            }
            SoundEvent::PlaybackFinished { name, handle } => {
                format!("Playback finished: {} ({})", name, handle)
            }
            SoundEvent::PlaybackPaused { name } => {
                format!("Playback paused: {}", name)
            }
            SoundEvent::NodeEvicted { name, handle } => {
                format!("Evicted cached node: {} ({})", name, handle)
            }
            SoundEvent::CacheCleared { discarded } => {
                format!("Cache cleared: {} node(s) discarded", discarded)
            }
            SoundEvent::Shutdown => "Playback controller shut down".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::AudioNode;

    #[test]
    fn test_event_description() {
        let node = AudioNode::new("horn");
        let event = SoundEvent::PlaybackStarted {
            name: node.id().to_string(),
            handle: node.handle(),
        };
        assert!(event.description().starts_with("Playback started: horn"));

        let event = SoundEvent::CacheCleared { discarded: 3 };
        assert_eq!(event.description(), "Cache cleared: 3 node(s) discarded");

        assert_eq!(
            SoundEvent::Shutdown.description(),
            "Playback controller shut down"
        );
    }
}
