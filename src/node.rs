/// Audio node entity
///
/// A named, stateful handle to a single sound-emitting resource. The node
/// itself produces no sound; the host renders it while it is attached.
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::host::CompletionToken;

/// Opaque identifier for a node's attachment in the host graph.
///
/// Pools track membership through handles instead of inspecting the host's
/// children, so the host never needs to know which of its attachments
/// belong to this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle(u64);

impl NodeHandle {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        NodeHandle(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A sound-emitting node owned by exactly one of the pools.
///
/// State machine: Idle -> Playing -> Idle (scheduled stop, non-looping) or
/// Paused (explicit pause) -> Playing (resume). Looping playback has no
/// scheduled stop; it stays Playing until paused or removed.
#[derive(Debug)]
pub struct AudioNode {
    /// Logical sound name; immutable after creation.
    id: String,
    handle: NodeHandle,
    is_playing: bool,
    is_paused: bool,
    looped: bool,
    /// Token for the scheduled auto-stop, if one is pending.
    pending_completion: Option<CompletionToken>,
}

impl AudioNode {
    /// Create a fresh node for a sound name. Starts neither playing nor paused.
    pub(crate) fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            handle: NodeHandle::next(),
            is_playing: false,
            is_paused: false,
            looped: false,
            pending_completion: None,
        }
    }

    /// The sound name this node was created for.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Host attachment handle for this node.
    pub fn handle(&self) -> NodeHandle {
        self.handle
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn is_looped(&self) -> bool {
        self.looped
    }

    /// Neither playing nor paused.
    pub fn is_idle(&self) -> bool {
        !self.is_playing && !self.is_paused
    }

    /// Transition into Playing. Clears the paused flag so the two are never
    /// set at the same time.
    pub(crate) fn begin_playing(&mut self, looped: bool) {
        self.is_paused = false;
        self.is_playing = true;
        self.looped = looped;
    }

    /// Transition into Paused.
    pub(crate) fn pause(&mut self) {
        self.is_playing = false;
        self.is_paused = true;
    }

    /// Return to Idle after a scheduled stop or a hard stop.
    pub(crate) fn finish(&mut self) {
        self.is_playing = false;
        self.is_paused = false;
    }

    pub(crate) fn set_pending_completion(&mut self, token: CompletionToken) {
        self.pending_completion = Some(token);
    }

    pub(crate) fn take_pending_completion(&mut self) -> Option<CompletionToken> {
        self.pending_completion.take()
    }

    #[cfg(test)]
    pub(crate) fn pending_completion(&self) -> Option<CompletionToken> {
        self.pending_completion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_node_is_idle() {
        let node = AudioNode::new("laser");
        assert_eq!(node.id(), "laser");
        assert!(node.is_idle());
        assert!(!node.is_playing());
        assert!(!node.is_paused());
        assert!(node.pending_completion().is_none());
    }

    #[test]
    fn test_playing_and_paused_never_both_set() {
        let mut node = AudioNode::new("laser");

        node.begin_playing(false);
        assert!(node.is_playing());
        assert!(!node.is_paused());

        node.pause();
        assert!(!node.is_playing());
        assert!(node.is_paused());

        // Resume clears the paused flag again
        node.begin_playing(true);
        assert!(node.is_playing());
        assert!(!node.is_paused());
        assert!(node.is_looped());

        node.finish();
        assert!(node.is_idle());
    }

    #[test]
    fn test_handles_are_unique() {
        let a = AudioNode::new("a");
        let b = AudioNode::new("a");
        assert_ne!(a.handle(), b.handle());
    }

    #[test]
    fn test_handle_display() {
        let node = AudioNode::new("a");
        assert!(node.handle().to_string().starts_with('#'));
    }
}
