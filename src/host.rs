/// Audio host collaborator interface
///
/// The host owns the actual render graph and the audio engine lifecycle.
/// This crate only decides which node plays; everything audible happens on
/// the other side of this trait.
use std::time::Duration;

use crate::error::EngineError;
use crate::node::{AudioNode, NodeHandle};

/// Token identifying a scheduled completion, handed out by the host and
/// used to cancel the deferred auto-stop when a node is removed, evicted,
/// paused, or reactivated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompletionToken(u64);

impl CompletionToken {
    /// Construct a token. Host implementations mint these from their own
    /// scheduling primitive.
    pub fn new(value: u64) -> Self {
        CompletionToken(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Interface the embedding application implements.
///
/// All methods are called synchronously on the host's update step.
/// Cancellation of scheduled completions is explicit: the controller
/// cancels a node's pending token before the node is detached or
/// reactivated, and a conforming host must not deliver a completion after
/// `cancel_completion` returned for its token.
pub trait AudioHost {
    /// Add a node to the render graph.
    fn attach(&mut self, handle: NodeHandle, name: &str);

    /// Remove a node from the render graph and discard any pending
    /// host-side actions for it.
    fn detach(&mut self, handle: NodeHandle);

    /// Start the underlying audio engine if it is not already running.
    /// Idempotent. Failures are logged by the caller and absorbed.
    fn ensure_engine_running(&mut self) -> Result<(), EngineError>;

    /// Apply a volume to an attached node immediately.
    fn set_volume(&mut self, handle: NodeHandle, volume: f32);

    /// Begin playback on an attached node.
    fn play(&mut self, handle: NodeHandle, looped: bool);

    /// Pause playback on an attached node.
    fn pause(&mut self, handle: NodeHandle);

    /// Stop playback on an attached node.
    fn stop(&mut self, handle: NodeHandle);

    /// Schedule a deferred completion for a node. The host must call
    /// `PlaybackController::handle_completion` with the node's handle once
    /// `after` has elapsed, unless the token was cancelled first.
    fn schedule_completion(&mut self, handle: NodeHandle, after: Duration) -> CompletionToken;

    /// Cancel a previously scheduled completion.
    fn cancel_completion(&mut self, token: CompletionToken);
}

/// Detach a node from the host, cancelling its pending completion first so
/// no stale callback can reach a discarded node.
pub(crate) fn release_node(host: &mut dyn AudioHost, node: &mut AudioNode) {
    if let Some(token) = node.take_pending_completion() {
        host.cancel_completion(token);
    }
    host.detach(node.handle());
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Host double that records every call for assertions.
    #[derive(Default)]
    pub(crate) struct TestHost {
        pub(crate) attached: Vec<NodeHandle>,
        pub(crate) detached: Vec<NodeHandle>,
        pub(crate) played: Vec<NodeHandle>,
        pub(crate) paused: Vec<NodeHandle>,
        pub(crate) stopped: Vec<NodeHandle>,
        pub(crate) volumes: Vec<(NodeHandle, f32)>,
        pub(crate) scheduled: Vec<(CompletionToken, NodeHandle, Duration)>,
        pub(crate) cancelled: Vec<CompletionToken>,
        pub(crate) engine_starts: usize,
        pub(crate) fail_engine: bool,
        next_token: u64,
    }

    impl TestHost {
        pub(crate) fn currently_attached(&self) -> usize {
            self.attached.len() - self.detached.len()
        }
    }

    impl AudioHost for TestHost {
        fn attach(&mut self, handle: NodeHandle, _name: &str) {
            self.attached.push(handle);
        }

        fn detach(&mut self, handle: NodeHandle) {
            self.detached.push(handle);
        }

        fn ensure_engine_running(&mut self) -> Result<(), EngineError> {
            self.engine_starts += 1;
            if self.fail_engine {
                Err(EngineError::NoOutputDevice)
            } else {
                Ok(())
            }
        }

        fn set_volume(&mut self, handle: NodeHandle, volume: f32) {
            self.volumes.push((handle, volume));
        }

        fn play(&mut self, handle: NodeHandle, _looped: bool) {
            self.played.push(handle);
        }

        fn pause(&mut self, handle: NodeHandle) {
            self.paused.push(handle);
        }

        fn stop(&mut self, handle: NodeHandle) {
            self.stopped.push(handle);
        }

        fn schedule_completion(&mut self, handle: NodeHandle, after: Duration) -> CompletionToken {
            self.next_token += 1;
            let token = CompletionToken::new(self.next_token);
            self.scheduled.push((token, handle, after));
            token
        }

        fn cancel_completion(&mut self, token: CompletionToken) {
            self.cancelled.push(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::TestHost;
    use super::*;

    #[test]
    fn test_release_node_cancels_pending_completion() {
        let mut host = TestHost::default();
        let mut node = AudioNode::new("beep");
        let token = host.schedule_completion(node.handle(), Duration::from_secs(1));
        node.set_pending_completion(token);

        release_node(&mut host, &mut node);

        assert_eq!(host.cancelled, vec![token]);
        assert_eq!(host.detached, vec![node.handle()]);
        assert!(node.pending_completion().is_none());
    }

    #[test]
    fn test_release_node_without_pending_completion() {
        let mut host = TestHost::default();
        let mut node = AudioNode::new("beep");

        release_node(&mut host, &mut node);

        assert!(host.cancelled.is_empty());
        assert_eq!(host.detached, vec![node.handle()]);
    }
}
