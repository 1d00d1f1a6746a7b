/// Temporary node cache
///
/// On-demand nodes for unprepared (or exhausted) names, retained in a
/// single insertion-ordered pool across all names. Capacity is fixed;
/// once full, the oldest entry is evicted to make room. Capacity is
/// enforced after each insert, never before, so the size may momentarily
/// reach capacity + 1 internally before being normalized.
use std::collections::VecDeque;

use crate::host::{release_node, AudioHost};
use crate::node::{AudioNode, NodeHandle};

/// Default number of cached nodes retained for reuse.
pub const DEFAULT_CACHE_CAPACITY: usize = 32;

pub struct TemporaryCache {
    nodes: VecDeque<AudioNode>,
    capacity: usize,
}

impl TemporaryCache {
    pub(crate) fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// First cached node with a matching id that is not currently playing.
    /// Linear scan; the oldest compatible node wins.
    pub(crate) fn find_available(&mut self, name: &str) -> Option<&mut AudioNode> {
        self.nodes
            .iter_mut()
            .find(|node| node.id() == name && !node.is_playing())
    }

    /// Attach `node` and append it to the pool. If the pool now exceeds
    /// capacity, the single oldest entry is detached and returned so the
    /// caller can report the eviction.
    pub(crate) fn insert(
        &mut self,
        node: AudioNode,
        host: &mut dyn AudioHost,
    ) -> Option<AudioNode> {
        host.attach(node.handle(), node.id());
        self.nodes.push_back(node);

        if self.nodes.len() > self.capacity {
            if let Some(mut oldest) = self.nodes.pop_front() {
                release_node(host, &mut oldest);
                tracing::debug!(
                    "Evicted oldest cached node {} ('{}')",
                    oldest.handle(),
                    oldest.id()
                );
                return Some(oldest);
            }
        }
        None
    }

    /// The most recently inserted node.
    pub(crate) fn newest_mut(&mut self) -> Option<&mut AudioNode> {
        self.nodes.back_mut()
    }

    pub(crate) fn find_by_handle_mut(&mut self, handle: NodeHandle) -> Option<&mut AudioNode> {
        self.nodes.iter_mut().find(|node| node.handle() == handle)
    }

    /// Detach and discard every cached node. Returns how many were
    /// discarded.
    pub(crate) fn clear(&mut self, host: &mut dyn AudioHost) -> usize {
        let discarded = self.nodes.len();
        for node in self.nodes.iter_mut() {
            release_node(host, node);
        }
        self.nodes.clear();
        discarded
    }

    /// Discard all nodes without touching the host. Used when the host is
    /// already gone at teardown.
    pub(crate) fn discard_all(&mut self) {
        self.nodes.clear();
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
