/// Prepared node pool
///
/// Long-lived nodes, preloaded per sound name. Each name owns an ordered
/// list of instances; insertion order is selection priority for play
/// requests. Nodes live until an explicit remove or pool teardown.
use std::collections::HashMap;

use crate::host::{release_node, AudioHost};
use crate::node::{AudioNode, NodeHandle};

pub struct PreparedPool {
    nodes: HashMap<String, Vec<AudioNode>>,
}

impl PreparedPool {
    pub(crate) fn new() -> Self {
        Self {
            nodes: HashMap::new(),
        }
    }

    /// Create one long-lived node for `name`, attach it, and append it to
    /// the name's list. Always succeeds.
    pub(crate) fn prepare(&mut self, name: &str, host: &mut dyn AudioHost) {
        let node = AudioNode::new(name);
        host.attach(node.handle(), name);
        tracing::debug!("Prepared node {} for '{}'", node.handle(), name);
        self.nodes.entry(name.to_string()).or_default().push(node);
    }

    /// Prepare each name in order. No atomicity across the batch.
    pub(crate) fn prepare_many<I, S>(&mut self, names: I, host: &mut dyn AudioHost)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.prepare(name.as_ref(), host);
        }
    }

    /// Replace the nodes for `name` with `count` fresh ones. A count of
    /// zero still yields exactly one node.
    pub(crate) fn set_max_concurrent(&mut self, name: &str, count: usize, host: &mut dyn AudioHost) {
        self.remove(name, host);
        let count = count.max(1);
        for _ in 0..count {
            self.prepare(name, host);
        }
        tracing::info!("'{}' now has {} prepared node(s)", name, count);
    }

    /// Detach and discard every node for `name`. No-op for a name that was
    /// never prepared.
    pub(crate) fn remove(&mut self, name: &str, host: &mut dyn AudioHost) {
        if let Some(mut list) = self.nodes.remove(name) {
            for node in list.iter_mut() {
                release_node(host, node);
            }
            tracing::debug!("Removed {} prepared node(s) for '{}'", list.len(), name);
        }
    }

    /// Detach and discard every node in every list.
    pub(crate) fn remove_all(&mut self, host: &mut dyn AudioHost) {
        for list in self.nodes.values_mut() {
            for node in list.iter_mut() {
                release_node(host, node);
            }
        }
        self.nodes.clear();
    }

    /// Discard all nodes without touching the host. Used when the host is
    /// already gone at teardown.
    pub(crate) fn discard_all(&mut self) {
        self.nodes.clear();
    }

    /// The live node list for a name, in preparation order. Empty if the
    /// name was never prepared; never an error.
    pub fn lookup(&self, name: &str) -> &[AudioNode] {
        self.nodes.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn nodes_mut(&mut self, name: &str) -> Option<&mut Vec<AudioNode>> {
        self.nodes.get_mut(name)
    }

    pub(crate) fn find_by_handle_mut(&mut self, handle: NodeHandle) -> Option<&mut AudioNode> {
        self.nodes
            .values_mut()
            .flat_map(|list| list.iter_mut())
            .find(|node| node.handle() == handle)
    }

    /// Number of prepared nodes for a name.
    pub fn count(&self, name: &str) -> usize {
        self.lookup(name).len()
    }

    /// Total prepared nodes across all names.
    pub fn total(&self) -> usize {
        self.nodes.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::test_support::TestHost;

    #[test]
    fn test_prepare_appends_in_order() {
        let mut pool = PreparedPool::new();
        let mut host = TestHost::default();

        pool.prepare("coin", &mut host);
        pool.prepare("coin", &mut host);

        let nodes = pool.lookup("coin");
        assert_eq!(nodes.len(), 2);
        assert!(nodes.iter().all(|n| n.id() == "coin"));
        assert_eq!(host.attached.len(), 2);
        // First prepared node stays first
        assert_eq!(nodes[0].handle(), host.attached[0]);
    }

    #[test]
    fn test_prepare_many_in_order() {
        let mut pool = PreparedPool::new();
        let mut host = TestHost::default();

        pool.prepare_many(["coin", "jump", "coin"], &mut host);

        assert_eq!(pool.count("coin"), 2);
        assert_eq!(pool.count("jump"), 1);
        assert_eq!(pool.total(), 3);
    }

    #[test]
    fn test_set_max_concurrent_replaces_nodes() {
        let mut pool = PreparedPool::new();
        let mut host = TestHost::default();

        pool.prepare("coin", &mut host);
        let old_handle = pool.lookup("coin")[0].handle();

        pool.set_max_concurrent("coin", 3, &mut host);

        assert_eq!(pool.count("coin"), 3);
        assert!(host.detached.contains(&old_handle));
        assert!(pool.lookup("coin").iter().all(|n| n.handle() != old_handle));
    }

    #[test]
    fn test_set_max_concurrent_floors_at_one() {
        let mut pool = PreparedPool::new();
        let mut host = TestHost::default();

        pool.set_max_concurrent("coin", 0, &mut host);
        assert_eq!(pool.count("coin"), 1);
    }

    #[test]
    fn test_remove_detaches_every_matching_node() {
        let mut pool = PreparedPool::new();
        let mut host = TestHost::default();

        pool.prepare_many(["coin", "coin", "jump"], &mut host);
        pool.remove("coin", &mut host);

        assert!(pool.lookup("coin").is_empty());
        assert_eq!(pool.count("jump"), 1);
        assert_eq!(host.detached.len(), 2);
    }

    #[test]
    fn test_remove_unknown_name_is_noop() {
        let mut pool = PreparedPool::new();
        let mut host = TestHost::default();

        pool.remove("never-prepared", &mut host);
        assert!(host.detached.is_empty());
    }

    #[test]
    fn test_lookup_unknown_name_is_empty() {
        let pool = PreparedPool::new();
        assert!(pool.lookup("missing").is_empty());
    }

    #[test]
    fn test_remove_all() {
        let mut pool = PreparedPool::new();
        let mut host = TestHost::default();

        pool.prepare_many(["a", "b", "c"], &mut host);
        pool.remove_all(&mut host);

        assert_eq!(pool.total(), 0);
        assert_eq!(host.currently_attached(), 0);
    }

    #[test]
    fn test_find_by_handle() {
        let mut pool = PreparedPool::new();
        let mut host = TestHost::default();

        pool.prepare("coin", &mut host);
        let handle = pool.lookup("coin")[0].handle();

        assert!(pool.find_by_handle_mut(handle).is_some());
        let other = AudioNode::new("other");
        assert!(pool.find_by_handle_mut(other.handle()).is_none());
    }
}
