/// Playback controller
///
/// Decides, for each play request, which existing node to reuse or whether
/// to create a new one, and drives nodes through their play/pause/stop
/// transitions. Prepared nodes are tried first; on-demand cached nodes are
/// the fallback.
use std::sync::{Arc, Weak};

use crossbeam_channel::Receiver;
use parking_lot::Mutex;

use crate::bus::{EventBus, SubscriberId};
use crate::cache::TemporaryCache;
use crate::events::SoundEvent;
use crate::host::AudioHost;
use crate::node::{AudioNode, NodeHandle};
use crate::params::PlaybackParams;
use crate::prepared::PreparedPool;
use crate::settings::AudioSettings;

/// Shared handle to the embedding application's audio host.
pub type SharedHost = Arc<Mutex<dyn AudioHost>>;

pub struct PlaybackController {
    /// Non-owning host reference. The controller never extends the host's
    /// lifetime; once the host is gone, every operation degrades to a
    /// logged no-op.
    host: Weak<Mutex<dyn AudioHost>>,
    prepared: PreparedPool,
    cache: TemporaryCache,
    cache_enabled: bool,
    defaults: PlaybackParams,
    events: EventBus,
    shut_down: bool,
}

impl PlaybackController {
    pub fn new(host: &SharedHost) -> Self {
        Self::with_settings(host, &AudioSettings::default())
    }

    pub fn with_settings(host: &SharedHost, settings: &AudioSettings) -> Self {
        Self {
            host: Arc::downgrade(host),
            prepared: PreparedPool::new(),
            cache: TemporaryCache::with_capacity(settings.cache_capacity),
            cache_enabled: settings.cached_sounds_enabled,
            defaults: PlaybackParams::new()
                .with_duration(std::time::Duration::from_millis(settings.default_duration_ms))
                .with_volume(settings.default_volume),
            events: EventBus::new(),
            shut_down: false,
        }
    }

    /// Preload one long-lived node for `name`.
    pub fn prepare_sound(&mut self, name: &str) {
        let Some(host) = self.live_host() else { return };
        let mut host = host.lock();
        self.prepared.prepare(name, &mut *host);
    }

    /// Preload one node for each name, in order.
    pub fn prepare_sounds<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Some(host) = self.live_host() else { return };
        let mut host = host.lock();
        self.prepared.prepare_many(names, &mut *host);
    }

    /// Replace the prepared nodes for `name` with `count` fresh ones.
    /// A count of zero is clamped to one.
    pub fn set_max_concurrent_playback(&mut self, name: &str, count: usize) {
        let Some(host) = self.live_host() else { return };
        let mut host = host.lock();
        self.prepared.set_max_concurrent(name, count, &mut *host);
    }

    /// Play a prepared sound, falling back to an on-demand cached node when
    /// every prepared instance is busy (or none were prepared) and the
    /// cache is enabled. With the cache disabled and nothing available the
    /// call is a silent no-op.
    pub fn play_prepared_sound(&mut self, name: &str, params: PlaybackParams) {
        let Some(host) = self.live_host() else { return };
        let mut guard = host.lock();
        let host = &mut *guard;

        if !self.prepared.lookup(name).is_empty() {
            let mut resumed_paused = false;
            if let Some(nodes) = self.prepared.nodes_mut(name) {
                for node in nodes.iter_mut() {
                    if node.is_playing() {
                        continue;
                    }
                    if node.is_paused() {
                        // Resuming a paused node does not end the scan, so a
                        // single call wakes every paused instance of the name.
                        Self::activate(node, host, &params, &self.events);
                        resumed_paused = true;
                    } else {
                        // First idle node short-circuits the whole call.
                        Self::activate(node, host, &params, &self.events);
                        return;
                    }
                }
            }
            if resumed_paused {
                return;
            }
        }

        if self.cache_enabled {
            self.play_temporary(name, params, host);
        } else {
            tracing::debug!(
                "No prepared node free for '{}' and cached sounds are disabled; ignoring",
                name
            );
        }
    }

    /// Play an ad hoc one-off sound, bypassing the prepared pool entirely.
    pub fn play_sound_file(&mut self, name: &str, params: PlaybackParams) {
        let Some(host) = self.live_host() else { return };
        let mut guard = host.lock();
        self.play_temporary(name, params, &mut *guard);
    }

    /// Pause every prepared node matching `name`. Cached nodes are not
    /// affected; an unprepared name is not an error.
    pub fn pause_prepared_sound(&mut self, name: &str) {
        let Some(host) = self.live_host() else { return };
        let mut guard = host.lock();
        let host = &mut *guard;

        let mut matched = false;
        if let Some(nodes) = self.prepared.nodes_mut(name) {
            for node in nodes.iter_mut() {
                if let Some(token) = node.take_pending_completion() {
                    host.cancel_completion(token);
                }
                node.pause();
                host.pause(node.handle());
                matched = true;
            }
        }
        if matched {
            self.events.publish(SoundEvent::PlaybackPaused {
                name: name.to_string(),
            });
        }
    }

    /// Hard-stop every prepared node matching `name` back to idle.
    pub fn stop_prepared_sound(&mut self, name: &str) {
        let Some(host) = self.live_host() else { return };
        let mut guard = host.lock();
        let host = &mut *guard;

        if let Some(nodes) = self.prepared.nodes_mut(name) {
            for node in nodes.iter_mut() {
                if let Some(token) = node.take_pending_completion() {
                    host.cancel_completion(token);
                }
                node.finish();
                host.stop(node.handle());
            }
        }
    }

    /// Update the volume of every prepared node matching `name` without a
    /// state transition.
    pub fn set_volume_of_prepared_sound(&mut self, name: &str, volume: f32) {
        let Some(host) = self.live_host() else { return };
        let mut guard = host.lock();
        let host = &mut *guard;

        let volume = volume.clamp(0.0, 1.0);
        for node in self.prepared.lookup(name) {
            host.set_volume(node.handle(), volume);
        }
    }

    /// True only when at least one prepared node matches `name` and every
    /// matching node is currently playing.
    pub fn sound_is_playing(&self, name: &str) -> bool {
        let nodes = self.prepared.lookup(name);
        if nodes.is_empty() {
            return false;
        }
        nodes.iter().all(AudioNode::is_playing)
    }

    /// Detach and discard every prepared node matching `name`, clearing
    /// any pending completions.
    pub fn remove_prepared_sound(&mut self, name: &str) {
        let Some(host) = self.live_host() else { return };
        let mut guard = host.lock();
        self.prepared.remove(name, &mut *guard);
    }

    /// Detach and discard every prepared node.
    pub fn remove_every_prepared_sound(&mut self) {
        let Some(host) = self.live_host() else { return };
        let mut guard = host.lock();
        self.prepared.remove_all(&mut *guard);
    }

    /// Detach and discard every cached node.
    pub fn remove_every_cached_sound(&mut self) {
        let Some(host) = self.live_host() else { return };
        let mut guard = host.lock();
        let discarded = self.cache.clear(&mut *guard);
        drop(guard);
        if discarded > 0 {
            self.events.publish(SoundEvent::CacheCleared { discarded });
        }
    }

    /// Allow on-demand cached playback again. The cache is not
    /// repopulated; nodes are created lazily on demand.
    pub fn enable_cached_sounds(&mut self) {
        self.cache_enabled = true;
    }

    /// Disable on-demand cached playback and clear the cache immediately.
    pub fn disable_cached_sounds(&mut self) {
        self.cache_enabled = false;
        self.remove_every_cached_sound();
        tracing::info!("Cached sounds disabled");
    }

    pub fn is_cache_enabled(&self) -> bool {
        self.cache_enabled
    }

    /// Called by the host when a scheduled completion fires. Returns the
    /// node to idle and stops it. Completions for unknown or no longer
    /// playing nodes are ignored.
    pub fn handle_completion(&mut self, handle: NodeHandle) {
        let Some(host) = self.live_host() else { return };
        let mut guard = host.lock();
        let host = &mut *guard;

        let node = match self.prepared.find_by_handle_mut(handle) {
            Some(node) => Some(node),
            None => self.cache.find_by_handle_mut(handle),
        };
        let Some(node) = node else {
            tracing::debug!("Completion for unknown node {}; ignoring", handle);
            return;
        };

        node.take_pending_completion();
        if !node.is_playing() {
            return;
        }
        node.finish();
        host.stop(handle);
        self.events.publish(SoundEvent::PlaybackFinished {
            name: node.id().to_string(),
            handle,
        });
    }

    /// Explicit teardown: detaches every node in both pools and cancels
    /// every pending completion. Also runs on drop, so cleanup happens on
    /// every exit path; calling it twice is harmless.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;

        match self.host.upgrade() {
            Some(host) => {
                let mut guard = host.lock();
                self.prepared.remove_all(&mut *guard);
                self.cache.clear(&mut *guard);
            }
            None => {
                // Host already gone; nothing left to detach from.
                self.prepared.discard_all();
                self.cache.discard_all();
            }
        }
        self.events.publish(SoundEvent::Shutdown);
        tracing::info!("Playback controller shut down");
    }

    /// Subscribe to playback events.
    pub fn subscribe_events(&mut self) -> (Receiver<SoundEvent>, SubscriberId) {
        self.events.subscribe()
    }

    pub fn unsubscribe_events(&mut self, id: SubscriberId) {
        self.events.unsubscribe(id);
    }

    /// Read access to the prepared pool.
    pub fn prepared(&self) -> &PreparedPool {
        &self.prepared
    }

    /// Read access to the temporary cache.
    pub fn cache(&self) -> &TemporaryCache {
        &self.cache
    }

    /// Number of prepared nodes for a name.
    pub fn prepared_count(&self, name: &str) -> usize {
        self.prepared.count(name)
    }

    /// Number of nodes currently held by the temporary cache.
    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    /// The defaults this controller was configured with.
    pub fn defaults(&self) -> PlaybackParams {
        self.defaults
    }

    /// Temporary path: reuse the oldest idle cached node for `name`, or
    /// create a fresh one, inserting it into the cache (evicting the
    /// oldest entry when full) before activation.
    fn play_temporary(&mut self, name: &str, params: PlaybackParams, host: &mut dyn AudioHost) {
        if let Some(node) = self.cache.find_available(name) {
            Self::activate(node, host, &params, &self.events);
            return;
        }

        let node = AudioNode::new(name);
        tracing::debug!("Creating cached node {} for '{}'", node.handle(), name);
        if let Some(evicted) = self.cache.insert(node, host) {
            self.events.publish(SoundEvent::NodeEvicted {
                name: evicted.id().to_string(),
                handle: evicted.handle(),
            });
        }
        if let Some(node) = self.cache.newest_mut() {
            Self::activate(node, host, &params, &self.events);
        }
    }

    /// Transition a node into Playing: cancel any stale completion, apply
    /// the volume, make sure the engine is up, start playback, and for
    /// non-looping playback schedule the auto-stop.
    fn activate(
        node: &mut AudioNode,
        host: &mut dyn AudioHost,
        params: &PlaybackParams,
        events: &EventBus,
    ) {
        if let Some(token) = node.take_pending_completion() {
            host.cancel_completion(token);
        }
        host.set_volume(node.handle(), params.volume);
        if let Err(err) = host.ensure_engine_running() {
            // Best effort: playback proceeds as if the engine were up.
            tracing::error!("Failed to start audio engine: {}", err);
        }
        node.begin_playing(params.looped);
        host.play(node.handle(), params.looped);
        if !params.looped {
            let token = host.schedule_completion(node.handle(), params.duration);
            node.set_pending_completion(token);
        }
        tracing::debug!(
            "Node {} playing '{}' (loop={}, volume={})",
            node.handle(),
            node.id(),
            params.looped,
            params.volume
        );
        events.publish(SoundEvent::PlaybackStarted {
            name: node.id().to_string(),
            handle: node.handle(),
        });
    }

    fn live_host(&self) -> Option<Arc<Mutex<dyn AudioHost>>> {
        if self.shut_down {
            tracing::debug!("Playback controller already shut down; ignoring request");
            return None;
        }
        let host = self.host.upgrade();
        if host.is_none() {
            tracing::warn!("Audio host is gone; ignoring request");
        }
        host
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
