//! Scene audio node pooling
//!
//! Manages a bounded pool of reusable sound-emitting nodes inside a
//! real-time audio scene. Two allocation strategies are offered:
//! explicitly prepared nodes (preloaded, long-lived, multiple instances
//! per sound name) and on-demand cached nodes (created lazily, retained
//! in a fixed-capacity pool, evicted oldest-first once full).
//!
//! The crate decides *which node* plays a named sound, *how many*
//! instances may exist per name, and *when* a cached node is evicted.
//! Everything audible lives behind the [`AudioHost`] trait implemented by
//! the embedding application.
//!
//! ## Architecture
//!
//! ```text
//! PlaybackController
//!   ├── PreparedPool        name -> [AudioNode, AudioNode, ...]
//!   ├── TemporaryCache      [AudioNode, ...] (FIFO, bounded)
//!   ├── EventBus            playback notifications
//!   └── Weak<Mutex<dyn AudioHost>>   non-owning host reference
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use scene_audio::{AudioHost, PlaybackController, PlaybackParams, SharedHost};
//!
//! let host: SharedHost = Arc::new(Mutex::new(MySceneHost::new()));
//! let mut audio = PlaybackController::new(&host);
//!
//! // Preload three concurrent instances of a frequent effect
//! audio.set_max_concurrent_playback("laser", 3);
//!
//! // Play it; busy instances fall back to the cached pool
//! audio.play_prepared_sound("laser", PlaybackParams::default());
//!
//! // Ad hoc one-off sound, cached pool only
//! audio.play_sound_file("announcer", PlaybackParams::new().with_volume(0.8));
//! ```

pub mod bus;
pub mod cache;
pub mod controller;
pub mod error;
pub mod events;
pub mod host;
pub mod node;
pub mod params;
pub mod prepared;
pub mod settings;

// Re-export commonly used types
pub use bus::{EventBus, SubscriberId};
pub use cache::{TemporaryCache, DEFAULT_CACHE_CAPACITY};
pub use controller::{PlaybackController, SharedHost};
pub use error::{AppResult, EngineError, SettingsError};
pub use events::SoundEvent;
pub use host::{AudioHost, CompletionToken};
pub use node::{AudioNode, NodeHandle};
pub use params::PlaybackParams;
pub use prepared::PreparedPool;
pub use settings::AudioSettings;
