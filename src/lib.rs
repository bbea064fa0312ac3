//! # showcase-core-view
//!
//! Core playback and navigation library for interactive product showcases.
//!
//! This crate provides platform-agnostic data structures and logic for:
//! - Describing showcased items and their pre-rendered frame sequences
//! - Fetching frames through a session-wide cache with progress reporting
//! - Playing a sequence forward on open and backward on close, with
//!   drag scrubbing and spring-smoothed display
//! - Coordinating views so an item's closing pass finishes before the next
//!   view mounts
//! - Rendering frames to canvas with cover fit (with optional web support)
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization for data structures
//! - `toml` - Load catalogs and configuration from TOML documents
//! - `web` - Enable web/WASM canvas rendering and image fetching
//!
//! ## Example
//!
//! ```rust,ignore
//! use showcase_core_view::{
//!     Navigation, PlayerConfig, ResourceCache, SequencePlayer, ShowcaseConfig, ViewCoordinator,
//! };
//! use showcase_core_view::loader::web::WebImageFetcher;
//!
//! let config = ShowcaseConfig::from_toml_str(include_str!("../assets/catalog.toml"))?;
//! let cache = ResourceCache::new(WebImageFetcher);
//! let mut nav = ViewCoordinator::new(config.catalog.clone());
//!
//! nav.select_item("stm32");
//! let item = nav.active_item().unwrap();
//! let mut player = SequencePlayer::mount(item.image_sequence.clone(), config.player.clone(), false);
//! wasm_bindgen_futures::spawn_local(player.load(&cache));
//!
//! // Every animation frame
//! let outcome = player.tick(now_ms, &mut surface);
//! if outcome.exit_complete {
//!     nav.on_item_exit_complete();
//! }
//!
//! // Leaving the item starts its closing pass
//! if let Navigation::ExitStarted { .. } = nav.request_overview() {
//!     player.set_closing(true);
//! }
//! ```

mod animation;
mod catalog;
mod color;
mod config;
mod coordinator;
mod data;
pub mod loader;
mod player;
pub mod render;
mod sizing;
mod spring;
mod transition;

pub use animation::{frame_for_position, Advance, Direction, PlaybackController};
pub use catalog::{Catalog, CatalogError};
pub use color::{parse_color, ThemeColor};
pub use config::{PlayerConfig, ShowcaseConfig};
pub use coordinator::{Navigation, View, ViewCoordinator};
pub use data::{ImageSequence, Item, SpecEntry, FRAME_EXTENSION, FRAME_NUMBER_WIDTH};
pub use loader::{FetchError, FrameFetcher, LoadingProgress, ResourceCache};
pub use player::{SequencePlayer, TickOutcome};
pub use render::{FrameImage, FrameSurface, RenderPlan};
pub use sizing::{CoverFit, SurfaceSize};
pub use spring::{Spring, SpringConfig};
pub use transition::{CubicBezier, Keyframe, ViewKind, ViewTransition};

#[cfg(feature = "web")]
pub use loader::web::WebImageFetcher;
#[cfg(feature = "web")]
pub use render::web::{device_pixel_ratio, CanvasSurface};
