//! Tiny2D - a minimal discrete-time 2D physics engine for arcade games
//!
//! Core modules:
//! - `sim`: Bodies, narrow-phase collision and the stepping engine
//! - `tags`: Host-owned per-entity data kept beside the engine
//! - `settings`: Serializable engine configuration
//! - `scene`: JSON scene descriptions and built-in scenes

pub mod scene;
pub mod settings;
pub mod sim;
pub mod tags;

pub use scene::{BodyDesc, SceneDesc, SceneError};
pub use settings::{EngineSettings, SettingsError};
pub use sim::{Body, BodyKind, Circle, Engine, EntityId, LineSegment, Rectangle, Vector2, WorldBounds};
pub use tags::Tags;

/// Engine defaults and numeric constants
pub mod consts {
    /// Restitution for circles and lines when none is given
    pub const DEFAULT_RESTITUTION: f64 = 0.9;
    /// Damping for circles when none is given (no decay)
    pub const DEFAULT_DAMPING: f64 = 1.0;
    /// Floor for the center distance of two overlapping circles
    pub const MIN_CIRCLE_DISTANCE: f64 = 0.01;

    /// Default world rectangle
    pub const DEFAULT_WORLD_X: f64 = 0.0;
    pub const DEFAULT_WORLD_Y: f64 = 0.0;
    pub const DEFAULT_WORLD_WIDTH: f64 = 1000.0;
    pub const DEFAULT_WORLD_HEIGHT: f64 = 1000.0;

    /// Tick size the demo host steps with (seconds)
    pub const DEFAULT_TICK_DT: f64 = 0.01;
}
