//! Physics simulation module
//!
//! Everything that moves bodies lives here. This module must stay
//! deterministic:
//! - Caller-supplied tick size only
//! - Stable iteration order (insertion order)
//! - No rendering, input or platform dependencies

pub mod body;
pub mod collision;
pub mod engine;
pub mod vector;

pub use body::{Body, BodyKind, Circle, Entity, EntityId, HitCallback, LineSegment, Rectangle, ShapeRef};
pub use collision::{circle_circle, circle_line, circle_rect};
pub use engine::{Engine, WorldBounds, resolve_pair};
pub use vector::{Vector2, VectorExt, reflect};
