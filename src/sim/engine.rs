//! World stepping
//!
//! The engine owns every body in insertion order. One `step` integrates all
//! dynamic circles, drops whatever left the world rectangle, then resolves
//! every unordered pair in collection order. That order is observable: a body
//! touching several others sees each resolution applied in turn.

use serde::{Deserialize, Serialize};

use super::body::{Body, Circle, Entity, EntityId};
use super::collision::{circle_circle, circle_line, circle_rect};
use super::vector::{Vector2, VectorExt};
use crate::consts::*;

/// Axis-aligned world rectangle, inclusive on every edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            x: DEFAULT_WORLD_X,
            y: DEFAULT_WORLD_Y,
            width: DEFAULT_WORLD_WIDTH,
            height: DEFAULT_WORLD_HEIGHT,
        }
    }
}

impl WorldBounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, p: Vector2) -> bool {
        self.x <= p.x && p.x <= self.x + self.width && self.y <= p.y && p.y <= self.y + self.height
    }
}

/// The physics world
#[derive(Debug)]
pub struct Engine {
    world: WorldBounds,
    gravity: Vector2,
    entities: Vec<Entity>,
    next_id: u64,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(WorldBounds::default(), Vector2::ZERO)
    }
}

impl Engine {
    pub fn new(world: WorldBounds, gravity: Vector2) -> Self {
        Self {
            world,
            gravity,
            entities: Vec::new(),
            next_id: 1,
        }
    }

    #[inline]
    pub fn world(&self) -> WorldBounds {
        self.world
    }

    #[inline]
    pub fn gravity(&self) -> Vector2 {
        self.gravity
    }

    pub fn set_gravity(&mut self, x: f64, y: f64) {
        self.gravity = Vector2::new(x, y);
    }

    /// Append a body; later bodies are resolved after earlier ones
    pub fn add(&mut self, body: impl Into<Body>) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.push(Entity::new(id, body.into()));
        id
    }

    /// Remove a body, keeping the relative order of the rest
    pub fn remove(&mut self, id: EntityId) -> Option<Body> {
        let index = self.entities.iter().position(|e| e.id() == id)?;
        Some(self.entities.remove(index).into_body())
    }

    /// Keep only the entities for which `keep` returns true
    pub fn retain(&mut self, mut keep: impl FnMut(&Entity) -> bool) {
        self.entities.retain(|e| keep(e));
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }

    pub fn get(&self, id: EntityId) -> Option<&Body> {
        self.entities.iter().find(|e| e.id() == id).map(Entity::body)
    }

    /// Mutable access to a circle's state between steps. `None` for other
    /// shapes, which have nothing the host may change.
    pub fn circle_mut(&mut self, id: EntityId) -> Option<&mut Circle> {
        self.entities
            .iter_mut()
            .find(|e| e.id() == id)
            .and_then(|e| e.body.as_circle_mut())
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.iter().any(|e| e.id() == id)
    }

    /// All entities in collection order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Every circle with its id, in collection order
    pub fn circles_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut Circle)> + '_ {
        self.entities
            .iter_mut()
            .filter_map(|e| {
                let id = e.id();
                e.body.as_circle_mut().map(|c| (id, c))
            })
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Circles under the point, in collection order
    pub fn pick(&self, px: f64, py: f64) -> impl Iterator<Item = EntityId> + '_ {
        self.entities
            .iter()
            .filter(move |e| matches!(e.body(), Body::Circle(c) if c.is_hit(px, py)))
            .map(Entity::id)
    }

    /// Advance the world by `dt` seconds
    ///
    /// Gravity and acceleration are scaled by `dt²` before being added to the
    /// velocity, and the velocity is then added to the position unscaled.
    /// Existing scenes are tuned against exactly this.
    pub fn step(&mut self, dt: f64) {
        let gravity_step = self.gravity.scale(dt * dt);

        // Integrate: only dynamic circles move
        for entity in &mut self.entities {
            let Body::Circle(circle) = &mut entity.body else {
                continue;
            };
            if !circle.is_dynamic() {
                continue;
            }
            // Velocity first, then position by the new velocity (no dt here)
            let accel_step = circle.accel.scale(dt * dt);
            circle.vel = (circle.vel + gravity_step + accel_step).scale(circle.damping());
            circle.translate(circle.vel);
        }

        // Prune anything whose anchor left the world rectangle
        let world = self.world;
        let before = self.entities.len();
        self.entities.retain(|e| world.contains(e.body.position()));
        let removed = before - self.entities.len();
        if removed > 0 {
            log::trace!("Removed {} out-of-bounds bodies", removed);
        }

        // Every unordered pair once, earlier body first
        let count = self.entities.len();
        for i in 0..count {
            for j in (i + 1)..count {
                let (head, tail) = self.entities.split_at_mut(j);
                resolve_pair(&mut head[i].body, &mut tail[0].body);
            }
        }
    }
}

/// Route a pair to its narrow-phase routine, circle first. Returns whether
/// the pair was in contact. Pairs without a circle never interact.
pub fn resolve_pair(first: &mut Body, second: &mut Body) -> bool {
    // Two static bodies never interact
    if first.is_static() && second.is_static() {
        return false;
    }
    match (first, second) {
        (Body::Circle(a), Body::Circle(b)) => circle_circle(a, b),
        (Body::Circle(c), Body::Line(l)) | (Body::Line(l), Body::Circle(c)) => circle_line(c, l),
        (Body::Circle(c), Body::Rectangle(r)) | (Body::Rectangle(r), Body::Circle(c)) => {
            circle_rect(c, r)
        }
        _ => false,
    }
}
