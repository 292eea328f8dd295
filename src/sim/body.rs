//! Bodies and shapes
//!
//! Three shapes live in the world: dynamic or static circles, static
//! axis-aligned rectangles and static line segments. Only circles ever move.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::vector::{Vector2, VectorExt};
use crate::consts::*;

/// Whether a body takes part in integration and collision response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    /// Immovable, infinite mass
    Static,
    /// Moves under integration and collision response
    #[default]
    Dynamic,
}

/// Engine-assigned identity of an entity, never reused within one engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Borrowed view of the other party in a collision
#[derive(Debug, Clone, Copy)]
pub enum ShapeRef<'a> {
    Circle(&'a Circle),
    Rectangle(&'a Rectangle),
    Line(&'a LineSegment),
}

/// Collision notification: `(self, other)`. Cannot alter the outcome.
///
/// The callback is moved out of its circle while it runs, so inside the call
/// `self.has_on_hit()` reports `false`. It is put back afterwards.
pub type HitCallback = Box<dyn FnMut(&Circle, ShapeRef<'_>)>;

/// A circle, the only shape that can be dynamic
pub struct Circle {
    pub pos: Vector2,
    pub radius: f64,
    kind: BodyKind,
    restitution: f64,
    damping: f64,
    pub vel: Vector2,
    pub accel: Vector2,
    on_hit: Option<HitCallback>,
}

impl Circle {
    /// Dynamic circle with default restitution and no damping
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Self {
            pos: Vector2::new(x, y),
            radius,
            kind: BodyKind::Dynamic,
            restitution: DEFAULT_RESTITUTION,
            damping: DEFAULT_DAMPING,
            vel: Vector2::ZERO,
            accel: Vector2::ZERO,
            on_hit: None,
        }
    }

    pub fn with_kind(mut self, kind: BodyKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_restitution(mut self, restitution: f64) -> Self {
        self.restitution = restitution;
        self
    }

    /// Per-step velocity multiplier (1.0 = no decay)
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_velocity(mut self, vx: f64, vy: f64) -> Self {
        self.vel = Vector2::new(vx, vy);
        self
    }

    pub fn with_acceleration(mut self, ax: f64, ay: f64) -> Self {
        self.accel = Vector2::new(ax, ay);
        self
    }

    pub fn with_on_hit(mut self, callback: impl FnMut(&Circle, ShapeRef<'_>) + 'static) -> Self {
        self.on_hit = Some(Box::new(callback));
        self
    }

    #[inline]
    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    #[inline]
    pub fn is_dynamic(&self) -> bool {
        self.kind == BodyKind::Dynamic
    }

    #[inline]
    pub fn restitution(&self) -> f64 {
        self.restitution
    }

    #[inline]
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Replace (or clear) the collision callback between steps
    pub fn set_on_hit(&mut self, callback: Option<HitCallback>) {
        self.on_hit = callback;
    }

    pub fn has_on_hit(&self) -> bool {
        self.on_hit.is_some()
    }

    /// True iff the point is strictly inside the circle
    pub fn is_hit(&self, px: f64, py: f64) -> bool {
        let d2 = (Vector2::new(px, py) - self.pos).length_squared();
        d2 < self.radius * self.radius
    }

    #[inline]
    pub(crate) fn translate(&mut self, delta: Vector2) {
        self.pos += delta;
    }

    /// Fire the callback, if any. The callback is lent out for the duration
    /// of the call so it can observe `self` immutably.
    pub(crate) fn notify_hit(&mut self, other: ShapeRef<'_>) {
        if let Some(mut callback) = self.on_hit.take() {
            callback(self, other);
            self.on_hit = Some(callback);
        }
    }
}

impl fmt::Debug for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Circle")
            .field("pos", &self.pos)
            .field("radius", &self.radius)
            .field("kind", &self.kind)
            .field("restitution", &self.restitution)
            .field("damping", &self.damping)
            .field("vel", &self.vel)
            .field("accel", &self.accel)
            .field("on_hit", &self.on_hit.is_some())
            .finish()
    }
}

/// An axis-aligned static rectangle, positioned by its top-left corner
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pos: Vector2,
    width: f64,
    height: f64,
}

impl Rectangle {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            pos: Vector2::new(x, y),
            width,
            height,
        }
    }

    /// Top-left corner
    #[inline]
    pub fn pos(&self) -> Vector2 {
        self.pos
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vector2 {
        self.pos + Vector2::new(self.width, self.height)
    }

    /// Containment test, inclusive on every edge
    pub fn is_hit(&self, px: f64, py: f64) -> bool {
        let max = self.max();
        self.pos.x <= px && px <= max.x && self.pos.y <= py && py <= max.y
    }
}

/// A static, infinitely thin wall between two points
///
/// Direction, unit normal and midpoint are derived once at construction. A
/// zero-length segment yields a NaN normal; that input is not rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSegment {
    start: Vector2,
    end: Vector2,
    dir: Vector2,
    normal: Vector2,
    midpoint: Vector2,
    restitution: f64,
}

impl LineSegment {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        let start = Vector2::new(x0, y0);
        let end = Vector2::new(x1, y1);
        let dir = end - start;
        let length = dir.length();
        let normal = Vector2::new(y0 - y1, x1 - x0).scale(1.0 / length);
        Self {
            start,
            end,
            dir,
            normal,
            midpoint: (start + end).scale(0.5),
            restitution: DEFAULT_RESTITUTION,
        }
    }

    pub fn with_restitution(mut self, restitution: f64) -> Self {
        self.restitution = restitution;
        self
    }

    #[inline]
    pub fn start(&self) -> Vector2 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Vector2 {
        self.end
    }

    /// `end - start`
    #[inline]
    pub fn dir(&self) -> Vector2 {
        self.dir
    }

    /// Unit normal, `dir` rotated a quarter turn counter-clockwise
    #[inline]
    pub fn normal(&self) -> Vector2 {
        self.normal
    }

    #[inline]
    pub fn midpoint(&self) -> Vector2 {
        self.midpoint
    }

    #[inline]
    pub fn restitution(&self) -> f64 {
        self.restitution
    }

    /// Lines have no area; only a point lying exactly on the segment hits
    pub fn is_hit(&self, px: f64, py: f64) -> bool {
        let p = Vector2::new(px, py);
        let to_p = p - self.start;
        to_p.cross(self.dir) == 0.0
            && (0.0..=self.dir.length_squared()).contains(&to_p.dot(self.dir))
    }
}

/// Any body the engine can hold
#[derive(Debug)]
pub enum Body {
    Circle(Circle),
    Rectangle(Rectangle),
    Line(LineSegment),
}

impl Body {
    /// Nominal position used for bounds checks: circle center, rectangle
    /// top-left, line midpoint
    pub fn position(&self) -> Vector2 {
        match self {
            Body::Circle(c) => c.pos,
            Body::Rectangle(r) => r.pos(),
            Body::Line(l) => l.midpoint(),
        }
    }

    pub fn kind(&self) -> BodyKind {
        match self {
            Body::Circle(c) => c.kind(),
            Body::Rectangle(_) | Body::Line(_) => BodyKind::Static,
        }
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.kind() == BodyKind::Static
    }

    pub fn is_hit(&self, px: f64, py: f64) -> bool {
        match self {
            Body::Circle(c) => c.is_hit(px, py),
            Body::Rectangle(r) => r.is_hit(px, py),
            Body::Line(l) => l.is_hit(px, py),
        }
    }

    pub fn as_circle(&self) -> Option<&Circle> {
        match self {
            Body::Circle(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_circle_mut(&mut self) -> Option<&mut Circle> {
        match self {
            Body::Circle(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_shape_ref(&self) -> ShapeRef<'_> {
        match self {
            Body::Circle(c) => ShapeRef::Circle(c),
            Body::Rectangle(r) => ShapeRef::Rectangle(r),
            Body::Line(l) => ShapeRef::Line(l),
        }
    }
}

impl From<Circle> for Body {
    fn from(circle: Circle) -> Self {
        Body::Circle(circle)
    }
}

impl From<Rectangle> for Body {
    fn from(rect: Rectangle) -> Self {
        Body::Rectangle(rect)
    }
}

impl From<LineSegment> for Body {
    fn from(line: LineSegment) -> Self {
        Body::Line(line)
    }
}

/// A body together with its engine-assigned identity
///
/// Only the engine creates entities. Hosts read them through
/// [`Engine::entities`](super::Engine::entities) and change circles through
/// [`Engine::circle_mut`](super::Engine::circle_mut), so neither the id nor
/// the shape of a live entity can be swapped.
#[derive(Debug)]
pub struct Entity {
    id: EntityId,
    pub(crate) body: Body,
}

impl Entity {
    pub(crate) fn new(id: EntityId, body: Body) -> Self {
        Self { id, body }
    }

    #[inline]
    pub fn id(&self) -> EntityId {
        self.id
    }

    #[inline]
    pub fn body(&self) -> &Body {
        &self.body
    }

    pub(crate) fn into_body(self) -> Body {
        self.body
    }
}
