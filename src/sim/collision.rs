//! Narrow-phase collision detection and response
//!
//! Every routine takes the circle as the receiver: rectangles and lines are
//! static, so only the circle's position and velocity are ever touched.
//! Resolution mutates through exclusive references and never fails; degenerate
//! geometry degrades to NaN instead.

use super::body::{BodyKind, Circle, LineSegment, Rectangle, ShapeRef};
use super::vector::{Vector2, VectorExt, reflect};
use crate::consts::MIN_CIRCLE_DISTANCE;

/// Closest point on (or in) the rectangle to `p`
#[inline]
pub fn closest_point_on_rect(p: Vector2, rect: &Rectangle) -> Vector2 {
    let (min, max) = (rect.pos(), rect.max());
    Vector2::new(min.x.max(p.x.min(max.x)), min.y.max(p.y.min(max.y)))
}

/// Resolve a dynamic circle against a static rectangle
///
/// The push-out axis is chosen by which edge the closest point sits on, in
/// the order top, bottom, left, right. A center that ended up inside the
/// rectangle is pushed back by its whole velocity instead.
///
/// Returns whether the shapes were touching.
pub fn circle_rect(circle: &mut Circle, rect: &Rectangle) -> bool {
    // Closest point; touching exactly at the radius is a miss
    let nearest = closest_point_on_rect(circle.pos, rect);
    if !circle.is_hit(nearest.x, nearest.y) {
        return false;
    }

    circle.notify_hit(ShapeRef::Rectangle(rect));

    let dist = (nearest - circle.pos).length();
    let overlap = (circle.radius - dist).abs();

    // Edge priority: top, bottom, left, right
    let top_left = rect.pos();
    let bottom_right = rect.max();
    let push = if nearest.y == top_left.y {
        Vector2::new(0.0, -overlap)
    } else if nearest.y == bottom_right.y {
        Vector2::new(0.0, overlap)
    } else if nearest.x == top_left.x {
        Vector2::new(-overlap, 0.0)
    } else if nearest.x == bottom_right.x {
        Vector2::new(overlap, 0.0)
    } else {
        // Center inside: back out along the motion
        -circle.vel
    };

    circle.translate(push);
    // Bounce on whichever axis was pushed
    if push.x != 0.0 {
        circle.vel = circle.vel.scale_xy(-circle.restitution(), 1.0);
    }
    if push.y != 0.0 {
        circle.vel = circle.vel.scale_xy(1.0, -circle.restitution());
    }
    true
}

/// Parameters where this step's motion crosses the wall
///
/// `t_wall` is the fraction along the wall, `t_motion` the fraction along the
/// motion. `None` when the two are parallel.
pub fn sweep_against_line(prev_pos: Vector2, motion: Vector2, line: &LineSegment) -> Option<(f64, f64)> {
    let denom = motion.cross(line.dir());
    if denom == 0.0 {
        return None;
    }
    let to_start = line.start() - prev_pos;
    let t_wall = to_start.cross(motion) / denom;
    let t_motion = to_start.cross(line.dir()) / denom;
    Some((t_wall, t_motion))
}

/// Resolve a dynamic circle against a static line segment
///
/// The circle is treated as a point swept along its velocity from where it
/// was before this step. On a crossing the move is undone and the velocity is
/// mirrored about the wall normal, then scaled by both restitutions. The
/// circle is not pushed any further; the next step carries it away.
///
/// Returns whether the motion crossed the wall.
pub fn circle_line(circle: &mut Circle, line: &LineSegment) -> bool {
    // Position before this step's integration
    let prev_pos = circle.pos - circle.vel;
    let Some((t_wall, t_motion)) = sweep_against_line(prev_pos, circle.vel, line) else {
        return false;
    };
    // Both ends inclusive: touching an endpoint or ending on the wall counts
    let crossed = (0.0..=1.0).contains(&t_wall) && (0.0..=1.0).contains(&t_motion);
    if !crossed {
        return false;
    }

    // Undo the move, then reflect
    circle.translate(-circle.vel);
    circle.vel = reflect(circle.vel, line.normal()).scale(line.restitution() * circle.restitution());
    true
}

/// Resolve two circles against each other
///
/// Only dynamic circles move. Against a static circle the dynamic one takes
/// the whole overlap and is reflected with its own restitution. Two dynamic
/// circles split the overlap and swap their normal velocity components
/// (equal-mass elastic exchange, no restitution).
///
/// Returns whether the circles were touching.
pub fn circle_circle(a: &mut Circle, b: &mut Circle) -> bool {
    let d2 = (b.pos - a.pos).length_squared();
    let reach = a.radius + b.radius;
    if d2 >= reach * reach {
        return false;
    }

    a.notify_hit(ShapeRef::Circle(b));
    b.notify_hit(ShapeRef::Circle(a));

    // Floor the distance so coincident centers do not divide by zero
    let distance = d2.sqrt().max(MIN_CIRCLE_DISTANCE);
    let overlap = reach - distance;
    let normal_a = (a.pos - b.pos).scale(1.0 / distance);
    let normal_b = -normal_a;

    match (a.kind(), b.kind()) {
        (BodyKind::Dynamic, BodyKind::Static) => {
            push_off_static(a, normal_a, overlap);
        }
        (BodyKind::Static, BodyKind::Dynamic) => {
            push_off_static(b, normal_b, overlap);
        }
        (BodyKind::Dynamic, BodyKind::Dynamic) => {
            // Split the overlap, then swap normal components
            a.translate(normal_a.scale(overlap / 2.0));
            b.translate(normal_b.scale(overlap / 2.0));

            let (a_normal, a_tangent) = decompose(a.vel, normal_a);
            let (b_normal, b_tangent) = decompose(b.vel, normal_b);
            a.vel = b_normal + a_tangent;
            b.vel = a_normal + b_tangent;
        }
        (BodyKind::Static, BodyKind::Static) => {}
    }
    true
}

fn push_off_static(circle: &mut Circle, normal: Vector2, overlap: f64) {
    circle.translate(normal.scale(overlap));
    circle.vel = reflect(circle.vel, normal).scale(circle.restitution());
}

/// Split `v` into its components along `normal` and along the tangent
/// (`normal` rotated a quarter turn)
fn decompose(v: Vector2, normal: Vector2) -> (Vector2, Vector2) {
    let tangent = normal.perp();
    (normal.scale(normal.dot(v)), tangent.scale(tangent.dot(v)))
}
