//! Scene descriptions
//!
//! A scene is settings plus an ordered list of bodies. Order matters: it is
//! the engine's resolution order.

use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::EngineSettings;
use crate::sim::{Body, BodyKind, Circle, Engine, LineSegment, Rectangle, Vector2, WorldBounds};

/// Errors loading a scene
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("failed to read scene from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scene JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn default_restitution() -> f64 {
    DEFAULT_RESTITUTION
}

fn default_damping() -> f64 {
    DEFAULT_DAMPING
}

/// Serializable description of one body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum BodyDesc {
    Circle {
        x: f64,
        y: f64,
        radius: f64,
        #[serde(default)]
        kind: BodyKind,
        #[serde(default = "default_restitution")]
        restitution: f64,
        #[serde(default = "default_damping")]
        damping: f64,
        #[serde(default)]
        velocity: Vector2,
        #[serde(default)]
        acceleration: Vector2,
    },
    Rectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Line {
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        #[serde(default = "default_restitution")]
        restitution: f64,
    },
}

impl BodyDesc {
    /// A dynamic circle with default restitution and damping
    pub fn circle(x: f64, y: f64, radius: f64) -> Self {
        BodyDesc::Circle {
            x,
            y,
            radius,
            kind: BodyKind::Dynamic,
            restitution: DEFAULT_RESTITUTION,
            damping: DEFAULT_DAMPING,
            velocity: Vector2::ZERO,
            acceleration: Vector2::ZERO,
        }
    }

    pub fn to_body(&self) -> Body {
        match *self {
            BodyDesc::Circle {
                x,
                y,
                radius,
                kind,
                restitution,
                damping,
                velocity,
                acceleration,
            } => Circle::new(x, y, radius)
                .with_kind(kind)
                .with_restitution(restitution)
                .with_damping(damping)
                .with_velocity(velocity.x, velocity.y)
                .with_acceleration(acceleration.x, acceleration.y)
                .into(),
            BodyDesc::Rectangle { x, y, width, height } => Rectangle::new(x, y, width, height).into(),
            BodyDesc::Line {
                x0,
                y0,
                x1,
                y1,
                restitution,
            } => LineSegment::new(x0, y0, x1, y1)
                .with_restitution(restitution)
                .into(),
        }
    }
}

/// Settings plus bodies in resolution order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDesc {
    #[serde(default)]
    pub settings: EngineSettings,
    #[serde(default)]
    pub bodies: Vec<BodyDesc>,
}

impl SceneDesc {
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let scene = Self::from_json(&json)?;
        log::info!("Loaded scene from {} ({} bodies)", path.display(), scene.bodies.len());
        Ok(scene)
    }

    /// A fresh engine holding this scene's bodies in order
    pub fn build(&self) -> Engine {
        let mut engine = self.settings.build_engine();
        for desc in &self.bodies {
            engine.add(desc.to_body());
        }
        log::debug!(
            "Built scene: {} bodies, gravity {:?}, world {:?}",
            engine.len(),
            engine.gravity(),
            engine.world()
        );
        engine
    }
}

/// Radius of the fruit in the fruit-bin scene
pub const FRUIT_RADIUS: f64 = 25.0;
/// Fruit damping: bleed off a little speed every step so the pile settles
pub const FRUIT_DAMPING: f64 = 0.98;
/// Fruit bounce off walls and each other without loss
pub const FRUIT_RESTITUTION: f64 = 1.0;
/// Distinct fruit kinds the host can tag circles with
pub const FRUIT_KINDS: u32 = 5;

/// Open-topped bin of fruit: two side walls, a floor and a 7x10 grid of
/// circles with a few pixels of seeded jitter so the pile does not stack
/// perfectly
pub fn fruit_bin(seed: u64) -> SceneDesc {
    let mut rng = Pcg32::seed_from_u64(seed);

    let settings = EngineSettings {
        world: WorldBounds::new(-100.0, -100.0, 700.0, 700.0),
        gravity: Vector2::new(0.0, 9.8),
        ..Default::default()
    };

    let mut bodies = vec![
        BodyDesc::Rectangle { x: -60.0, y: -100.0, width: 100.0, height: 800.0 },
        BodyDesc::Rectangle { x: 500.0, y: -100.0, width: 100.0, height: 800.0 },
        BodyDesc::Rectangle { x: -60.0, y: 520.0, width: 700.0, height: 100.0 },
    ];

    for col in 0..7 {
        for row in 0..10 {
            let x = f64::from(col) * 60.0 + 75.0 + f64::from(rng.random_range(0..5u32));
            let y = f64::from(row) * 50.0 + 50.0 + f64::from(rng.random_range(0..5u32));
            bodies.push(fruit_desc(x, y));
        }
    }

    SceneDesc { settings, bodies }
}

fn fruit_desc(x: f64, y: f64) -> BodyDesc {
    BodyDesc::Circle {
        x,
        y,
        radius: FRUIT_RADIUS,
        kind: BodyKind::Dynamic,
        restitution: FRUIT_RESTITUTION,
        damping: FRUIT_DAMPING,
        velocity: Vector2::ZERO,
        acceleration: Vector2::ZERO,
    }
}

/// A replacement fruit dropped in at the top of the bin
pub fn respawn_fruit(rng: &mut impl Rng) -> Circle {
    let x = 75.0 + f64::from(rng.random_range(0..350u32));
    Circle::new(x, 0.0, FRUIT_RADIUS)
        .with_restitution(FRUIT_RESTITUTION)
        .with_damping(FRUIT_DAMPING)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_defaults() {
        let json = r#"{
            "settings": { "world": { "x": 0, "y": 0, "width": 100, "height": 100 } },
            "bodies": [
                { "shape": "line", "x0": 0, "y0": 0, "x1": 100, "y1": 0 },
                { "shape": "circle", "x": 50, "y": -3, "radius": 5, "velocity": [0, 5] },
                { "shape": "circle", "x": 10, "y": 10, "radius": 5, "kind": "static" },
                { "shape": "rectangle", "x": 0, "y": 90, "width": 100, "height": 10 }
            ]
        }"#;
        let scene = SceneDesc::from_json(json).unwrap();
        assert_eq!(scene.bodies.len(), 4);
        assert_eq!(scene.settings.tick_dt, DEFAULT_TICK_DT);
        match &scene.bodies[1] {
            BodyDesc::Circle {
                kind,
                restitution,
                damping,
                velocity,
                ..
            } => {
                assert_eq!(*kind, BodyKind::Dynamic);
                assert_eq!(*restitution, 0.9);
                assert_eq!(*damping, 1.0);
                assert_eq!(*velocity, Vector2::new(0.0, 5.0));
            }
            other => panic!("expected circle, got {other:?}"),
        }
        match &scene.bodies[0] {
            BodyDesc::Line { restitution, .. } => assert_eq!(*restitution, 0.9),
            other => panic!("expected line, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_shape_is_an_error() {
        let err = SceneDesc::from_json(r#"{ "bodies": [ { "shape": "triangle" } ] }"#).unwrap_err();
        assert!(matches!(err, SceneError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = SceneDesc::load("/nonexistent/tiny2d/scene.json").unwrap_err();
        assert!(matches!(err, SceneError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/tiny2d/scene.json"));
    }

    #[test]
    fn test_build_keeps_order_and_kinds() {
        let scene = SceneDesc {
            settings: EngineSettings::default(),
            bodies: vec![
                BodyDesc::Rectangle { x: 0.0, y: 0.0, width: 10.0, height: 10.0 },
                BodyDesc::circle(50.0, 50.0, 5.0),
                BodyDesc::Line { x0: 0.0, y0: 0.0, x1: 10.0, y1: 0.0, restitution: 0.5 },
            ],
        };
        let engine = scene.build();
        let shapes: Vec<_> = engine
            .entities()
            .iter()
            .map(|e| match e.body() {
                Body::Circle(_) => "circle",
                Body::Rectangle(_) => "rectangle",
                Body::Line(_) => "line",
            })
            .collect();
        assert_eq!(shapes, vec!["rectangle", "circle", "line"]);
        match engine.entities()[2].body() {
            Body::Line(l) => assert_eq!(l.restitution(), 0.5),
            other => panic!("expected line, got {other:?}"),
        }
    }

    #[test]
    fn test_json_round_trip() {
        let scene = fruit_bin(1);
        let json = scene.to_json().unwrap();
        assert_eq!(SceneDesc::from_json(&json).unwrap(), scene);
    }

    #[test]
    fn test_fruit_bin_layout() {
        let scene = fruit_bin(42);
        assert_eq!(scene.bodies.len(), 3 + 70);
        assert_eq!(scene.settings.gravity, Vector2::new(0.0, 9.8));
        for desc in &scene.bodies[3..] {
            match desc {
                BodyDesc::Circle { x, y, radius, damping, .. } => {
                    assert_eq!(*radius, FRUIT_RADIUS);
                    assert_eq!(*damping, FRUIT_DAMPING);
                    assert!((75.0..=439.0).contains(x));
                    assert!((50.0..=504.0).contains(y));
                }
                other => panic!("expected circle, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_fruit_bin_is_seeded() {
        assert_eq!(fruit_bin(7), fruit_bin(7));
        assert_ne!(fruit_bin(7), fruit_bin(8));
    }

    #[test]
    fn test_fruit_bin_stays_contained() {
        let mut engine = fruit_bin(3).build();
        for _ in 0..300 {
            engine.step(DEFAULT_TICK_DT);
        }
        // Nothing escapes the walls
        assert_eq!(engine.len(), 73);
        for entity in engine.entities() {
            if let Body::Circle(c) = entity.body() {
                assert!(c.pos.is_finite());
                assert!(c.pos.y < 520.0);
            }
        }
    }

    #[test]
    fn test_respawn_fruit() {
        let mut rng = Pcg32::seed_from_u64(5);
        let fruit = respawn_fruit(&mut rng);
        assert_eq!(fruit.pos.y, 0.0);
        assert!((75.0..425.0).contains(&fruit.pos.x));
        assert_eq!(fruit.radius, FRUIT_RADIUS);
        assert_eq!(fruit.restitution(), FRUIT_RESTITUTION);
        assert!(fruit.is_dynamic());
    }
}
