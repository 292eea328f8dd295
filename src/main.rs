//! Tiny2D demo host
//!
//! Headless stand-in for a game loop: builds a scene (the fruit bin unless a
//! scene file is given), steps it at a fixed tick and plays the fruit-bin
//! chain/refill cycle against it the way a pointer-driven game would.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use tiny2d::scene::{FRUIT_KINDS, SceneDesc, SceneError, fruit_bin, respawn_fruit};
use tiny2d::{Body, Engine, EntityId, Tags};

const DEFAULT_SEED: u64 = 2024;
/// 57 seconds at one tick per 50 ms
const DEFAULT_MAX_TICKS: u64 = 1140;
/// Ticks between simulated pointer gestures
const GESTURE_INTERVAL: u64 = 40;
/// Ticks between summary lines (one second of host time)
const LOG_INTERVAL: u64 = 20;
/// Squared reach from the last selected fruit to the next one
const CHAIN_REACH_SQ: f64 = 4000.0;
const POINTS_PER_FRUIT: u64 = 100;

/// Host-side state the engine never sees
struct Host {
    rng: Pcg32,
    kinds: Tags<u32>,
    selected: Tags<bool>,
    score: u64,
}

impl Host {
    fn new(seed: u64, engine: &Engine) -> Self {
        let mut host = Self {
            rng: Pcg32::seed_from_u64(seed),
            kinds: Tags::new(),
            selected: Tags::new(),
            score: 0,
        };
        let circles: Vec<EntityId> = engine
            .entities()
            .iter()
            .filter(|e| matches!(e.body(), Body::Circle(_)))
            .map(|e| e.id())
            .collect();
        for id in circles {
            let kind = host.rng.random_range(0..FRUIT_KINDS);
            host.kinds.insert(id, kind);
        }
        host
    }

    /// Press on a random fruit and drag through same-kind neighbors
    fn gesture(&mut self, engine: &mut Engine) {
        let fruit: Vec<(EntityId, f64, f64)> = engine
            .entities()
            .iter()
            .filter_map(|e| e.body().as_circle().map(|c| (e.id(), c.pos.x, c.pos.y)))
            .collect();
        if fruit.is_empty() {
            return;
        }
        let (_, px, py) = fruit[self.rng.random_range(0..fruit.len())];

        let mut chain: Vec<EntityId> = engine.pick(px, py).collect();
        let Some(&first) = chain.first() else {
            return;
        };
        let kind = self.kinds.get(first).copied();
        chain.truncate(1);

        loop {
            let Some(last) = chain.last().and_then(|id| engine.get(*id)).map(Body::position) else {
                break;
            };
            let next = fruit.iter().find(|(id, x, y)| {
                !chain.contains(id)
                    && self.kinds.get(*id).copied() == kind
                    && (x - last.x).powi(2) + (y - last.y).powi(2) < CHAIN_REACH_SQ
            });
            match next {
                Some((id, _, _)) => chain.push(*id),
                None => break,
            }
        }

        for id in &chain {
            self.selected.insert(*id, true);
        }
        if chain.len() > 1 {
            self.consume(engine);
        }
        self.selected.clear();
    }

    /// Remove every selected fruit and drop the same number back in
    fn consume(&mut self, engine: &mut Engine) {
        let popped = self.selected.take_all();
        for (id, _) in &popped {
            engine.remove(*id);
            self.kinds.remove(*id);
        }
        for _ in 0..popped.len() {
            let id = engine.add(respawn_fruit(&mut self.rng));
            let kind = self.rng.random_range(0..FRUIT_KINDS);
            self.kinds.insert(id, kind);
        }
        self.score += popped.len() as u64 * POINTS_PER_FRUIT;
        log::debug!("Popped a chain of {} (score {})", popped.len(), self.score);
    }
}

fn run() -> Result<(), SceneError> {
    let scene = match std::env::args().nth(1) {
        Some(path) => SceneDesc::load(path)?,
        None => fruit_bin(DEFAULT_SEED),
    };
    let dt = scene.settings.tick_dt;
    let max_ticks = scene.settings.max_ticks.unwrap_or(DEFAULT_MAX_TICKS);
    let mut engine = scene.build();
    let mut host = Host::new(DEFAULT_SEED, &engine);

    log::info!("Running {} ticks of {}s with {} bodies", max_ticks, dt, engine.len());

    for tick in 1..=max_ticks {
        engine.step(dt);
        host.kinds.prune(&engine);

        if tick % GESTURE_INTERVAL == 0 {
            host.gesture(&mut engine);
        }
        if tick % LOG_INTERVAL == 0 {
            let moving = engine
                .entities()
                .iter()
                .filter_map(|e| e.body().as_circle())
                .filter(|c| c.is_dynamic())
                .count();
            log::info!(
                "t={:>3}s bodies={} dynamic={} score={}",
                tick / LOG_INTERVAL,
                engine.len(),
                moving,
                host.score
            );
        }
    }

    println!("Final score: {}", host.score);
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Tiny2D demo starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

