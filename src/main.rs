use anyhow::{Context, Result};
use log::{debug, info};
use skillbound::engine::game_loop::FixedStepClock;
use skillbound::engine::input::ActionState;
use skillbound::engine::physics::{KinematicBackend, PhysicsWorld};
use skillbound::game::abilities::{
    ability_tree_from_json, AbilityBehavior, AbilityContainer, ContainerId, LoadedAbilityTree,
};
use skillbound::game::characters::Character;
use skillbound::game::config::{load_character_config, CharacterConfig};
use skillbound::game::movement::MovementEvent;
use std::time::Duration;

/// How long the scripted run lasts
const RUN_TIME: Duration = Duration::from_secs(5);

/// Frame time fed to the clock (a ~62 fps display)
const FRAME_TIME: Duration = Duration::from_millis(16);

/// Frames at which the run pauses and resumes
const PAUSE_FRAMES: (u64, u64) = (150, 180);

/// Scripted input: (seconds, action name, pressed)
const SCRIPT: &[(f32, &str, bool)] = &[
    (0.2, "move_right", true),
    (1.0, "move_jump", true),
    (1.2, "move_jump", false),
    (1.5, "attack_1", true),
    (2.3, "attack_1", false),
    (2.5, "move_forward", true),
    (2.6, "dodge", true),
    (2.7, "dodge", false),
    (3.0, "attack_2", true),
    (3.1, "attack_2", false),
    (3.5, "move_right", false),
    (3.5, "move_forward", false),
];

/// Ability graph used when the config has none
const DEMO_ABILITIES: &str = r#"{
    "abilities": [
        { "key": "dash", "name": "Dash", "cost": 1.0 },
        { "key": "double_jump", "name": "Double Jump", "cost": 2.0 },
        { "key": "charged_strike", "name": "Charged Strike", "cost": 2.0 },
        { "key": "whirlwind", "name": "Whirlwind", "cost": 4.0 }
    ],
    "nodes": [
        { "key": "whirlwind", "ability": "whirlwind", "prerequisites": ["double_jump", "charged_strike"] },
        { "key": "double_jump", "ability": "double_jump", "prerequisites": ["dash"] },
        { "key": "charged_strike", "ability": "charged_strike", "prerequisites": ["dash"] },
        { "key": "dash", "ability": "dash" }
    ]
}"#;

/// Logs its lifecycle and how long it has been running
#[derive(Default)]
struct DashBehavior {
    active_time: f32,
}

impl AbilityBehavior for DashBehavior {
    fn on_activated(&mut self) {
        info!("Dash behavior online");
    }

    fn on_deactivated(&mut self) {
        info!("Dash behavior offline after {:.2}s", self.active_time);
    }

    fn process(&mut self, delta: f32) {
        self.active_time += delta;
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting skillbound...");

    let config = match std::env::args().nth(1) {
        Some(path) => load_character_config(&path)?,
        None => {
            info!("No config given, using defaults");
            CharacterConfig::default()
        }
    };

    let mut loaded = match config.ability_tree().context("build configured ability tree")? {
        Some(loaded) => loaded,
        None => ability_tree_from_json(DEMO_ABILITIES).context("build demo ability tree")?,
    };

    let mut world = PhysicsWorld::new();
    world.add_ground(glam::Vec3::ZERO, 50.0, 50.0);
    let body = world.add_character(config.body.spawn, config.body.radius, config.body.height);

    let mut hero = Character::new(&config.name, body, config.build_controller())
        .with_animator(config.build_animator())
        .with_abilities(std::mem::take(&mut loaded.tree));
    if let Some(dash) = loaded.ability_id("dash") {
        hero.behaviors_mut()
            .add(AbilityContainer::new(Some(dash), Box::new(DashBehavior::default())));
    }
    hero.ready();

    info!(
        "Spawned '{}' in {} mode",
        hero.name,
        if hero.controller().mode().is_platformer() { "platformer" } else { "top-down" }
    );

    let dash_container = unlock_walk(&mut hero, &loaded);
    run_script(&mut hero, &mut world, &config)?;
    hero.deactivate(dash_container);

    info!("Shutting down...");
    Ok(())
}

/// Unlock every reachable node, one pass at a time
fn unlock_walk(
    hero: &mut Character<PhysicsWorld>,
    loaded: &LoadedAbilityTree,
) -> Option<ContainerId> {
    let roots: Vec<&str> = hero
        .abilities()
        .root_nodes()
        .into_iter()
        .filter_map(|node| loaded.node_key(node))
        .collect();
    info!("Ability roots: {:?}", roots);

    let nodes: Vec<_> = hero.abilities().nodes().map(|(id, _)| id).collect();
    let mut activated = None;
    let mut pass = 1;
    loop {
        let mut progressed = false;
        for &node in &nodes {
            if hero.abilities().is_unlocked(node) || !hero.can_unlock(node) {
                continue;
            }
            let container = hero.unlock(node);
            progressed = true;
            info!(
                "Pass {}: unlocked '{}'",
                pass,
                loaded.node_key(node).unwrap_or("?")
            );
            activated = activated.or(container);
        }
        if !progressed {
            break;
        }
        pass += 1;
    }

    let locked = nodes
        .iter()
        .filter(|&&node| !hero.abilities().is_unlocked(node))
        .count();
    info!("Unlock walk finished: {} locked node(s) left", locked);
    activated
}

/// Drive the character with scripted input through the fixed-step clock
fn run_script(
    hero: &mut Character<PhysicsWorld>,
    world: &mut PhysicsWorld,
    config: &CharacterConfig,
) -> Result<()> {
    let mut clock = FixedStepClock::new();
    let mut input = ActionState::new();
    let mut next_event = 0;
    let mut now = 0.0;

    while clock.simulated() < RUN_TIME {
        match clock.frame_count() {
            frame if frame == PAUSE_FRAMES.0 => clock.pause(),
            frame if frame == PAUSE_FRAMES.1 => clock.resume(),
            _ => {}
        }

        let ticks = clock.advance(FRAME_TIME);
        for _ in 0..ticks {
            while let Some(&(at, name, pressed)) = SCRIPT.get(next_event) {
                if at > now {
                    break;
                }
                let action = if pressed {
                    input.press_named(&config.actions, name)
                } else {
                    input.release_named(&config.actions, name)
                };
                debug!("t={:.2}s {} {:?}", now, if pressed { "press" } else { "release" }, action);
                next_event += 1;
            }

            let output = hero.physics_tick(world, &input.snapshot(), clock.delta());
            world.end_tick();
            for event in &output.events {
                log_event(event);
            }
            input.end_tick();
            now += clock.delta();
        }
    }

    let position = hero
        .position(world)
        .context("character body missing after run")?;
    info!(
        "Ran {} ticks over {} frames; '{}' ended at ({:.2}, {:.2}, {:.2}), grounded: {}",
        clock.tick_count(),
        clock.frame_count(),
        hero.name,
        position.x,
        position.y,
        position.z,
        hero.is_grounded()
    );
    Ok(())
}

fn log_event(event: &MovementEvent) {
    match event {
        MovementEvent::AttackReleased { slot, charge_level } => {
            info!("Attack {:?} released at charge {:.2}", slot, charge_level)
        }
        MovementEvent::DodgePerformed { direction } => {
            info!("Dodge toward ({:.2}, {:.2})", direction.x, direction.y)
        }
        MovementEvent::MovementChanged {
            velocity,
            grounded,
            ..
        } => debug!(
            "Velocity ({:.2}, {:.2}, {:.2}) grounded: {}",
            velocity.x, velocity.y, velocity.z, grounded
        ),
    }
}
