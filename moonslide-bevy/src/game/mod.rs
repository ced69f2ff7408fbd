//! Game module - scene host for the moonslide game loop
//!
//! The core controller owns all game state. Systems here feed it taps and
//! fixed-step ticks, forward its events, and mirror the session into sprites.

use std::collections::HashSet;

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use moonslide::{GameEvent, GameLoopController};

use crate::{AppState, GameSettings};

pub mod components;
pub mod coords;
pub mod feedback;

pub use components::*;
pub use coords::{to_playfield, to_world};

// ============================================================================
// GAME PLUGIN
// ============================================================================

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app
            // Events
            .add_event::<SessionEvent>()

            // Setup
            .add_systems(Startup, (
                setup_controller,
                setup_scene,
                feedback::load_pickup_sound,
            ).chain())

            // Game loop (fixed timestep)
            .add_systems(FixedUpdate, tick_controller)

            // Input, events and presentation (per frame)
            .add_systems(Update, (
                handle_taps,
                forward_events,
                sync_phase,
                feedback::play_feedback,
                sync_collectibles,
                sync_actor,
                animate_actor,
            ).chain());
    }
}

// ============================================================================
// RESOURCES
// ============================================================================

/// The game loop controller
#[derive(Resource)]
pub struct Controller(pub GameLoopController);

// ============================================================================
// EVENTS
// ============================================================================

/// Core game event, forwarded into Bevy
#[derive(Event, Clone, Debug)]
pub struct SessionEvent(pub GameEvent);

// ============================================================================
// SETUP
// ============================================================================

fn setup_controller(mut commands: Commands, settings: Res<GameSettings>) {
    let seed = rand::random::<u64>();
    let mut controller = GameLoopController::new(settings.config.clone(), seed);
    controller.start();
    commands.insert_resource(Controller(controller));

    info!("Session started (seed {})", seed);
}

pub(crate) fn setup_scene(mut commands: Commands, controller: Res<Controller>) {
    let config = controller.0.config();
    let field = config.playfield;

    // Cloud layer, centred on the bottom edge so it covers the lower half
    commands.spawn((
        Sprite {
            color: Color::srgb(0.55, 0.62, 0.78),
            custom_size: Some(Vec2::new(field.width, field.height)),
            ..default()
        },
        Transform::from_translation(Vec3::new(0.0, -field.height / 2.0, -1.0)),
        CloudLayer,
    ));

    // Moon
    let position = to_world(&field, controller.0.session().actor_position);
    let size = (field.width / 12.0).max(32.0);
    commands.spawn((
        Actor,
        Name::new("Moon"),
        Sprite {
            color: MOON_FRAMES[0],
            custom_size: Some(Vec2::splat(size)),
            ..default()
        },
        Transform::from_translation(position.extend(5.0)),
        ActorAnimation::new(config.actor_frame_secs),
    )).with_children(|parent| {
        parent.spawn((
            Crater,
            Sprite {
                color: Color::srgb(0.75, 0.7, 0.55),
                custom_size: Some(Vec2::splat(size * 0.3)),
                ..default()
            },
            Transform::from_translation(Vec3::new(-size * 0.2, size * 0.15, 0.1)),
        ));
    });
}

// ============================================================================
// GAME LOOP
// ============================================================================

/// Advance spawning and movement by one fixed step
fn tick_controller(time: Res<Time>, mut controller: ResMut<Controller>) {
    controller.0.tick(time.delta_secs());
}

/// Taps: touch end or left mouse release
fn handle_taps(
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform)>,
    mut controller: ResMut<Controller>,
) {
    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        return;
    };

    let mut taps: Vec<Vec2> = touches
        .iter_just_released()
        .map(|touch| touch.position())
        .collect();

    if mouse.just_released(MouseButton::Left) {
        if let Some(cursor) = windows.get_single().ok().and_then(|w| w.cursor_position()) {
            taps.push(cursor);
        }
    }

    let field = controller.0.config().playfield;
    for viewport_pos in taps {
        let Ok(world) = camera.viewport_to_world_2d(camera_transform, viewport_pos) else {
            continue;
        };
        controller.0.handle_tap(to_playfield(&field, world));
    }
}

/// Drain controller events into Bevy's event queue
pub(crate) fn forward_events(mut controller: ResMut<Controller>, mut writer: EventWriter<SessionEvent>) {
    for event in controller.0.take_events() {
        writer.send(SessionEvent(event));
    }
}

/// Mirror the session phase into the app state
fn sync_phase(
    mut events: EventReader<SessionEvent>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    for SessionEvent(event) in events.read() {
        match event {
            GameEvent::GameOver { final_score } => {
                info!("Game Over! Score {}", final_score);
                next_state.set(AppState::GameOver);
            }
            GameEvent::SessionReset => {
                next_state.set(AppState::Playing);
            }
            _ => {}
        }
    }
}

// ============================================================================
// PRESENTATION
// ============================================================================

/// Spawn sprites for new collectibles and despawn picked-up ones
fn sync_collectibles(
    mut commands: Commands,
    controller: Res<Controller>,
    sprites: Query<(Entity, &CollectibleSprite)>,
) {
    if !controller.is_changed() {
        return;
    }

    let session = controller.0.session();
    let config = controller.0.config();
    let mut shown = HashSet::new();

    for (entity, sprite) in sprites.iter() {
        if session.collectibles.contains_key(&sprite.0) {
            shown.insert(sprite.0);
        } else {
            commands.entity(entity).despawn_recursive();
        }
    }

    let size = config.collectible_radius * 1.5;
    for collectible in session.collectibles.values() {
        if shown.contains(&collectible.id) {
            continue;
        }
        let position = to_world(&config.playfield, collectible.position);
        commands.spawn((
            CollectibleSprite(collectible.id),
            Sprite {
                color: kind_color(collectible.kind),
                custom_size: Some(Vec2::splat(size)),
                ..default()
            },
            // Later spawns draw on top, matching hit-test order
            Transform::from_translation(position.extend(1.0 + collectible.id.0 as f32 * 1e-4))
                .with_rotation(Quat::from_rotation_z(std::f32::consts::FRAC_PI_4)),
        ));
    }
}

/// Place and mirror the moon
fn sync_actor(controller: Res<Controller>, mut query: Query<&mut Transform, With<Actor>>) {
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };

    let session = controller.0.session();
    let position = to_world(&controller.0.config().playfield, session.actor_position);
    transform.translation.x = position.x;
    transform.translation.y = position.y;
    transform.scale.x = transform.scale.x.abs() * session.facing;
}

/// Cycle moon frames while moving; restore the first frame when idle
fn animate_actor(
    time: Res<Time>,
    controller: Res<Controller>,
    mut query: Query<(&mut ActorAnimation, &mut Sprite), With<Actor>>,
) {
    let Ok((mut animation, mut sprite)) = query.get_single_mut() else {
        return;
    };

    if controller.0.session().active_move.is_some() {
        animation.timer.tick(time.delta());
        if animation.timer.just_finished() {
            animation.frame = (animation.frame + 1) % MOON_FRAMES.len();
        }
    } else {
        animation.timer.reset();
        animation.frame = 0;
    }
    sprite.color = MOON_FRAMES[animation.frame];
}
