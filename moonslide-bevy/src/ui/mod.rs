//! UI module - score label, reset button and game over overlay

use bevy::prelude::*;

use moonslide::{GameEvent, Point};

use crate::game::{to_world, Controller, SessionEvent};
use crate::AppState;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app
            .add_systems(Startup, setup_hud.after(crate::game::setup_scene))
            .add_systems(OnEnter(AppState::GameOver), setup_game_over)
            .add_systems(OnExit(AppState::GameOver), cleanup_game_over)
            .add_systems(Update, update_score.after(crate::game::forward_events));
    }
}

/// Marker for the score label
#[derive(Component)]
struct ScoreText;

/// Marker for the reset button
#[derive(Component)]
struct ResetButtonUI;

/// Marker for game over overlay
#[derive(Component)]
struct GameOverUI;

/// Score label and reset button, placed in playfield space
fn setup_hud(mut commands: Commands, controller: Res<Controller>) {
    let config = controller.0.config();
    let field = config.playfield;

    let score_pos = to_world(&field, Point::new(field.width / 2.0, field.height - 30.0));
    commands.spawn((
        Text2d::new(format!("Score: {}", controller.0.session().score)),
        TextFont {
            font_size: 28.0,
            ..default()
        },
        TextColor(Color::srgb(0.15, 0.15, 0.25)),
        Transform::from_translation(score_pos.extend(10.0)),
        ScoreText,
    ));

    let button = config.reset_button;
    let button_pos = to_world(&field, button.center(&field));
    commands.spawn((
        Sprite {
            color: Color::srgb(0.3, 0.35, 0.55),
            custom_size: Some(Vec2::new(button.width, button.height)),
            ..default()
        },
        Transform::from_translation(button_pos.extend(10.0)),
        ResetButtonUI,
    )).with_children(|parent| {
        parent.spawn((
            Text2d::new("Reset"),
            TextFont {
                font_size: 18.0,
                ..default()
            },
            TextColor(Color::WHITE),
            Transform::from_translation(Vec3::new(0.0, 0.0, 0.1)),
        ));
    });
}

fn update_score(
    mut events: EventReader<SessionEvent>,
    mut query: Query<&mut Text2d, With<ScoreText>>,
) {
    let mut latest = None;
    for SessionEvent(event) in events.read() {
        match event {
            GameEvent::ScoreChanged { score } => latest = Some(*score),
            GameEvent::SessionReset => latest = Some(0),
            _ => {}
        }
    }

    let Some(score) = latest else {
        return;
    };
    for mut text in query.iter_mut() {
        text.0 = format!("Score: {}", score);
    }
}

fn setup_game_over(mut commands: Commands, controller: Res<Controller>) {
    commands.spawn((
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        },
        BackgroundColor(Color::srgba(0.05, 0.05, 0.12, 0.6)),
        GameOverUI,
    )).with_children(|parent| {
        parent.spawn((
            Text::new("Game Over. Tap to Reset"),
            TextFont {
                font_size: 36.0,
                ..default()
            },
            TextColor(Color::WHITE),
            Node {
                margin: UiRect::bottom(Val::Px(12.0)),
                ..default()
            },
        ));

        parent.spawn((
            Text::new(format!("Stars caught: {}", controller.0.session().score)),
            TextFont {
                font_size: 22.0,
                ..default()
            },
            TextColor(Color::srgb(1.0, 0.85, 0.2)),
        ));
    });
}

fn cleanup_game_over(
    mut commands: Commands,
    query: Query<Entity, With<GameOverUI>>,
) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
