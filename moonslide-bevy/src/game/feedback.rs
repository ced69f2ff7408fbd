//! Haptics and audio adapters for the core feedback collaborators

use bevy::asset::LoadState;
use bevy::prelude::*;

use moonslide::game::feedback::{dispatch_feedback, Audio, FeedbackError, Haptics};

use super::SessionEvent;
use crate::GameSettings;

/// Pickup clip handle, loaded at startup
#[derive(Resource)]
pub struct PickupSound(pub Handle<AudioSource>);

/// Desktop builds have no vibration motor; cues are logged instead
pub struct LoggedHaptics;

impl Haptics for LoggedHaptics {
    fn light_impact(&mut self) {
        debug!("haptic: light impact");
    }

    fn success(&mut self) {
        debug!("haptic: success");
    }
}

/// Plays clips by spawning one-shot audio entities
pub struct BevyAudio<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    clip: &'a Handle<AudioSource>,
    available: bool,
    path: &'a str,
}

impl Audio for BevyAudio<'_, '_, '_> {
    fn play_pickup(&mut self) -> Result<(), FeedbackError> {
        if !self.available {
            return Err(FeedbackError::MissingSound(self.path.to_string()));
        }
        self.commands.spawn((
            AudioPlayer::new(self.clip.clone()),
            PlaybackSettings::DESPAWN,
        ));
        Ok(())
    }
}

pub fn load_pickup_sound(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    settings: Res<GameSettings>,
) {
    let handle: Handle<AudioSource> = asset_server.load(settings.config.pickup_sound.clone());
    commands.insert_resource(PickupSound(handle));
}

/// Route this frame's session events to haptics and audio
pub fn play_feedback(
    mut commands: Commands,
    mut events: EventReader<SessionEvent>,
    sound: Res<PickupSound>,
    asset_server: Res<AssetServer>,
    settings: Res<GameSettings>,
) {
    if events.is_empty() {
        return;
    }

    let available = !matches!(
        asset_server.get_load_state(sound.0.id()),
        Some(LoadState::Failed(_)) | None
    );

    let mut haptics = LoggedHaptics;
    let mut audio = BevyAudio {
        commands: &mut commands,
        clip: &sound.0,
        available,
        path: &settings.config.pickup_sound,
    };

    dispatch_feedback(events.read().map(|e| &e.0), &mut haptics, &mut audio);
}
