//! Feedback Collaborators
//!
//! Haptics and audio are supplied by the host. The controller only emits
//! events; [`dispatch_feedback`] turns them into collaborator calls.
//! Audio failures are logged and swallowed: the game keeps running silently.

use tracing::warn;
use crate::game::events::GameEvent;

/// Feedback errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeedbackError {
    /// Sound resource is not available.
    #[error("sound not found: {0}")]
    MissingSound(String),

    /// Audio backend refused to play.
    #[error("audio playback failed: {0}")]
    Playback(String),
}

/// Fire-and-forget haptic cues.
pub trait Haptics {
    /// Light impact (tap on empty playfield).
    fn light_impact(&mut self);

    /// Success notification (actor reached, collectible picked up).
    fn success(&mut self);
}

/// Short sound clips.
pub trait Audio {
    /// Play the pickup clip.
    fn play_pickup(&mut self) -> Result<(), FeedbackError>;
}

/// Route events to haptics and audio. Returns how many collaborator calls were made.
pub fn dispatch_feedback<'a, H, A>(
    events: impl IntoIterator<Item = &'a GameEvent>,
    haptics: &mut H,
    audio: &mut A,
) -> usize
where
    H: Haptics + ?Sized,
    A: Audio + ?Sized,
{
    let mut calls = 0;
    for event in events {
        match event {
            GameEvent::TouchFeedback => {
                haptics.light_impact();
                calls += 1;
            }
            GameEvent::Reached => {
                haptics.success();
                calls += 1;
            }
            GameEvent::CollectiblePickedUp { .. } => {
                haptics.success();
                if let Err(e) = audio.play_pickup() {
                    warn!("Pickup sound unavailable: {}", e);
                }
                calls += 2;
            }
            _ => {}
        }
    }
    calls
}

/// One recorded collaborator call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedbackCall {
    /// `Haptics::light_impact`
    LightImpact,
    /// `Haptics::success`
    Success,
    /// `Audio::play_pickup`
    PickupSound,
}

/// Collaborator that records every call. Used headless and in tests.
#[derive(Debug, Default)]
pub struct RecordingFeedback {
    /// Calls in order
    pub calls: Vec<FeedbackCall>,
    /// When set, `play_pickup` fails with this error
    pub audio_error: Option<FeedbackError>,
}

impl RecordingFeedback {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorder whose audio always fails.
    pub fn with_broken_audio(error: FeedbackError) -> Self {
        Self {
            calls: Vec::new(),
            audio_error: Some(error),
        }
    }

    /// Number of recorded calls of one kind.
    pub fn count(&self, call: FeedbackCall) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }
}

impl Haptics for RecordingFeedback {
    fn light_impact(&mut self) {
        self.calls.push(FeedbackCall::LightImpact);
    }

    fn success(&mut self) {
        self.calls.push(FeedbackCall::Success);
    }
}

impl Audio for RecordingFeedback {
    fn play_pickup(&mut self) -> Result<(), FeedbackError> {
        if let Some(e) = &self.audio_error {
            return Err(e.clone());
        }
        self.calls.push(FeedbackCall::PickupSound);
        Ok(())
    }
}
