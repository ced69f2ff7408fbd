//! Game Loop Controller
//!
//! Owns the session and serializes taps, the spawn cadence and movement
//! interpolation onto one single-threaded `tick`. Nothing here renders or
//! plays anything; side effects leave as [`GameEvent`]s.

use tracing::{debug, info};

use crate::config::GameConfig;
use crate::core::rng::DeterministicRng;
use crate::core::vec2::Point;
use crate::game::events::GameEvent;
use crate::game::input::{hit_test, HitTarget};
use crate::game::movement::{ActiveMove, MoveCommand, MoveStep};
use crate::game::spawn::{random_kind, random_spawn_position, SpawnCadence};
use crate::game::state::{CollectibleId, Session, SessionPhase};

/// Result of one `tick`.
#[derive(Debug, Default, PartialEq)]
pub struct TickResult {
    /// Collectibles spawned this tick
    pub spawned: u32,
    /// Whether the actor arrived this tick
    pub move_completed: bool,
    /// Whether the session ended this tick
    pub game_over: bool,
}

/// Owns game state and applies every session operation.
#[derive(Debug, Clone)]
pub struct GameLoopController {
    config: GameConfig,
    session: Session,
    cadence: SpawnCadence,
    rng: DeterministicRng,
    events: Vec<GameEvent>,
    ticks: u64,
}

impl GameLoopController {
    /// Create a controller. Call [`GameLoopController::start`] before ticking.
    pub fn new(config: GameConfig, rng_seed: u64) -> Self {
        let session = Session::new(config.playfield.center());
        let cadence = SpawnCadence::new(config.spawn_interval_secs);
        Self {
            config,
            session,
            cadence,
            rng: DeterministicRng::new(rng_seed),
            events: Vec::new(),
            ticks: 0,
        }
    }

    /// Current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Active configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Spawn cadence state.
    pub fn cadence(&self) -> &SpawnCadence {
        &self.cadence
    }

    /// Ticks run since construction.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Drain queued events.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Queued events, without draining.
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    // =========================================================================
    // SESSION LIFECYCLE
    // =========================================================================

    /// Begin a fresh session: actor centred, cadence armed.
    pub fn start(&mut self) {
        self.session = Session::new(self.config.playfield.center());
        self.cadence = SpawnCadence::new(self.config.spawn_interval_secs);
        info!(
            "Session started on {}x{} playfield",
            self.config.playfield.width, self.config.playfield.height
        );
    }

    /// Discard the session and start over. Same post-state from any state.
    pub fn reset(&mut self) {
        let previous_score = self.session.score;
        self.session = Session::new(self.config.playfield.center());
        self.cadence.restart();
        self.events.push(GameEvent::SessionReset);
        info!("Session reset (previous score {})", previous_score);
    }

    // =========================================================================
    // INPUT
    // =========================================================================

    /// Handle a tap (touch end / click release) at `point` in playfield coordinates.
    pub fn handle_tap(&mut self, point: Point) {
        if self.session.is_over() {
            self.reset();
            return;
        }

        match hit_test(&self.session, &self.config, point) {
            HitTarget::Collectible(id) => {
                self.pickup(id);
            }
            HitTarget::ResetButton => self.reset(),
            HitTarget::Empty => {
                self.events.push(GameEvent::TouchFeedback);
                self.issue_move(point);
            }
        }
    }

    /// Issue a move toward `target`, replacing any move in flight.
    ///
    /// Ignored once the session is over.
    pub fn issue_move(&mut self, target: Point) -> Option<MoveCommand> {
        if self.session.is_over() {
            return None;
        }

        let from = self.session.actor_position;
        let command = MoveCommand::new(from, target, self.config.actor_speed());

        self.session.facing = command.direction_sign;
        self.session.active_move = Some(ActiveMove::start(from, &command));
        self.events.push(GameEvent::MoveIssued(command));
        debug!("Move to {} over {:.2}s", target, command.duration_secs);

        if from.distance(target) < self.config.reach_epsilon {
            self.events.push(GameEvent::Reached);
        }

        Some(command)
    }

    // =========================================================================
    // COLLECTIBLES
    // =========================================================================

    /// Spawn one collectible. Ends the session when the count exceeds the limit.
    ///
    /// Returns `None` (and does nothing) once the session is over.
    pub fn spawn_collectible(&mut self) -> Option<CollectibleId> {
        if self.session.is_over() {
            return None;
        }

        let position = random_spawn_position(&mut self.rng, &self.config);
        let kind = random_kind(&mut self.rng);
        let id = self.session.add_collectible(position, kind);
        self.events.push(GameEvent::CollectibleSpawned { id, kind, position });
        debug!("Spawned {:?} {} at {}", kind, id, position);

        if self.session.collectible_count() > self.config.max_collectibles {
            self.game_over();
        }

        Some(id)
    }

    /// Pick up a collectible: remove it and score a point.
    ///
    /// Unknown IDs are ignored.
    pub fn pickup(&mut self, id: CollectibleId) -> Option<u32> {
        let collectible = self.session.remove_collectible(id)?;
        self.session.score += 1;

        let score = self.session.score;
        self.events.push(GameEvent::ScoreChanged { score });
        self.events.push(GameEvent::CollectiblePickedUp {
            id,
            kind: collectible.kind,
        });
        debug!("Picked up {} (score {})", id, score);

        Some(score)
    }

    fn game_over(&mut self) {
        self.session.phase = SessionPhase::GameOver;
        self.cadence.halt();
        let final_score = self.session.score;
        self.events.push(GameEvent::GameOver { final_score });
        info!(
            "Game over: {} collectibles on screen, final score {}",
            self.session.collectible_count(),
            final_score
        );
    }

    // =========================================================================
    // TICK
    // =========================================================================

    /// Advance the movement interpolation and the spawn cadence by `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> TickResult {
        let mut result = TickResult::default();
        self.ticks += 1;

        // Movement
        if let Some(active) = self.session.active_move.as_mut() {
            match active.advance(dt) {
                MoveStep::InFlight(position) => {
                    self.session.actor_position = position;
                }
                MoveStep::Arrived(position) => {
                    self.session.actor_position = position;
                    self.session.active_move = None;
                    self.events.push(GameEvent::MoveCompleted { position });
                    result.move_completed = true;
                }
            }
        }

        // Spawning
        let was_over = self.session.is_over();
        // One spawn past the limit ends the session, so that bounds the work
        let budget = self
            .config
            .max_collectibles
            .saturating_add(1)
            .saturating_sub(self.session.collectible_count());
        let due = (self.cadence.advance(dt) as usize).min(budget);
        for _ in 0..due {
            if self.spawn_collectible().is_none() {
                break;
            }
            result.spawned += 1;
        }
        result.game_over = !was_over && self.session.is_over();

        #[cfg(feature = "debug-tracing")]
        tracing::trace!(
            "tick {}: actor {}, {} collectibles",
            self.ticks,
            self.session.actor_position,
            self.session.collectible_count()
        );

        result
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::CollectibleKind;

    fn controller() -> GameLoopController {
        let mut c = GameLoopController::new(GameConfig::with_playfield(300.0, 500.0), 12345);
        c.start();
        c
    }

    #[test]
    fn test_start_state() {
        let c = controller();
        let s = c.session();
        assert_eq!(s.score, 0);
        assert!(!s.is_over());
        assert!(s.collectibles.is_empty());
        assert_eq!(s.actor_position, Point::new(150.0, 250.0));
    }

    #[test]
    fn test_first_tick_spawns() {
        let mut c = controller();
        let result = c.tick(1.0 / 120.0);
        assert_eq!(result.spawned, 1);
        assert_eq!(c.session().collectible_count(), 1);
    }

    #[test]
    fn test_game_over_after_21_spawns() {
        let mut c = controller();
        for _ in 0..20 {
            assert!(c.spawn_collectible().is_some());
            assert!(!c.session().is_over());
        }
        assert!(c.spawn_collectible().is_some());
        assert!(c.session().is_over());
        assert_eq!(c.session().collectible_count(), 21);

        // No further spawns
        assert!(c.spawn_collectible().is_none());
        c.tick(10.0);
        assert_eq!(c.session().collectible_count(), 21);

        let game_overs = c
            .take_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn test_tick_reports_game_over() {
        let mut c = controller();
        for _ in 0..20 {
            c.spawn_collectible();
        }
        c.take_events();
        let result = c.tick(0.0);
        assert_eq!(result.spawned, 1);
        assert!(result.game_over);
    }

    #[test]
    fn test_tap_on_collectible_picks_up() {
        let mut c = controller();
        let id = c.spawn_collectible().unwrap();
        let position = c.session().collectibles[&id].position;
        c.take_events();

        c.handle_tap(position);

        assert_eq!(c.session().score, 1);
        assert!(!c.session().collectibles.contains_key(&id));
        assert!(c.session().active_move.is_none());

        let events = c.take_events();
        assert!(events.contains(&GameEvent::ScoreChanged { score: 1 }));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::MoveIssued(_))));
    }

    #[test]
    fn test_pickup_unknown_id() {
        let mut c = controller();
        assert_eq!(c.pickup(CollectibleId(99)), None);
        assert_eq!(c.session().score, 0);
    }

    #[test]
    fn test_tap_empty_issues_move() {
        let mut c = controller();
        c.handle_tap(Point::new(210.0, 250.0));

        let active = c.session().active_move.expect("move in flight");
        assert_eq!(active.target, Point::new(210.0, 250.0));
        // 60 units at 300/5 = 60/s
        assert_eq!(active.duration_secs, 1.0);
        assert_eq!(c.session().facing, -1.0);

        let events = c.take_events();
        assert_eq!(events[0], GameEvent::TouchFeedback);
        assert!(matches!(events[1], GameEvent::MoveIssued(_)));
        assert!(!events.contains(&GameEvent::Reached));
    }

    #[test]
    fn test_move_completes_and_clears() {
        let mut c = controller();
        c.issue_move(Point::new(210.0, 250.0));

        let r = c.tick(0.5);
        assert!(!r.move_completed);
        assert_eq!(c.session().actor_position, Point::new(180.0, 250.0));

        let r = c.tick(0.5);
        assert!(r.move_completed);
        assert_eq!(c.session().actor_position, Point::new(210.0, 250.0));
        assert!(c.session().active_move.is_none());
    }

    #[test]
    fn test_new_move_replaces_old() {
        let mut c = controller();
        c.issue_move(Point::new(270.0, 250.0));
        c.tick(0.5);
        c.issue_move(Point::new(30.0, 250.0));

        let active = c.session().active_move.unwrap();
        assert_eq!(active.from, Point::new(180.0, 250.0));
        assert_eq!(active.target, Point::new(30.0, 250.0));
        assert_eq!(c.session().facing, 1.0);
    }

    #[test]
    fn test_tap_near_actor_emits_reached() {
        let mut c = controller();
        c.handle_tap(Point::new(155.0, 250.0));
        assert!(c.take_events().contains(&GameEvent::Reached));
    }

    #[test]
    fn test_tap_while_over_resets() {
        let mut c = controller();
        let id = c.spawn_collectible().unwrap();
        let position = c.session().collectibles[&id].position;
        c.handle_tap(position);
        for _ in 0..21 {
            c.spawn_collectible();
        }
        assert!(c.session().is_over());
        assert_eq!(c.session().score, 1);

        // Any location, even one far from everything
        c.handle_tap(Point::new(1.0, 1.0));

        let s = c.session();
        assert!(!s.is_over());
        assert_eq!(s.score, 0);
        assert!(s.collectibles.is_empty());
        assert!(s.active_move.is_none());
        assert!(c.cadence().is_running());
    }

    #[test]
    fn test_moves_ignored_while_over() {
        let mut c = controller();
        for _ in 0..21 {
            c.spawn_collectible();
        }
        assert!(c.issue_move(Point::new(10.0, 10.0)).is_none());
    }

    #[test]
    fn test_move_in_flight_finishes_after_game_over() {
        let mut c = controller();
        let target = Point::new(30.0, 250.0);
        let command = c.issue_move(target).unwrap();
        for _ in 0..21 {
            c.spawn_collectible();
        }
        assert!(c.session().is_over());
        c.take_events();

        let steps = (command.duration_secs / 0.1).ceil() as usize + 1;
        for _ in 0..steps {
            c.tick(0.1);
        }

        let events = c.take_events();
        assert!(events.contains(&GameEvent::MoveCompleted { position: target }));
        assert_eq!(c.session().actor_position, target);
        assert!(c.session().active_move.is_none());
        assert!(c.issue_move(Point::new(10.0, 10.0)).is_none());
    }

    #[test]
    fn test_huge_tick_ends_promptly() {
        let mut c = controller();
        let result = c.tick(1.0e8);
        assert!(result.game_over);
        assert_eq!(c.session().collectible_count(), 21);
        assert_eq!(c.tick(1.0e8).spawned, 0);
    }

    #[test]
    fn test_zero_interval_from_code_does_not_hang() {
        let mut config = GameConfig::with_playfield(300.0, 500.0);
        config.spawn_interval_secs = 0.0;
        let mut c = GameLoopController::new(config, 7);
        c.start();
        let result = c.tick(1.0 / 120.0);
        assert!(result.spawned >= 1);
        assert!(c.session().collectible_count() <= 21);
    }

    #[test]
    fn test_reset_button_resets() {
        let mut c = controller();
        c.spawn_collectible();
        let button = c.config().reset_button.center(&c.config().playfield);
        // Clear the spawn so the button is not covered
        let ids: Vec<_> = c.session().collectibles.keys().copied().collect();
        for id in ids {
            c.pickup(id);
        }
        c.handle_tap(button);
        assert_eq!(c.session().score, 0);
        assert!(c.take_events().contains(&GameEvent::SessionReset));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut c = controller();
        c.spawn_collectible();
        c.issue_move(Point::new(0.0, 0.0));
        c.tick(0.3);

        c.reset();
        let first = c.session().clone();
        c.reset();
        let second = c.session().clone();

        assert_eq!(first.score, second.score);
        assert_eq!(first.phase, second.phase);
        assert_eq!(first.actor_position, second.actor_position);
        assert_eq!(first.collectibles, second.collectibles);
        assert_eq!(first.actor_position, Point::new(150.0, 250.0));
    }

    #[test]
    fn test_spawned_kinds_are_valid() {
        let mut c = controller();
        for _ in 0..20 {
            let id = c.spawn_collectible().unwrap();
            let kind = c.session().collectibles[&id].kind;
            assert!(CollectibleKind::ALL.contains(&kind));
        }
    }
}
