//! Top-level session controller
//!
//! `Game` owns everything that outlives a single session (score, RNG,
//! audio, settings) plus the current `Session`. The host calls `advance`
//! once per frame with that frame's input and elapsed time.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::{AudioCue, AudioSink};
use crate::consts::MAX_FRAME_DT;
use crate::persistence::{KeyValueStore, Result};
use crate::score::ScoreStore;
use crate::settings::Settings;
use crate::sim::{
    Category, ContactOutcome, EntityId, GameEvent, GamePhase, PlacementPolicy, RemovalReason,
    Session, TickInput, detect_contacts, move_entities, resolve_contact,
};

/// Game controller
pub struct Game<S: KeyValueStore, A: AudioSink> {
    settings: Settings,
    score: ScoreStore<S>,
    session: Session,
    placement: PlacementPolicy,
    rng: Pcg32,
    audio: A,
}

impl<S: KeyValueStore, A: AudioSink> Game<S, A> {
    /// Load the score and start the first session
    pub fn new(settings: Settings, store: S, audio: A, seed: u64) -> Result<Self> {
        let settings = settings.sanitized();
        let score = ScoreStore::open(store)?;
        let placement = PlacementPolicy::from_settings(&settings);
        let session = Session::new(1, &settings);
        let mut game = Self {
            settings,
            score,
            session,
            placement,
            rng: Pcg32::seed_from_u64(seed),
            audio,
        };
        game.start_music();
        log::info!("Session 1 started (seed {})", seed);
        Ok(game)
    }

    fn start_music(&mut self) {
        self.audio.play(AudioCue::BackgroundMusic {
            volume: self.settings.music_volume,
        });
    }

    /// Advance one frame.
    ///
    /// Running: apply steering, fire spawn timers, move entities, then
    /// resolve contacts. GameOver: only the restart control is honoured,
    /// and the fresh session first runs on the following frame.
    ///
    /// `dt` is clamped to `[0, MAX_FRAME_DT]`; NaN counts as zero.
    pub fn advance(&mut self, input: &TickInput, dt: f32) -> Result<()> {
        if input.restart && self.restart() {
            return Ok(());
        }
        if !self.session.is_running() {
            return Ok(());
        }
        let dt = if dt.is_nan() {
            0.0
        } else {
            dt.clamp(0.0, MAX_FRAME_DT)
        };

        if let Some(y) = input.target_y {
            self.session.set_player_y(y);
        }

        for category in self.session.scheduler.advance(dt) {
            self.spawn(category);
        }

        move_entities(&mut self.session, dt);

        for contact in detect_contacts(&self.session.entities) {
            if !self.session.is_running() {
                break;
            }
            self.on_contact(contact.a, contact.b)?;
        }
        Ok(())
    }

    /// Try to spawn one obstacle or bonus. Overlapping spawns are dropped.
    pub fn spawn(&mut self, category: Category) -> Option<EntityId> {
        if !self.session.is_running() {
            return None;
        }
        self.placement
            .try_spawn(&mut self.session, category, &mut self.rng)
    }

    /// Handle a contact reported by the physics collaborator
    pub fn on_contact(&mut self, a: EntityId, b: EntityId) -> Result<ContactOutcome> {
        resolve_contact(
            &mut self.session,
            &mut self.score,
            &mut self.audio,
            a,
            b,
        )
    }

    /// Move the player. Ignored unless Running.
    pub fn set_player_y(&mut self, y: f32) -> bool {
        self.session.set_player_y(y)
    }

    /// Start a fresh session after game over.
    ///
    /// Returns false (and changes nothing) while the session is still running.
    pub fn restart(&mut self) -> bool {
        if self.session.is_running() {
            log::debug!("Restart ignored: session {} still running", self.session.number);
            return false;
        }

        let mut next = Session::new(self.session.number + 1, &self.settings);

        // Undrained notifications and removals of the old entity set come first
        let mut events = self.session.drain_events();
        events.extend(self.session.entities.iter().map(|e| GameEvent::EntityRemoved {
            id: e.id,
            category: e.category,
            reason: RemovalReason::SessionReset,
        }));
        events.push(GameEvent::Restarted {
            session: next.number,
        });
        events.append(&mut next.events);
        next.events = events;

        self.session = next;
        self.start_music();
        log::info!(
            "Session {} started (score {})",
            self.session.number,
            self.score.get()
        );
        true
    }

    /// Register the score display callback (replaces any previous one)
    pub fn set_score_observer(&mut self, observer: impl FnMut(u64) + 'static) {
        self.score.set_observer(observer);
    }

    /// Take pending display notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.session.drain_events()
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn score(&self) -> &ScoreStore<S> {
        &self.score
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentAudio;
    use crate::consts::{FIELD_HEIGHT, MIN_SPAWN_PERIOD, SIM_DT};
    use crate::persistence::MemoryStore;

    fn new_game() -> Game<MemoryStore, Vec<AudioCue>> {
        Game::new(Settings::default(), MemoryStore::new(), Vec::new(), 12345).unwrap()
    }

    #[test]
    fn test_first_frame_spawns_both_kinds() {
        let mut game = new_game();
        game.advance(&TickInput::default(), SIM_DT).unwrap();
        assert_eq!(game.session().count(Category::Obstacle), 1);
        // The bonus may land on the obstacle and be dropped
        assert!(game.session().count(Category::Bonus) <= 1);
        assert_eq!(game.phase(), GamePhase::Running);
    }

    #[test]
    fn test_music_starts_each_session() {
        let mut game = new_game();
        assert_eq!(
            game.audio(),
            &vec![AudioCue::BackgroundMusic { volume: 0.1 }]
        );

        let player = game.session().player().unwrap().id;
        let obstacle = game.spawn(Category::Obstacle).unwrap();
        game.on_contact(player, obstacle).unwrap();
        assert!(game.restart());
        assert_eq!(game.audio().len(), 2);
    }

    #[test]
    fn test_restart_while_running_is_noop() {
        let mut game = new_game();
        game.advance(&TickInput::default(), 0.5).unwrap();
        let entities = game.session().entities.len();
        let phase = game.session().scheduler.obstacle_timer().phase();

        assert!(!game.restart());
        game.advance(&TickInput::restart(), 0.0).unwrap();

        assert_eq!(game.session().number, 1);
        assert_eq!(game.session().count(Category::Player), 1);
        assert_eq!(game.session().entities.len(), entities);
        assert_eq!(game.session().scheduler.obstacle_timer().phase(), phase);
    }

    #[test]
    fn test_restart_events_announce_reset() {
        let mut game = new_game();
        let player = game.session().player().unwrap().id;
        let obstacle = game.spawn(Category::Obstacle).unwrap();
        game.on_contact(obstacle, player).unwrap();
        game.drain_events();

        game.advance(&TickInput::restart(), SIM_DT).unwrap();
        let events = game.drain_events();
        assert!(events.contains(&GameEvent::EntityRemoved {
            id: obstacle,
            category: Category::Obstacle,
            reason: RemovalReason::SessionReset,
        }));
        assert!(events.contains(&GameEvent::Restarted { session: 2 }));
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::EntitySpawned {
                category: Category::Player,
                ..
            }
        )));
    }

    #[test]
    fn test_restart_input_leaves_fresh_session_unplayed() {
        let mut game = new_game();
        let player = game.session().player().unwrap().id;
        let obstacle = game.spawn(Category::Obstacle).unwrap();
        game.on_contact(player, obstacle).unwrap();

        game.advance(&TickInput::restart(), SIM_DT).unwrap();
        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(game.session().entities.len(), 1);
        assert!(game.session().scheduler.at_phase_zero());
        assert_eq!(game.session().elapsed_secs, 0.0);

        game.advance(&TickInput::default(), SIM_DT).unwrap();
        assert_eq!(game.session().count(Category::Obstacle), 1);
    }

    #[test]
    fn test_oversized_frames_are_clamped() {
        let mut game = Game::new(Settings::default(), MemoryStore::new(), SilentAudio, 7).unwrap();
        for dt in [f32::INFINITY, 1.0e8, f32::NAN, -1.0, f32::NEG_INFINITY] {
            game.advance(&TickInput::default(), dt).unwrap();
        }
        let session = game.session();
        assert!(session.elapsed_secs <= 2.0 * MAX_FRAME_DT + 1e-6);
        assert_eq!(session.scheduler.obstacle_timer().fired(), 1);
        assert_eq!(session.scheduler.bonus_timer().fired(), 1);
        assert!(session.entities.len() <= 3);
        assert!(session.entities.iter().all(|e| e.pos.is_finite()));
    }

    #[test]
    fn test_degenerate_settings_are_sanitized() {
        let settings = Settings {
            field_height: f32::NAN,
            traversal_secs: 0.0,
            ..Settings::default()
        };
        let mut game = Game::new(settings, MemoryStore::new(), SilentAudio, 3).unwrap();
        assert_eq!(game.settings().field_height, FIELD_HEIGHT);
        assert_eq!(game.settings().traversal_secs, MIN_SPAWN_PERIOD);

        for _ in 0..300 {
            game.advance(&TickInput::default(), SIM_DT).unwrap();
            assert!(game.session().entities.iter().all(|e| e.pos.is_finite()));
        }
    }

    #[test]
    fn test_steering_moves_player() {
        let mut game = new_game();
        game.advance(&TickInput::steer(-120.0), SIM_DT).unwrap();
        assert_eq!(game.session().player().unwrap().pos.y, -120.0);
    }
}
