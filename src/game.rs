use std::time::Duration;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::arena::Arena;
use crate::config::Config;
use crate::error::Result;
use crate::input::PromptChoice;
use crate::round::{Round, RoundEvent};
use crate::runtime::{Clock, InputSource, Ticker};
use crate::session::{Session, SessionState};
use crate::ui::{Glyph, RenderSurface, INSTRUCTIONS};

/// Settings a game needs from the outside
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    pub round_duration: Duration,
}

impl From<&Config> for GameSettings {
    fn from(cfg: &Config) -> Self {
        Self {
            round_duration: cfg.round_duration(),
        }
    }
}

/// Top-level driver: owns the session and runs rounds until the player quits.
pub struct Game<S, I, C, T> {
    surface: S,
    input: I,
    clock: C,
    ticker: T,
    settings: GameSettings,
    session: Session,
    rng: StdRng,
}

impl<S, I, C, T> Game<S, I, C, T>
where
    S: RenderSurface,
    I: InputSource,
    C: Clock,
    T: Ticker,
{
    pub fn new(surface: S, input: I, clock: C, ticker: T, settings: GameSettings) -> Self {
        Self::with_rng(
            surface,
            input,
            clock,
            ticker,
            settings,
            StdRng::from_entropy(),
        )
    }

    pub fn with_rng(
        surface: S,
        input: I,
        clock: C,
        ticker: T,
        settings: GameSettings,
        rng: StdRng,
    ) -> Self {
        Self {
            surface,
            input,
            clock,
            ticker,
            settings,
            session: Session::new(),
            rng,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Plays rounds until the session terminates. Returns the high score.
    pub fn run(&mut self) -> Result<u32> {
        self.session.begin();

        while self.session.state() == SessionState::RoundActive {
            let mut round = self.start_round()?;
            let event = self.play_round(&mut round)?;

            if self.session.end_round(event, round.score()) == SessionState::RoundOver {
                let choice = self.end_prompt(round.score())?;
                self.session.choose(choice);
            }
        }

        tracing::info!(
            high_score = self.session.high_score(),
            rounds = self.session.rounds_played(),
            "session terminated"
        );
        Ok(self.session.high_score())
    }

    /// Builds a fresh round sized to the surface and draws its first frame.
    pub fn start_round(&mut self) -> Result<Round> {
        let (height, width) = self.surface.size()?;
        let arena = Arena::for_terminal(height, width)?;
        let round = Round::new(
            arena,
            self.clock.now(),
            self.settings.round_duration,
            StdRng::seed_from_u64(self.rng.gen()),
        );

        tracing::info!(
            round = self.session.rounds_played(),
            height = arena.height(),
            width = arena.width(),
            "round started"
        );

        self.surface.clear_arena(arena);
        self.surface.draw_border();
        self.surface.draw_glyph(round.target(), Glyph::Target);
        self.surface.draw_glyph(round.cursor(), Glyph::Cursor);
        self.surface
            .draw_status_bar(round.score(), round.remaining_secs(round.started_at()));
        self.surface.draw_instructions(INSTRUCTIONS);
        self.surface.present()?;

        Ok(round)
    }

    /// Runs the tick loop until the round reports a terminal event.
    pub fn play_round(&mut self, round: &mut Round) -> Result<RoundEvent> {
        loop {
            let now = self.clock.now();
            let key = self.input.poll_key()?;
            let previous = round.cursor();

            let event = round.advance(key, now);
            if event.is_terminal() {
                return Ok(event);
            }

            if round.cursor() != previous {
                self.surface.erase_cell(previous);
            }
            if event == RoundEvent::HitTarget {
                self.surface.draw_glyph(round.target(), Glyph::Target);
            }
            self.surface.draw_glyph(round.cursor(), Glyph::Cursor);
            self.surface
                .draw_status_bar(round.score(), round.remaining_secs(now));
            self.surface.present()?;

            self.ticker.idle();
        }
    }

    /// Shows the game-over box and blocks until the player picks an option.
    fn end_prompt(&mut self, score: u32) -> Result<PromptChoice> {
        self.surface.draw_status_bar(score, 0);
        self.surface
            .show_end_prompt(score, self.session.high_score());
        self.surface.present()?;

        loop {
            let key = self.input.wait_key()?;
            if let Some(choice) = PromptChoice::from_key(&key) {
                tracing::info!(%choice, "end prompt answered");
                return Ok(choice);
            }
        }
    }
}
