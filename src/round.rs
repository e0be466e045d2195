use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;
use rand::rngs::StdRng;

use crate::arena::{Arena, Position};
use crate::error::{GameError, Result};
use crate::input::Command;
use crate::placement::place_target;

pub const DEFAULT_ROUND_SECS: u64 = 60;

/// Result of advancing a round by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum RoundEvent {
    Continue,
    HitTarget,
    TimeExpired,
    QuitRequested,
}

impl RoundEvent {
    pub fn is_terminal(self) -> bool {
        matches!(self, RoundEvent::TimeExpired | RoundEvent::QuitRequested)
    }
}

/// One timed chase: the cursor, the dot it is chasing and the score so far.
#[derive(Debug)]
pub struct Round {
    arena: Arena,
    cursor: Position,
    target: Position,
    score: u32,
    started_at: Instant,
    duration: Duration,
    ended: Option<RoundEvent>,
    rng: StdRng,
}

impl Round {
    /// Starts a round with the cursor centered and a target placed near it.
    pub fn new(arena: Arena, started_at: Instant, duration: Duration, mut rng: StdRng) -> Self {
        let cursor = arena.center();
        let target = place_target(&arena, cursor, &mut rng);
        Self::laid_out(arena, cursor, target, started_at, duration, rng)
    }

    /// Starts a round from a fixed layout. Both cells must be inside the
    /// interior and distinct.
    pub fn with_positions(
        arena: Arena,
        cursor: Position,
        target: Position,
        started_at: Instant,
        duration: Duration,
        rng: StdRng,
    ) -> Result<Self> {
        if cursor == target || !arena.contains(cursor) || !arena.contains(target) {
            return Err(GameError::InvalidLayout { cursor, target });
        }
        Ok(Self::laid_out(arena, cursor, target, started_at, duration, rng))
    }

    fn laid_out(
        arena: Arena,
        cursor: Position,
        target: Position,
        started_at: Instant,
        duration: Duration,
        rng: StdRng,
    ) -> Self {
        Self {
            arena,
            cursor,
            target,
            score: 0,
            started_at,
            duration,
            ended: None,
            rng,
        }
    }

    pub fn arena(&self) -> Arena {
        self.arena
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn target(&self) -> Position {
        self.target
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// The terminal event, once the round has ended.
    pub fn outcome(&self) -> Option<RoundEvent> {
        self.ended
    }

    pub fn is_live(&self) -> bool {
        self.ended.is_none()
    }

    /// Time left at `now`, floored at zero.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.duration
            .saturating_sub(now.saturating_duration_since(self.started_at))
    }

    /// Time left in whole seconds, rounded up so the display only reads zero
    /// once the round is over.
    pub fn remaining_secs(&self, now: Instant) -> u64 {
        let remaining = self.remaining(now);
        remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0)
    }

    /// Advances the round by one tick.
    ///
    /// A quit key wins over everything else in the same tick, then the clock
    /// is checked, then the move is applied and tested for a hit. After a
    /// terminal event the round is frozen and keeps reporting that event.
    pub fn advance(&mut self, key: Option<KeyEvent>, now: Instant) -> RoundEvent {
        if let Some(ended) = self.ended {
            return ended;
        }

        let command = key.as_ref().and_then(Command::from_key);

        if command == Some(Command::Quit) {
            return self.finish(RoundEvent::QuitRequested);
        }

        if self.remaining(now).is_zero() {
            return self.finish(RoundEvent::TimeExpired);
        }

        if let Some(Command::Move(direction)) = command {
            self.cursor = self.arena.step(self.cursor, direction);
        }

        if self.cursor == self.target {
            self.score += 1;
            self.target = place_target(&self.arena, self.cursor, &mut self.rng);
            tracing::debug!(score = self.score, target = ?self.target, "target hit");
            return RoundEvent::HitTarget;
        }

        RoundEvent::Continue
    }

    fn finish(&mut self, event: RoundEvent) -> RoundEvent {
        self.ended = Some(event);
        tracing::info!(outcome = %event, score = self.score, "round ended");
        event
    }
}
