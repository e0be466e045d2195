use crate::input::PromptChoice;
use crate::round::RoundEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SessionState {
    Idle,
    RoundActive,
    RoundOver,
    Terminated,
}

/// Replay cycle and the best score seen since the process started.
#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    high_score: u32,
    rounds_played: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            state: SessionState::Idle,
            high_score: 0,
            rounds_played: 0,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn is_terminated(&self) -> bool {
        self.state == SessionState::Terminated
    }

    /// Enters `RoundActive` from `Idle`. Returns false from any other state.
    pub fn begin(&mut self) -> bool {
        if self.state != SessionState::Idle {
            return false;
        }
        self.state = SessionState::RoundActive;
        self.rounds_played += 1;
        true
    }

    /// Records how a round ended.
    ///
    /// Expiry folds the score into the high score and leaves the session
    /// waiting on the end prompt; a quit terminates the session outright.
    /// Non-terminal events and calls outside `RoundActive` are ignored.
    pub fn end_round(&mut self, event: RoundEvent, score: u32) -> SessionState {
        if self.state != SessionState::RoundActive {
            return self.state;
        }

        match event {
            RoundEvent::TimeExpired => {
                if score > self.high_score {
                    tracing::info!(previous = self.high_score, score, "new high score");
                    self.high_score = score;
                }
                self.state = SessionState::RoundOver;
            }
            RoundEvent::QuitRequested => {
                self.state = SessionState::Terminated;
            }
            RoundEvent::Continue | RoundEvent::HitTarget => {}
        }

        self.state
    }

    /// Applies the player's answer to the end prompt.
    pub fn choose(&mut self, choice: PromptChoice) -> SessionState {
        if self.state != SessionState::RoundOver {
            return self.state;
        }

        self.state = match choice {
            PromptChoice::Replay => {
                self.rounds_played += 1;
                SessionState::RoundActive
            }
            PromptChoice::Quit => SessionState::Terminated,
        };

        self.state
    }
}
