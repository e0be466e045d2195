use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use dotchase::arena::{Arena, Position};
use dotchase::game::{Game, GameSettings};
use dotchase::round::{Round, RoundEvent};
use dotchase::runtime::{FixedTicker, InputSource, ManualClock};
use dotchase::session::SessionState;
use dotchase::ui::{Glyph, RenderSurface, TerminalSurface};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::backend::TestBackend;

// Headless sessions driven through the public game API without a TTY.

fn key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

/// Feeds one scripted entry per tick, and a separate queue for the end prompt.
#[derive(Default)]
struct ScriptedInput {
    ticks: VecDeque<Option<KeyEvent>>,
    prompt: VecDeque<KeyEvent>,
}

impl ScriptedInput {
    fn new(ticks: Vec<Option<KeyEvent>>, prompt: Vec<KeyEvent>) -> Self {
        Self {
            ticks: ticks.into(),
            prompt: prompt.into(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll_key(&mut self) -> io::Result<Option<KeyEvent>> {
        Ok(self.ticks.pop_front().flatten())
    }

    fn wait_key(&mut self) -> io::Result<KeyEvent> {
        self.prompt
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }
}

/// What the player can see on screen, shared with an input that reacts to it
#[derive(Debug, Default)]
struct Board {
    cursor: Option<Position>,
    target: Option<Position>,
    score: u32,
}

/// Walks the cursor straight at the dot until the first catch, then idles.
struct ChasingInput {
    board: Rc<RefCell<Board>>,
    caught: bool,
    prompt: VecDeque<KeyEvent>,
}

impl InputSource for ChasingInput {
    fn poll_key(&mut self) -> io::Result<Option<KeyEvent>> {
        let board = self.board.borrow();
        self.caught |= board.score > 0;
        if self.caught {
            return Ok(None);
        }

        let (Some(cursor), Some(target)) = (board.cursor, board.target) else {
            return Ok(None);
        };
        let c = if cursor.row < target.row {
            'j'
        } else if cursor.row > target.row {
            'k'
        } else if cursor.col < target.col {
            'l'
        } else {
            'h'
        };
        Ok(Some(key(c)))
    }

    fn wait_key(&mut self) -> io::Result<KeyEvent> {
        self.prompt
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }
}

/// Surface that only keeps track of what it was asked to do
#[derive(Default)]
struct RecordingSurface {
    board: Rc<RefCell<Board>>,
    rounds: usize,
    prompts: Vec<(u32, u32)>,
    statuses: Vec<(u32, u64)>,
    cursor: Option<Position>,
    presents: usize,
}

impl RenderSurface for RecordingSurface {
    fn size(&self) -> io::Result<(u16, u16)> {
        Ok((24, 80))
    }

    fn clear_arena(&mut self, _arena: Arena) {
        self.rounds += 1;
        self.cursor = None;
        *self.board.borrow_mut() = Board::default();
    }

    fn draw_border(&mut self) {}

    fn draw_glyph(&mut self, pos: Position, glyph: Glyph) {
        let mut board = self.board.borrow_mut();
        match glyph {
            Glyph::Cursor => {
                self.cursor = Some(pos);
                board.cursor = Some(pos);
            }
            Glyph::Target => board.target = Some(pos),
        }
    }

    fn erase_cell(&mut self, pos: Position) {
        assert_eq!(self.cursor, Some(pos), "erased a cell the cursor was not on");
        self.cursor = None;
    }

    fn draw_status_bar(&mut self, score: u32, remaining_secs: u64) {
        self.statuses.push((score, remaining_secs));
        self.board.borrow_mut().score = score;
    }

    fn draw_instructions(&mut self, _text: &str) {}

    fn show_end_prompt(&mut self, score: u32, high_score: u32) {
        self.prompts.push((score, high_score));
    }

    fn present(&mut self) -> io::Result<()> {
        self.presents += 1;
        Ok(())
    }
}

fn settings() -> GameSettings {
    GameSettings {
        round_duration: Duration::from_secs(60),
    }
}

#[test]
fn quit_mid_round_terminates_without_prompt() {
    let input = ScriptedInput::new(vec![None, Some(key('h')), None, Some(key('q'))], vec![]);
    let mut game = Game::with_rng(
        RecordingSurface::default(),
        input,
        ManualClock::stepping(Duration::from_secs(1)),
        FixedTicker::new(Duration::ZERO),
        settings(),
        StdRng::seed_from_u64(11),
    );

    let high_score = game.run().unwrap();

    assert_eq!(high_score, 0);
    assert_eq!(game.session().state(), SessionState::Terminated);
    assert_eq!(game.session().rounds_played(), 1);
    assert!(game.surface().prompts.is_empty());
    // first frame plus three live ticks; the quit tick draws nothing
    assert_eq!(game.surface().presents, 4);
}

#[test]
fn idle_round_expires_and_shows_prompt() {
    let input = ScriptedInput::new(vec![], vec![key('x'), key('q')]);
    let mut game = Game::with_rng(
        RecordingSurface::default(),
        input,
        ManualClock::stepping(Duration::from_secs(61)),
        FixedTicker::new(Duration::ZERO),
        settings(),
        StdRng::seed_from_u64(3),
    );

    game.run().unwrap();

    let surface = game.surface();
    assert_eq!(surface.prompts, vec![(0, 0)]);
    assert_eq!(surface.statuses.first(), Some(&(0, 60)));
    assert_eq!(surface.statuses.last(), Some(&(0, 0)));
    assert_eq!(game.session().state(), SessionState::Terminated);
}

#[test]
fn replay_starts_a_fresh_round() {
    let input = ScriptedInput::new(vec![], vec![key('p'), key('q')]);
    let mut game = Game::with_rng(
        RecordingSurface::default(),
        input,
        ManualClock::stepping(Duration::from_secs(20)),
        FixedTicker::new(Duration::ZERO),
        settings(),
        StdRng::seed_from_u64(8),
    );

    game.run().unwrap();

    assert_eq!(game.surface().rounds, 2);
    assert_eq!(game.surface().prompts.len(), 2);
    assert_eq!(game.session().rounds_played(), 2);
    assert_eq!(game.session().state(), SessionState::Terminated);
}

#[test]
fn caught_dot_reaches_prompt_and_carries_high_score_into_replay() {
    let surface = RecordingSurface::default();
    let input = ChasingInput {
        board: Rc::clone(&surface.board),
        caught: false,
        prompt: VecDeque::from(vec![key('p'), key('q')]),
    };
    let mut game = Game::with_rng(
        surface,
        input,
        ManualClock::stepping(Duration::from_millis(100)),
        FixedTicker::new(Duration::ZERO),
        settings(),
        StdRng::seed_from_u64(17),
    );

    let high_score = game.run().unwrap();

    assert_eq!(high_score, 1);
    assert_eq!(game.surface().prompts, vec![(1, 1), (0, 1)]);
    assert_eq!(game.session().high_score(), 1);
    assert_eq!(game.session().rounds_played(), 2);
}

#[test]
fn remaining_time_counts_down_and_never_goes_negative() {
    let input = ScriptedInput::new(vec![], vec![key('q')]);
    let mut game = Game::with_rng(
        RecordingSurface::default(),
        input,
        ManualClock::stepping(Duration::from_millis(700)),
        FixedTicker::new(Duration::ZERO),
        settings(),
        StdRng::seed_from_u64(2),
    );

    game.run().unwrap();

    let remaining: Vec<u64> = game.surface().statuses.iter().map(|s| s.1).collect();
    assert!(remaining.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(remaining.last(), Some(&0));
    assert!(remaining[..remaining.len() - 1].iter().all(|&r| r > 0));
}

#[test]
fn closed_prompt_input_is_an_error() {
    let input = ScriptedInput::new(vec![], vec![]);
    let mut game = Game::with_rng(
        RecordingSurface::default(),
        input,
        ManualClock::stepping(Duration::from_secs(61)),
        FixedTicker::new(Duration::ZERO),
        settings(),
        StdRng::seed_from_u64(4),
    );

    assert!(game.run().is_err());
}

#[test]
fn game_over_screen_is_rendered_to_the_terminal() {
    let surface = TerminalSurface::new(TestBackend::new(60, 20)).unwrap();
    let input = ScriptedInput::new(vec![], vec![key('q')]);
    let mut game = Game::with_rng(
        surface,
        input,
        ManualClock::stepping(Duration::from_secs(61)),
        FixedTicker::new(Duration::ZERO),
        settings(),
        StdRng::seed_from_u64(9),
    );

    game.run().unwrap();

    let buf = game.surface().backend().buffer();
    let text: String = (0..buf.area.height)
        .map(|y| {
            (0..buf.area.width)
                .map(|x| buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n");

    assert!(text.contains("Game Over!"));
    assert!(text.contains("High Score: 0"));
    assert!(text.contains("Score: 0 | Time: 0s"));
    assert!(text.contains("Use h,j,k,l to move | q to quit"));
}

#[test]
fn catching_the_dot_next_to_the_cursor() {
    // interior of 10 rows by 20 columns
    let arena = Arena::new(12, 22).unwrap();
    let start = Instant::now();
    let mut round = Round::with_positions(
        arena,
        Position::new(5, 10),
        Position::new(5, 11),
        start,
        Duration::from_secs(60),
        StdRng::seed_from_u64(21),
    )
    .unwrap();

    let event = round.advance(Some(key('l')), start + Duration::from_secs(2));

    assert_eq!(event, RoundEvent::HitTarget);
    assert_eq!(round.cursor(), Position::new(5, 11));
    assert_eq!(round.score(), 1);
    assert_ne!(round.target(), Position::new(5, 11));
}
