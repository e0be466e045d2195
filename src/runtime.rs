use std::cell::Cell;
use std::io;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// Source of key presses for the game loop
pub trait InputSource {
    /// Returns the next pending key press, or `None` right away if there is none.
    fn poll_key(&mut self) -> io::Result<Option<KeyEvent>>;

    /// Blocks until a key press arrives.
    fn wait_key(&mut self) -> io::Result<KeyEvent>;
}

/// Production input source reading crossterm events from the terminal
#[derive(Debug, Default)]
pub struct CrosstermInput;

impl CrosstermInput {
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for CrosstermInput {
    fn poll_key(&mut self) -> io::Result<Option<KeyEvent>> {
        while event::poll(Duration::ZERO)? {
            // resize and mouse events are dropped; the next tick redraws anyway
            if let CtEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(Some(key));
                }
            }
        }
        Ok(None)
    }

    fn wait_key(&mut self) -> io::Result<KeyEvent> {
        loop {
            if let CtEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(key);
                }
            }
        }
    }
}

/// Input source fed from a channel, for headless runs and tests
pub struct ChannelInput {
    rx: Receiver<KeyEvent>,
}

impl ChannelInput {
    pub fn new(rx: Receiver<KeyEvent>) -> Self {
        Self { rx }
    }
}

impl InputSource for ChannelInput {
    fn poll_key(&mut self) -> io::Result<Option<KeyEvent>> {
        match self.rx.try_recv() {
            Ok(key) => Ok(Some(key)),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => Ok(None),
        }
    }

    fn wait_key(&mut self) -> io::Result<KeyEvent> {
        self.rx
            .recv()
            .map_err(|_| io::Error::new(io::ErrorKind::UnexpectedEof, "input channel closed"))
    }
}

/// Monotonic time source sampled once per tick
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to, optionally by a fixed step per reading
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Cell<Duration>,
    step: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::stepping(Duration::ZERO)
    }

    /// Every call to `now` advances the clock by `step` after reading it.
    pub fn stepping(step: Duration) -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Cell::new(Duration::ZERO),
            step,
        }
    }

    pub fn advance(&self, by: Duration) {
        self.elapsed.set(self.elapsed.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let now = self.origin + self.elapsed.get();
        self.advance(self.step);
        now
    }
}

/// Idle pause between loop iterations
pub trait Ticker {
    fn interval(&self) -> Duration;

    fn idle(&self) {
        let interval = self.interval();
        if !interval.is_zero() {
            thread::sleep(interval);
        }
    }
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::sync::mpsc;

    #[test]
    fn channel_poll_is_non_blocking() {
        let (_tx, rx) = mpsc::channel();
        let mut input = ChannelInput::new(rx);
        assert!(input.poll_key().unwrap().is_none());
    }

    #[test]
    fn channel_passes_keys_in_order() {
        let (tx, rx) = mpsc::channel();
        tx.send(KeyEvent::new(KeyCode::Char('h'), KeyModifiers::NONE))
            .unwrap();
        tx.send(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE))
            .unwrap();
        let mut input = ChannelInput::new(rx);

        assert_eq!(input.poll_key().unwrap().unwrap().code, KeyCode::Char('h'));
        assert_eq!(input.wait_key().unwrap().code, KeyCode::Char('q'));
        assert!(input.poll_key().unwrap().is_none());
    }

    #[test]
    fn wait_on_closed_channel_errors() {
        let (tx, rx) = mpsc::channel::<KeyEvent>();
        drop(tx);
        let mut input = ChannelInput::new(rx);
        let err = input.wait_key().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn manual_clock_steps_after_each_reading() {
        let clock = ManualClock::stepping(Duration::from_secs(1));
        let first = clock.now();
        let second = clock.now();
        assert_eq!(second - first, Duration::from_secs(1));

        clock.advance(Duration::from_secs(10));
        assert_eq!(clock.now() - second, Duration::from_secs(11));
    }

    #[test]
    fn zero_ticker_does_not_sleep() {
        let ticker = FixedTicker::new(Duration::ZERO);
        let before = Instant::now();
        for _ in 0..1000 {
            ticker.idle();
        }
        assert!(before.elapsed() < Duration::from_secs(1));
    }
}
