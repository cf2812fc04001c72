//! Event handling for the interactive interface

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

/// Terminal events
#[derive(Debug)]
pub enum Event {
    /// Key press
    Key(KeyEvent),
    /// Periodic tick for housekeeping while idle
    Tick,
}

/// Polls terminal events on a dedicated thread
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    /// Creates a handler emitting a tick after `tick_rate_ms` of idle time
    pub fn new(tick_rate_ms: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate_ms);
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || loop {
            let ready = event::poll(tick_rate).unwrap_or(false);

            let message = if ready {
                match event::read() {
                    // Key releases are filtered out; only presses count
                    Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        Some(Event::Key(key))
                    }
                    _ => None,
                }
            } else {
                Some(Event::Tick)
            };

            if let Some(message) = message {
                if tx.send(message).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }

    /// Receives the next event (blocking)
    pub fn next(&self) -> Result<Event> {
        Ok(self.rx.recv()?)
    }
}
