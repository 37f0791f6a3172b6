//! Blocking terminal event source.

use super::terminal_guard::TerminationSignal;
use crate::core::event::{EventSource, InputEvent};
use std::io;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Reads crossterm events, turning a termination signal into [`InputEvent::Shutdown`].
pub struct CrosstermEvents {
    signals: Option<Receiver<TerminationSignal>>,
}

impl CrosstermEvents {
    pub fn new() -> Self {
        Self { signals: None }
    }

    pub fn with_signals(signals: Receiver<TerminationSignal>) -> Self {
        Self {
            signals: Some(signals),
        }
    }

    fn signalled(&mut self) -> bool {
        let Some(rx) = self.signals.as_ref() else {
            return false;
        };
        match rx.try_recv() {
            Ok(_) => true,
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                self.signals = None;
                false
            }
        }
    }
}

impl Default for CrosstermEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEvents {
    fn next_event(&mut self) -> io::Result<InputEvent> {
        loop {
            if self.signalled() {
                return Ok(InputEvent::Shutdown);
            }
            if !crossterm::event::poll(POLL_INTERVAL)? {
                continue;
            }
            let event = InputEvent::from(crossterm::event::read()?);
            if matches!(&event, InputEvent::Key(key) if key.is_release()) {
                continue;
            }
            return Ok(event);
        }
    }
}
