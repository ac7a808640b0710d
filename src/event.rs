//! Terminal input that also notices when the terminal goes away.
//!
//! A hung-up tty raises SIGHUP and then fails every read. Both signals
//! are turned into flags so the loop can leave cleanly instead of being
//! killed or spinning on a dead descriptor.

use crossterm::event::{self, Event};
use log::info;
use signal_hook::consts::{SIGHUP, SIGTERM};
use signal_hook::SigId;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Upper bound on how long a hangup can go unnoticed.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug)]
pub enum Input {
    Event(Event),
    /// The terminal hung up or reached end of input.
    Closed,
    /// SIGTERM was received.
    Terminated,
}

pub trait EventSource {
    /// Block until the next input. Unrecoverable read failures are errors.
    fn next_input(&mut self) -> io::Result<Input>;
}

/// Reads from the controlling terminal through crossterm.
pub struct TerminalEvents {
    hangup: Arc<AtomicBool>,
    terminate: Arc<AtomicBool>,
    signal_ids: Vec<SigId>,
}

impl TerminalEvents {
    pub fn new() -> io::Result<Self> {
        let hangup = Arc::new(AtomicBool::new(false));
        let terminate = Arc::new(AtomicBool::new(false));
        let signal_ids = vec![
            signal_hook::flag::register(SIGHUP, Arc::clone(&hangup))?,
            signal_hook::flag::register(SIGTERM, Arc::clone(&terminate))?,
        ];

        Ok(Self {
            hangup,
            terminate,
            signal_ids,
        })
    }

    fn pending_signal(&self) -> Option<Input> {
        if self.hangup.load(Ordering::SeqCst) {
            info!("terminal hung up");
            Some(Input::Closed)
        } else if self.terminate.load(Ordering::SeqCst) {
            info!("received SIGTERM");
            Some(Input::Terminated)
        } else {
            None
        }
    }
}

impl EventSource for TerminalEvents {
    fn next_input(&mut self) -> io::Result<Input> {
        loop {
            if let Some(input) = self.pending_signal() {
                return Ok(input);
            }

            let ready = match event::poll(POLL_INTERVAL) {
                Ok(ready) => ready,
                Err(e) => return classify_read_error(e, self.hangup.load(Ordering::SeqCst)),
            };
            if !ready {
                continue;
            }

            return match event::read() {
                Ok(event) => Ok(Input::Event(event)),
                Err(e) => classify_read_error(e, self.hangup.load(Ordering::SeqCst)),
            };
        }
    }
}

impl Drop for TerminalEvents {
    fn drop(&mut self) {
        for id in self.signal_ids.drain(..) {
            signal_hook::low_level::unregister(id);
        }
    }
}

/// A read failure after hangup, or an end-of-stream error, means the input is gone.
fn classify_read_error(e: io::Error, hung_up: bool) -> io::Result<Input> {
    let closed = hung_up
        || matches!(
            e.kind(),
            io::ErrorKind::UnexpectedEof | io::ErrorKind::BrokenPipe
        );

    if closed {
        info!("input stream closed: {}", e);
        Ok(Input::Closed)
    } else {
        Err(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signal_hook::low_level::raise;

    // Signal handlers are process-wide; keep every raise in this one test.
    #[test]
    fn signals_end_input() {
        let mut events = TerminalEvents::new().unwrap();
        raise(SIGHUP).unwrap();
        assert!(matches!(events.next_input().unwrap(), Input::Closed));
        drop(events);

        let mut events = TerminalEvents::new().unwrap();
        raise(SIGTERM).unwrap();
        assert!(matches!(events.next_input().unwrap(), Input::Terminated));
    }

    #[test]
    fn any_read_error_after_hangup_is_closed() {
        let eio = io::Error::new(io::ErrorKind::Other, "Input/output error");
        assert!(matches!(classify_read_error(eio, true), Ok(Input::Closed)));
    }

    #[test]
    fn end_of_stream_is_closed() {
        let eof = io::Error::from(io::ErrorKind::UnexpectedEof);
        assert!(matches!(classify_read_error(eof, false), Ok(Input::Closed)));
        let pipe = io::Error::from(io::ErrorKind::BrokenPipe);
        assert!(matches!(classify_read_error(pipe, false), Ok(Input::Closed)));
    }

    #[test]
    fn other_read_errors_are_fatal() {
        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "no tty");
        let err = classify_read_error(denied, false).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }
}
