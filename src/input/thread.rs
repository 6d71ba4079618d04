use crossterm::event::{self, Event};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// How often the reader thread wakes to check its stop flag.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug)]
pub enum InputMessage {
    Event(Event),
    ReadError(String),
}

/// Terminal event source, subscribed for the lifetime of the run.
/// Dropping it stops and joins the reader thread.
pub struct InputSubscription {
    rx: Receiver<InputMessage>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl InputSubscription {
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let handle = std::thread::spawn(move || {
            while !stop_flag.load(Ordering::Relaxed) {
                let message = match event::poll(POLL_INTERVAL) {
                    Ok(false) => continue,
                    Ok(true) => match event::read() {
                        Ok(ev) => InputMessage::Event(ev),
                        Err(err) => InputMessage::ReadError(err.to_string()),
                    },
                    Err(err) => InputMessage::ReadError(err.to_string()),
                };
                let failed = matches!(message, InputMessage::ReadError(_));
                if tx.send(message).is_err() || failed {
                    break;
                }
            }
        });

        Self {
            rx,
            stop,
            handle: Some(handle),
        }
    }

    pub fn receiver(&self) -> &Receiver<InputMessage> {
        &self.rx
    }

    /// Waits up to `timeout` for the next event; `Ok(None)` on timeout.
    pub fn recv_timeout(&self, timeout: Duration) -> AppResult<Option<Event>> {
        next_event(&self.rx, timeout)
    }
}

impl Drop for InputSubscription {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("input thread panicked");
            } else {
                log::debug!("input thread stopped");
            }
        }
    }
}

pub fn next_event(rx: &Receiver<InputMessage>, timeout: Duration) -> AppResult<Option<Event>> {
    match rx.recv_timeout(timeout) {
        Ok(InputMessage::Event(ev)) => Ok(Some(ev)),
        Ok(InputMessage::ReadError(err)) => Err(AppError::Input(err)),
        Err(RecvTimeoutError::Timeout) => Ok(None),
        Err(RecvTimeoutError::Disconnected) => Err(AppError::InputDisconnected),
    }
}
