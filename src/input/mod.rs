pub mod state;
pub mod thread;

use crate::error::{AppError, AppResult};
use crate::render::AppState;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use std::sync::mpsc::{Receiver, TryRecvError};
use thread::InputMessage;

/// Applies every queued event. Returns true once quit was requested.
pub fn drain_input_events(
    app_state: &mut AppState,
    input_rx: &Receiver<InputMessage>,
) -> AppResult<bool> {
    loop {
        match input_rx.try_recv() {
            Ok(InputMessage::Event(event)) => {
                handle_input_event(app_state, event);
                if app_state.input_state.quit_requested {
                    return Ok(true);
                }
            }
            Ok(InputMessage::ReadError(err)) => return Err(AppError::Input(err)),
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => return Err(AppError::InputDisconnected),
        }
    }

    Ok(app_state.input_state.quit_requested)
}

pub fn handle_input_event(app_state: &mut AppState, event: Event) {
    match event {
        Event::Key(key_event) => {
            if !matches!(key_event.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                return;
            }

            match key_event.code {
                KeyCode::Esc => app_state.input_state.quit_requested = true,
                KeyCode::Tab => app_state.toggle_hud(),
                KeyCode::Char(c) => match c.to_ascii_lowercase() {
                    'q' => app_state.input_state.quit_requested = true,
                    'm' => app_state.cycle_generator(),
                    'r' => {
                        let signals = &mut app_state.input_state.signals;
                        signals.reduced_motion = !signals.reduced_motion;
                        app_state.needs_clear = true;
                    }
                    'h' => {
                        let input = &mut app_state.input_state;
                        input.hidden_by_user = !input.hidden_by_user;
                        input.refresh_visibility(app_state.viewport);
                        app_state.needs_clear = true;
                    }
                    _ => {}
                },
                _ => {}
            }
        }
        Event::FocusLost => {
            app_state.input_state.signals.tab_visible = false;
            app_state.needs_clear = true;
        }
        Event::FocusGained => {
            app_state.input_state.signals.tab_visible = true;
            app_state.needs_clear = true;
        }
        Event::Resize(cols, rows) => {
            app_state.resize_terminal((cols, rows));
        }
        _ => {}
    }
}
