use crossterm::{
    cursor,
    event::Event,
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, Write};
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use super::grid::Grid;
use super::pipeline::frame_origin;
use super::{make_color, AppState, Generator};
use crate::animation::StepOutcome;
use crate::error::AppResult;
use crate::input::thread::{InputMessage, InputSubscription};
use crate::input::{drain_input_events, handle_input_event};
use crate::scheduler::Scheduler;

/// Upper bound on how long the loop blocks waiting for input.
const MAX_IDLE_WAIT: Duration = Duration::from_millis(250);

pub fn draw_frame(app_state: &mut AppState, grid: &Grid, stdout: &mut impl Write) -> io::Result<()> {
    let (cols, rows) = app_state.terminal_size;
    let cols = cols.max(1) as usize;
    let rows = rows.max(1) as usize;

    if app_state.needs_clear {
        queue!(stdout, ResetColor, terminal::Clear(ClearType::All))?;
        app_state.needs_clear = false;
    }

    let (top, bottom) = if app_state.show_hud { (1, rows.saturating_sub(1)) } else { (0, rows) };

    if !app_state.input_state.hidden_by_user {
        let (origin_x, origin_y) = frame_origin(grid.size(), app_state.viewport);
        let visible_cols = cols.saturating_sub(origin_x).min(grid.width());
        let mut line = String::with_capacity(visible_cols * 3);

        queue!(
            stdout,
            SetBackgroundColor(Color::Reset),
            SetForegroundColor(make_color(app_state.color, app_state.use_truecolor))
        )?;
        for (y, row) in grid.rows().enumerate() {
            let screen_y = top + origin_y + y;
            if screen_y >= bottom {
                break;
            }
            line.clear();
            line.extend(&row[..visible_cols]);
            queue!(
                stdout,
                cursor::MoveTo(origin_x as u16, screen_y as u16),
                Print(line.as_str())
            )?;
        }
    }

    if app_state.show_hud {
        super::hud::draw_hud(app_state, cols as u16, rows as u16, stdout)?;
    }

    queue!(stdout, ResetColor)?;
    stdout.flush()
}

fn redraw(app_state: &mut AppState, stdout: &mut impl Write) -> io::Result<()> {
    let grid = app_state.render_current();
    draw_frame(app_state, &grid, stdout)
}

/// Applies one input event plus anything queued behind it. Returns true on quit.
fn apply_input(
    app_state: &mut AppState,
    scheduler: &mut Scheduler,
    event: Event,
    queued: &Receiver<InputMessage>,
    stdout: &mut impl Write,
) -> AppResult<bool> {
    let active = app_state.active;
    handle_input_event(app_state, event);
    if app_state.input_state.quit_requested || drain_input_events(app_state, queued)? {
        scheduler.cancel();
        return Ok(true);
    }

    if app_state.active != active {
        // A fresh generator gets a fresh schedule.
        scheduler.start(Instant::now(), app_state.generator().initial_delay());
    } else if !scheduler.is_armed() && !app_state.is_finished() {
        // A resize restarted the clock of a generator that had gone idle.
        let delay = app_state.generator().step_delay(app_state.animator.size());
        scheduler.start(Instant::now(), delay);
    }
    if app_state.needs_clear {
        redraw(app_state, stdout)?;
    }
    Ok(false)
}

/// Runs the due step, then re-arms from completion or goes idle once the generator is finished.
fn run_due_step(app_state: &mut AppState, scheduler: &mut Scheduler, stdout: &mut impl Write) -> io::Result<()> {
    if let StepOutcome::Advanced(_) = app_state.step() {
        redraw(app_state, stdout)?;
    }
    if app_state.is_finished() {
        log::debug!("{} finished at tick {}", app_state.mode().name(), app_state.animator.tick());
        scheduler.cancel();
    } else {
        let delay = app_state.generator().step_delay(app_state.animator.size());
        scheduler.reschedule(Instant::now(), delay);
    }
    Ok(())
}

pub fn run_app_loop(
    app_state: &mut AppState,
    input: &InputSubscription,
    stdout: &mut impl Write,
) -> AppResult<()> {
    let mut scheduler = Scheduler::default();
    scheduler.start(Instant::now(), app_state.generator().initial_delay());
    redraw(app_state, stdout)?;

    loop {
        let wait = scheduler
            .time_until_due(Instant::now())
            .map_or(MAX_IDLE_WAIT, |d| d.min(MAX_IDLE_WAIT));

        if let Some(event) = input.recv_timeout(wait)? {
            if apply_input(app_state, &mut scheduler, event, input.receiver(), stdout)? {
                break;
            }
        }

        if scheduler.is_due(Instant::now()) {
            run_due_step(app_state, &mut scheduler, stdout)?;
        }
    }

    Ok(())
}

/// Renders `frames` steps without a terminal, each frame followed by a blank line.
pub fn run_headless(app_state: &mut AppState, frames: usize, out: &mut impl Write) -> AppResult<()> {
    app_state.input_state.assume_visible();
    for _ in 0..frames {
        if let StepOutcome::Paused(reason) = app_state.step() {
            log::debug!("headless step paused: {}", reason.name());
        }
        let grid = app_state.render_current();
        writeln!(out, "{}", grid.to_text())?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}
