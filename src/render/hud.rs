use crossterm::{
    cursor, queue,
    style::{Print, SetBackgroundColor, SetForegroundColor},
};
use std::fmt::Write as _;
use std::io::{self, Write};

use super::{make_color, AppState, Generator};

/// Rows taken by the HUD: a status line on top and a controls line at the bottom.
pub const HUD_ROWS: usize = 2;

const CONTROLS: &str = "M:Mode  Tab:HUD  R:Reduced motion  H:Hide  Q/Esc:Quit";

fn truncate_and_pad_in_place(text: &mut String, width: usize) {
    if width == 0 {
        text.clear();
        return;
    }

    let mut seen_chars = 0usize;
    let mut truncate_byte = None;
    for (idx, _) in text.char_indices() {
        if seen_chars == width {
            truncate_byte = Some(idx);
            break;
        }
        seen_chars += 1;
    }

    if let Some(idx) = truncate_byte {
        text.truncate(idx);
    } else {
        for _ in seen_chars..width {
            text.push(' ');
        }
    }
}

/// Formats the status line into `app_state.hud_string_buf`.
pub fn format_status(app_state: &mut AppState, width: usize) {
    let generator = app_state.generators[app_state.active].as_ref();
    let size = app_state.animator.size();
    let state = match app_state.input_state.signals.pause_reason() {
        Some(reason) => reason.name(),
        None if !generator.is_ready() => "waiting for source",
        None => "running",
    };

    let hud = &mut app_state.hud_string_buf;
    hud.clear();
    // Writing into a String cannot fail.
    let _ = write!(
        hud,
        "{}  Mode:{}  Tick:{}  Grid:{}x{}  State:{}",
        generator.label(),
        generator.mode().name(),
        app_state.animator.tick(),
        size.cols,
        size.rows,
        state
    );
    truncate_and_pad_in_place(hud, width);
}

pub fn format_controls(app_state: &mut AppState, width: usize) {
    let note = app_state.generators[app_state.active].note();
    let hud = &mut app_state.hud_string_buf;
    hud.clear();
    let _ = write!(hud, "{note}  |  {CONTROLS}");
    truncate_and_pad_in_place(hud, width);
}

pub fn draw_hud(
    app_state: &mut AppState,
    cols: u16,
    rows: u16,
    stdout: &mut impl Write,
) -> io::Result<()> {
    let width = cols as usize;
    let tc = app_state.use_truecolor;

    format_status(app_state, width);
    queue!(
        stdout,
        cursor::MoveTo(0, 0),
        SetBackgroundColor(make_color([0, 0, 0], tc)),
        SetForegroundColor(make_color([245, 245, 245], tc)),
        Print(app_state.hud_string_buf.as_str())
    )?;

    format_controls(app_state, width);
    queue!(
        stdout,
        cursor::MoveTo(0, rows.saturating_sub(1)),
        SetBackgroundColor(make_color([0, 0, 0], tc)),
        SetForegroundColor(make_color([220, 220, 220], tc)),
        Print(app_state.hud_string_buf.as_str())
    )?;

    Ok(())
}
