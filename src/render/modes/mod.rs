pub mod globe;
pub mod motif;
pub mod portrait;
pub mod satellite;
pub mod saturn;
pub mod typewriter;

pub const GLOBE_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];
pub const GLOBE_AMBIENT: char = '.';
pub const SATURN_RAMP: &[char] = &[' ', '.', ',', ':', ';', '+', '*', '?', '%', 'S', '#', '@'];
pub const STAR_GLYPHS: [char; 3] = ['\u{2726}', '\u{2727}', '*'];
pub const BLINK_GLYPH: char = '\u{25C6}';
pub const WAVE_GLYPHS: [char; 3] = ['\u{00B7}', '\u{2219}', '\u{2022}'];

pub fn template_width(lines: &[&str]) -> usize {
    lines.iter().map(|line| line.chars().count()).max().unwrap_or(0)
}
