use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor::{self, MoveTo},
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::renderer::{FrameBuffer, SHADE_BUCKETS};

/// Two terminal columns per map "pixel", roughly square on most fonts.
pub const PIXEL: &str = "  ";

/// Scoped raw-mode acquisition. Drop restores cooked mode, the main screen
/// and the cursor, so the terminal comes back usable on quit, error return
/// and panic unwind alike.
pub struct RawModeGuard;

impl RawModeGuard {
    pub fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
        if let Err(err) = terminal::disable_raw_mode() {
            // The process is exiting either way; surface it and move on.
            eprintln!("failed to restore terminal mode: {err}");
        }
    }
}

/// The three semantic colors of a frame: sky, floor, and one wall color per
/// distance shade bucket.
pub struct Palette {
    pub sky: Color,
    pub floor: Color,
    pub wall: [Color; SHADE_BUCKETS],
}

impl Palette {
    /// Truecolor when the terminal advertises it, otherwise a 256-color
    /// approximation. Degradation is silent.
    pub fn detect() -> Self {
        let truecolor = std::env::var("COLORTERM")
            .map(|v| v.contains("truecolor") || v.contains("24bit"))
            .unwrap_or(false);
        if truecolor { Self::rgb() } else { Self::indexed() }
    }

    pub fn rgb() -> Self {
        let wall = [
            (255, 50, 50),
            (200, 30, 30),
            (150, 20, 20),
            (100, 10, 10),
            (60, 5, 5),
        ]
        .map(|(r, g, b)| Color::Rgb { r, g, b });
        Self {
            sky: Color::Rgb { r: 135, g: 206, b: 250 },
            floor: Color::Rgb { r: 50, g: 50, b: 50 },
            wall,
        }
    }

    /// xterm-256 red ramp, light blue sky, dark grey floor.
    pub fn indexed() -> Self {
        Self {
            sky: Color::AnsiValue(117),
            floor: Color::AnsiValue(238),
            wall: [196, 160, 124, 88, 52].map(Color::AnsiValue),
        }
    }
}

/// Movement intents the render loop consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
    RotateLeft,
    RotateRight,
    Quit,
}

fn map_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Key> {
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Key::Quit);
    }
    match code {
        KeyCode::Char('w') => Some(Key::Forward),
        KeyCode::Char('s') => Some(Key::Backward),
        KeyCode::Char('a') => Some(Key::StrafeLeft),
        KeyCode::Char('d') => Some(Key::StrafeRight),
        KeyCode::Char('e') => Some(Key::RotateLeft),
        KeyCode::Char('q') => Some(Key::RotateRight),
        KeyCode::Esc => Some(Key::Quit),
        _ => None,
    }
}

/// Non-blocking availability check, then a blocking single-event read.
/// Returns None when no key is pending or the event isn't a mapped press.
pub fn poll_key() -> io::Result<Option<Key>> {
    if !event::poll(Duration::ZERO)? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(k) if k.kind != KeyEventKind::Release => Ok(map_key(k.code, k.modifiers)),
        _ => Ok(None),
    }
}

/// Row pass: home the cursor and repaint every cell. Geometry is per-column,
/// output is row-major, so each row consults every column's slice. Escapes
/// are only emitted when the color changes between cells, and everything is
/// queued and flushed once per frame.
pub fn present(out: &mut impl Write, fb: &FrameBuffer, palette: &Palette) -> io::Result<()> {
    let mut current: Option<Color> = None;
    for y in 0..fb.height() {
        queue!(out, MoveTo(0, y as u16))?;
        for x in 0..fb.width() {
            let slice = fb.slice(x);
            let color = if y < slice.top {
                palette.sky
            } else if y <= slice.bottom {
                palette.wall[slice.shade]
            } else {
                palette.floor
            };
            if current != Some(color) {
                queue!(out, SetBackgroundColor(color))?;
                current = Some(color);
            }
            queue!(out, Print(PIXEL))?;
        }
    }
    queue!(out, ResetColor)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{DEFAULT_MAP, MapGrid};
    use crate::player::Player;

    #[test]
    fn key_mapping_covers_all_intents() {
        assert_eq!(map_key(KeyCode::Char('w'), KeyModifiers::NONE), Some(Key::Forward));
        assert_eq!(map_key(KeyCode::Char('s'), KeyModifiers::NONE), Some(Key::Backward));
        assert_eq!(map_key(KeyCode::Char('a'), KeyModifiers::NONE), Some(Key::StrafeLeft));
        assert_eq!(map_key(KeyCode::Char('d'), KeyModifiers::NONE), Some(Key::StrafeRight));
        assert_eq!(map_key(KeyCode::Char('e'), KeyModifiers::NONE), Some(Key::RotateLeft));
        assert_eq!(map_key(KeyCode::Char('q'), KeyModifiers::NONE), Some(Key::RotateRight));
        assert_eq!(map_key(KeyCode::Esc, KeyModifiers::NONE), Some(Key::Quit));
        assert_eq!(map_key(KeyCode::Char('c'), KeyModifiers::CONTROL), Some(Key::Quit));
        assert_eq!(map_key(KeyCode::Char('z'), KeyModifiers::NONE), None);
    }

    #[test]
    fn palettes_have_one_color_per_bucket() {
        for palette in [Palette::rgb(), Palette::indexed()] {
            assert_eq!(palette.wall.len(), SHADE_BUCKETS);
            for pair in palette.wall.windows(2) {
                assert_ne!(pair[0], pair[1], "adjacent buckets must differ");
            }
        }
    }

    #[test]
    fn present_writes_one_pixel_pair_per_cell() {
        let map = MapGrid::parse(&DEFAULT_MAP).unwrap();
        let player = Player::at_start(&map);
        let mut fb = FrameBuffer::new(16, 8);
        fb.compose(&map, &player);

        let mut out = Vec::new();
        present(&mut out, &fb, &Palette::rgb()).unwrap();
        let text = String::from_utf8(out).unwrap();

        let spaces = text.chars().filter(|c| *c == ' ').count();
        assert_eq!(spaces, 16 * 8 * PIXEL.len());
        assert!(text.contains("\x1b[0m"), "frame ends with a reset");
    }
}
