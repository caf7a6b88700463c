use std::io::{self, BufWriter};
use std::thread;
use std::time::Duration;

use anyhow::Result;

use crate::map::{DEFAULT_MAP, MapGrid};
use crate::player::Player;
use crate::renderer::FrameBuffer;
use crate::term::{Key, Palette, RawModeGuard};

mod map;
mod player;
mod ray;
mod renderer;
mod term;

const SCREEN_WIDTH: usize = 90;
const SCREEN_HEIGHT: usize = 50;
const MOVE_SPEED: f32 = 0.1; // cells per accepted key event
const ROT_SPEED: f32 = 0.05; // radians per accepted key event
const FRAME_DELAY: Duration = Duration::from_millis(15);

/// Apply one accepted key to the player. Returns false on quit.
/// Motion is step-sized per key event, so turn and move speed scale with the
/// key repeat rate; inherited behavior, kept as-is.
fn apply_key(player: &mut Player, map: &MapGrid, key: Key) -> bool {
    let (dir_x, dir_y) = (player.dir_x, player.dir_y);
    let (plane_x, plane_y) = (player.plane_x, player.plane_y);
    match key {
        Key::Forward => player.translate(map, dir_x * MOVE_SPEED, dir_y * MOVE_SPEED),
        Key::Backward => player.translate(map, -dir_x * MOVE_SPEED, -dir_y * MOVE_SPEED),
        Key::StrafeLeft => player.translate(map, -plane_x * MOVE_SPEED, -plane_y * MOVE_SPEED),
        Key::StrafeRight => player.translate(map, plane_x * MOVE_SPEED, plane_y * MOVE_SPEED),
        Key::RotateLeft => player.rotate(ROT_SPEED),
        Key::RotateRight => player.rotate(-ROT_SPEED),
        Key::Quit => return false,
    }
    true
}

fn main() -> Result<()> {
    // Validate the map before touching the terminal so a bad layout reports
    // like a normal error instead of through the alternate screen.
    let map = MapGrid::parse(&DEFAULT_MAP)?;
    let mut player = Player::at_start(&map);
    let mut fb = FrameBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
    let palette = Palette::detect();

    let _guard = RawModeGuard::acquire()?;
    let mut out = BufWriter::new(io::stdout());

    // Render, poll, sleep. All player mutation happens between frames.
    loop {
        fb.compose(&map, &player);
        term::present(&mut out, &fb, &palette)?;

        if let Some(key) = term::poll_key()? {
            if !apply_key(&mut player, &map, key) {
                break;
            }
        }
        thread::sleep(FRAME_DELAY);
    }

    Ok(())
}
