//! Interactive walkthrough of the built-in demo map.
//!
//! ```bash
//! cargo run --release -- --width 960 --height 600 --fov 66
//! ```
//!
//! W/S or ↑/↓ move, ←/→ turn, A/D strafe, Esc quits.

use std::time::{Duration, Instant};

use clap::Parser;
use glam::Vec2;
use minifb::Key;

use tilecast::{
    defs,
    renderer::{Raycaster, WindowSink},
    world::{TileGrid, Viewer},
};

/// Map units per second.
const MOVE_SPEED: f32 = 180.0;
/// Radians per second.
const TURN_SPEED: f32 = 2.4;
/// Keep this much clearance from walls when moving.
const SKIN: f32 = 8.0;

#[derive(Parser)]
#[command(about = "First-person walkthrough of the tilecast demo map")]
struct Args {
    /// Frame width in pixels.
    #[arg(long, default_value_t = 960)]
    width: usize,

    /// Frame height in pixels.
    #[arg(long, default_value_t = 600)]
    height: usize,

    /// Horizontal field of view in degrees.
    #[arg(long, default_value_t = 66.0)]
    fov: f32,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let grid = &*defs::DEMO_MAP;
    let cache = defs::demo_cache()?;
    let (map_w, map_h) = grid.used_bounds();
    println!(
        "demo map {map_w}x{map_h} cells, {} textures, {}x{} @ {:.0}° FoV",
        cache.len(),
        args.width,
        args.height,
        args.fov
    );

    let mut viewer = Viewer::from_yaw(defs::DEMO_SPAWN, 0.0, args.fov.to_radians());
    let mut caster = Raycaster::new(args.width, args.height);
    let mut sink = WindowSink::new("tilecast", args.width, args.height)?;
    sink.window_mut().set_target_fps(60);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO; // cumulated render time
    let mut acc_frames = 0usize; // frames in the current window
    let mut last_print = Instant::now(); // when we printed last
    let mut last_tick = Instant::now();

    while sink.window().is_open() && !sink.window().is_key_down(Key::Escape) {
        let now = Instant::now();
        let dt = (now - last_tick).as_secs_f32().min(0.1);
        last_tick = now;

        /* ----------------------- input ---------------------------------- */
        let win = sink.window();
        let mut forward = 0.0f32;
        let mut strafe = 0.0f32;
        let mut turn = 0.0f32;

        if win.is_key_down(Key::Up) || win.is_key_down(Key::W) {
            forward += 1.0;
        }
        if win.is_key_down(Key::Down) || win.is_key_down(Key::S) {
            forward -= 1.0;
        }
        if win.is_key_down(Key::A) {
            strafe -= 1.0;
        }
        if win.is_key_down(Key::D) {
            strafe += 1.0;
        }
        if win.is_key_down(Key::Left) {
            turn -= 1.0;
        }
        if win.is_key_down(Key::Right) {
            turn += 1.0;
        }

        viewer.turn(turn * TURN_SPEED * dt);

        let wish = (viewer.dir * forward + viewer.dir.perp() * strafe) * MOVE_SPEED * dt;
        slide_move(grid, &mut viewer.pos, wish);

        /* ----------------------- draw ----------------------------------- */
        let t0 = Instant::now();
        caster.render(&viewer, grid, &cache);
        caster.present(&mut sink)?;
        acc_time += t0.elapsed();
        acc_frames += 1;

        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            println!("avg render: {:.2} ms  ({:.1} FPS)", avg_ms, 1000.0 / avg_ms);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}

/// Axis-separated wall sliding: apply each movement component only if the
/// destination cell (padded by `SKIN`) is empty, so hugging a wall still
/// lets the other axis advance.
fn slide_move<G: TileGrid>(grid: &G, pos: &mut Vec2, wish: Vec2) {
    let probe = |p: Vec2| {
        let (cx, cy) = grid.world_to_grid(p);
        grid.cell_source_id(cx, cy).is_none()
    };

    let pad_x = wish.x.signum() * SKIN;
    if wish.x != 0.0 && probe(Vec2::new(pos.x + wish.x + pad_x, pos.y)) {
        pos.x += wish.x;
    }
    let pad_y = wish.y.signum() * SKIN;
    if wish.y != 0.0 && probe(Vec2::new(pos.x, pos.y + wish.y + pad_y)) {
        pos.y += wish.y;
    }
}
