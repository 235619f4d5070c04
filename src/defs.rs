//! Static demo data: a small sealed map plus procedurally generated wall
//! textures, so the interactive binary runs without any external assets.
//! Texture decoding proper lives upstream of this crate; these fills just
//! stand in for decoded image bytes.

use glam::Vec2;
use once_cell::sync::Lazy;

use crate::world::{MapGrid, SourceId, TEX_HEIGHT, TEX_WIDTH, TILE_SIZE, TextureCache, TextureError};

const BRICK: u16 = 1;
const WEAVE: u16 = 2;
const CHECKER: u16 = 3;
const SLATE: u16 = 4;

#[rustfmt::skip]
static DEMO_ROWS: &[&[u16]] = &[
    &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    &[1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    &[1, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0, 4, 4, 4, 0, 1],
    &[1, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 4, 0, 1],
    &[1, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 4, 0, 1],
    &[1, 0, 2, 2, 2, 2, 0, 0, 0, 0, 0, 4, 0, 4, 0, 1],
    &[1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 4, 0, 0, 0, 1],
    &[1, 0, 0, 0, 0, 0, 0, 3, 3, 0, 0, 4, 4, 4, 0, 1],
    &[1, 0, 0, 0, 0, 0, 0, 3, 3, 0, 0, 0, 0, 0, 0, 1],
    &[1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    &[1, 0, 3, 0, 0, 0, 0, 0, 0, 0, 2, 2, 2, 2, 0, 1],
    &[1, 0, 0, 3, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 1],
    &[1, 0, 0, 0, 3, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 1],
    &[1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 1],
    &[1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

/// The built-in demo map, sealed on every side.
pub static DEMO_MAP: Lazy<MapGrid> = Lazy::new(|| MapGrid::from_rows(DEMO_ROWS));

/// World-space spawn point inside the demo map, clear of every wall.
pub const DEMO_SPAWN: Vec2 = Vec2::new(2.5 * TILE_SIZE, 8.5 * TILE_SIZE);

/// The `(source id, decoded bytes)` set matching [`DEMO_MAP`].
pub fn demo_textures() -> Vec<(SourceId, Vec<u8>)> {
    vec![
        (BRICK, fill(brick_texel)),
        (WEAVE, fill(weave_texel)),
        (CHECKER, fill(checker_texel)),
        (SLATE, fill(slate_texel)),
    ]
}

/// Build the texture cache for the demo map.
pub fn demo_cache() -> Result<TextureCache, TextureError> {
    TextureCache::build(demo_textures())
}

/*──────────────────────── procedural fills ──────────────────────────*/

fn fill(texel: fn(usize, usize) -> [u8; 3]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(TEX_WIDTH * TEX_HEIGHT * 3);
    for y in 0..TEX_HEIGHT {
        for x in 0..TEX_WIDTH {
            bytes.extend_from_slice(&texel(x, y));
        }
    }
    bytes
}

/// Red bricks in a running bond with grey mortar joints.
fn brick_texel(x: usize, y: usize) -> [u8; 3] {
    let course = y / 16;
    let shifted = x + course * 8;
    if y % 16 == 0 || shifted % 16 == 0 {
        [96, 96, 96]
    } else {
        [170, 60, 45]
    }
}

/// The classic green XOR weave.
fn weave_texel(x: usize, y: usize) -> [u8; 3] {
    let v = ((x ^ y) * 4) as u8;
    [v / 3, v, v / 3]
}

/// 8×8 checkerboard, dark and light grey.
fn checker_texel(x: usize, y: usize) -> [u8; 3] {
    if ((x / 8) ^ (y / 8)) & 1 == 0 {
        [190, 190, 190]
    } else {
        [70, 70, 70]
    }
}

/// Blue-grey slabs with a vertical sheen.
fn slate_texel(x: usize, y: usize) -> [u8; 3] {
    let base = 70 + (x * 2) as u8;
    if y % 21 == 0 { [40, 45, 60] } else { [base / 2, base / 2, base] }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
