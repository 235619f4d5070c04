//! ---------------------------------------------------------------------------
//! Column raycaster
//!
//! Classic DDA wall renderer: one ray per screen column, grid-stepped to the
//! first occupied cell, then a vertical texel strip composited into an owned
//! RGBA8 frame buffer.
//!
//! * The whole sweep is synchronous and single-threaded; a frame is always
//!   computed in full before it is loaned to a [`PresentSink`].
//! * The buffer is cleared right after presentation, never mid-frame, so
//!   rows outside every column's draw range keep whatever the previous
//!   clear left there (zero).
//! ---------------------------------------------------------------------------

use glam::Vec2;

use crate::{
    renderer::PresentSink,
    world::{SourceId, TEX_HEIGHT, TEX_WIDTH, TILE_SIZE, TextureCache, TileGrid, Viewer},
};

/// Cap on the projected slice height, so a degenerate (zero or negative)
/// perpendicular distance cannot produce a pathological draw range.
const MAX_LINE_HEIGHT: i32 = 1 << 14;

/// Which grid axis the DDA crossed last before the hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    X,
    Y,
}

/// Result of one ray's grid traversal.
#[derive(Clone, Copy, Debug)]
struct RayHit {
    /// Hit distance projected onto the viewer's forward axis, in cells.
    perp_dist: f32,
    side: Side,
    source: SourceId,
}

/// Per-frame column renderer with an owned `width × height × 4` buffer.
pub struct Raycaster {
    width: usize,
    height: usize,
    frame: Vec<u8>,
}

impl Raycaster {
    /// Allocate a zeroed frame buffer at a fixed resolution.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "degenerate frame size");
        Self {
            width,
            height,
            frame: vec![0; width * height * 4],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The RGBA8 frame as last rendered.
    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    /// Render one full frame of walls into the internal buffer.
    ///
    /// Every occupant id the grid can yield must be registered in `cache`;
    /// an unregistered id aborts the pass (see [`TextureCache::texels`]).
    pub fn render<G: TileGrid>(&mut self, viewer: &Viewer, grid: &G, cache: &TextureCache) {
        // Viewer position in grid units; cells are 1.0 wide in ray space.
        let pos = viewer.pos / TILE_SIZE;

        for x in 0..self.width {
            let camera_x = camera_x(x, self.width);
            let ray_dir = viewer.dir + viewer.plane * camera_x;

            // Start cell is recomputed per column from the grid's own
            // world mapping, not carried incrementally across columns.
            let start = grid.world_to_grid(viewer.pos);

            // A ray that leaves the used map bounds draws nothing: the
            // map is not guaranteed to be sealed, and an open boundary
            // must not hang the frame.
            let Some(hit) = cast(grid, pos, start, ray_dir) else {
                continue;
            };

            let texels = cache.texels(hit.source);
            let tex_x = texture_column(pos, ray_dir, &hit);
            self.draw_strip(x, &hit, tex_x, texels);
        }
    }

    /// Loan the finished frame to `sink`, then zero the buffer for the
    /// next pass. The sink must not retain the slice.
    pub fn present<S: PresentSink>(&mut self, sink: &mut S) -> anyhow::Result<()> {
        sink.present(&self.frame, self.width, self.height)?;
        self.clear();
        Ok(())
    }

    /// Zero every byte of the frame buffer.
    pub fn clear(&mut self) {
        self.frame.fill(0);
    }

    /// Composite one shaded vertical texel strip for screen column `x`.
    fn draw_strip(&mut self, x: usize, hit: &RayHit, tex_x: usize, texels: &[u8]) {
        let h = self.height as i32;

        let line_height = if hit.perp_dist > f32::EPSILON {
            ((h as f32 / hit.perp_dist) as i32).min(MAX_LINE_HEIGHT)
        } else {
            MAX_LINE_HEIGHT
        };

        // Vertically centered slice, clipped to the screen.
        let draw_start = (h / 2 - line_height / 2).max(0);
        let draw_end = (h / 2 + line_height / 2).min(h - 1);
        if draw_start >= draw_end {
            return;
        }

        // Nearest-neighbour vertical sampling: one fixed texel step per
        // output row, wrapped with `& 63` (texture height is a power of 2).
        let step = TEX_HEIGHT as f32 / line_height as f32;
        let mut tex_pos = (draw_start - h / 2 + line_height / 2) as f32 * step;

        for y in draw_start..draw_end {
            let tex_y = (tex_pos as i32 & (TEX_HEIGHT as i32 - 1)) as usize;
            tex_pos += step;

            let t = (tex_x + tex_y * TEX_HEIGHT) * 3;
            let (mut r, mut g, mut b) = (texels[t], texels[t + 1], texels[t + 2]);

            // Fixed directional shading: walls hit on a Y-crossing are
            // drawn at half intensity.
            if hit.side == Side::Y {
                r >>= 1;
                g >>= 1;
                b >>= 1;
            }

            let o = (x + y as usize * self.width) * 4;
            self.frame[o] = r;
            self.frame[o + 1] = g;
            self.frame[o + 2] = b;
            self.frame[o + 3] = 255;
        }
    }
}

/// Camera-space offset of screen column `x`: −1 at the left edge, +1 at
/// the right.
#[inline]
fn camera_x(x: usize, width: usize) -> f32 {
    2.0 * x as f32 / width as f32 - 1.0
}

/// DDA grid traversal from `start` along `ray_dir`.
///
/// `pos` is the viewer position in grid units. Returns `None` when the
/// traversal exits the used map bounds without hitting an occupied cell.
fn cast<G: TileGrid>(grid: &G, pos: Vec2, start: (i32, i32), ray_dir: Vec2) -> Option<RayHit> {
    let (mut map_x, mut map_y) = start;
    let (bound_x, bound_y) = grid.used_bounds();

    // Distance along the ray between successive grid lines per axis. A
    // zero direction component gets an infinite delta, so that axis can
    // never win the step comparison below.
    let delta_x = if ray_dir.x == 0.0 {
        f32::INFINITY
    } else {
        (1.0 / ray_dir.x).abs()
    };
    let delta_y = if ray_dir.y == 0.0 {
        f32::INFINITY
    } else {
        (1.0 / ray_dir.y).abs()
    };

    // Standard DDA init: distance from `pos` to the first grid line per
    // axis, measured along the ray.
    let (step_x, mut side_x) = if ray_dir.x < 0.0 {
        (-1, (pos.x - map_x as f32) * delta_x)
    } else {
        (1, (map_x as f32 + 1.0 - pos.x) * delta_x)
    };
    let (step_y, mut side_y) = if ray_dir.y < 0.0 {
        (-1, (pos.y - map_y as f32) * delta_y)
    } else {
        (1, (map_y as f32 + 1.0 - pos.y) * delta_y)
    };

    loop {
        let side = if side_x < side_y {
            side_x += delta_x;
            map_x += step_x;
            Side::X
        } else {
            side_y += delta_y;
            map_y += step_y;
            Side::Y
        };

        if let Some(source) = grid.cell_source_id(map_x, map_y) {
            // Back out the final over-step on the hit axis; this is the
            // forward-projected distance, so no fish-eye correction is
            // needed later.
            let perp_dist = match side {
                Side::X => side_x - delta_x,
                Side::Y => side_y - delta_y,
            };
            return Some(RayHit {
                perp_dist,
                side,
                source,
            });
        }

        if !(0..bound_x).contains(&map_x) || !(0..bound_y).contains(&map_y) {
            return None;
        }
    }
}

/// Texture column sampled for this hit.
///
/// The fractional hit position along the wall face selects the column;
/// faces approached from the positive X (on an X-side) or negative Y (on
/// a Y-side) are mirrored so adjoining walls don't flip their texture.
fn texture_column(pos: Vec2, ray_dir: Vec2, hit: &RayHit) -> usize {
    let wall_x = match hit.side {
        Side::X => pos.y + hit.perp_dist * ray_dir.y,
        Side::Y => pos.x + hit.perp_dist * ray_dir.x,
    };
    let wall_x = wall_x - wall_x.floor();

    let tex_x = ((wall_x * TEX_WIDTH as f32) as usize).min(TEX_WIDTH - 1);
    let mirrored = match hit.side {
        Side::X => ray_dir.x > 0.0,
        Side::Y => ray_dir.y < 0.0,
    };
    if mirrored { TEX_WIDTH - tex_x - 1 } else { tex_x }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::CaptureSink;
    use crate::world::{MapGrid, TEXELS_LEN};
    use glam::vec2;

    /* tiny helpers ---------------------------------------------------*/

    /// Sealed square room of `side × side` cells, every boundary cell
    /// occupied by source id 1.
    fn sealed_room(side: i32) -> MapGrid {
        let mut grid = MapGrid::new(side, side);
        for i in 0..side {
            grid.set(i, 0, Some(1));
            grid.set(i, side - 1, Some(1));
            grid.set(0, i, Some(1));
            grid.set(side - 1, i, Some(1));
        }
        grid
    }

    fn solid_cache(level: u8) -> TextureCache {
        TextureCache::build([(1, vec![level; TEXELS_LEN])]).unwrap()
    }

    fn pixel(rc: &Raycaster, x: usize, y: usize) -> [u8; 4] {
        let o = (x + y * rc.width()) * 4;
        rc.frame()[o..o + 4].try_into().unwrap()
    }

    /* camera mapping --------------------------------------------------*/

    #[test]
    fn camera_x_spans_minus_one_to_one_monotonically() {
        let w = 320;
        let mut prev = f32::NEG_INFINITY;
        for x in 0..w {
            let c = camera_x(x, w);
            assert!((-1.0..=1.0).contains(&c), "camera_x({x}) = {c}");
            assert!(c > prev, "camera_x not monotonic at {x}");
            prev = c;
        }
        assert_eq!(camera_x(0, w), -1.0);
        assert_eq!(camera_x(w / 2, w), 0.0);
    }

    /* DDA traversal ---------------------------------------------------*/

    #[test]
    fn enclosed_room_always_terminates() {
        let grid = sealed_room(8);
        let pos = vec2(4.3, 3.7);
        let start = grid.world_to_grid(pos * TILE_SIZE);

        for i in 0..256 {
            let angle = i as f32 * std::f32::consts::TAU / 256.0;
            let hit = cast(&grid, pos, start, Vec2::from_angle(angle))
                .expect("ray escaped a sealed room");
            assert!(hit.perp_dist >= 0.0, "negative distance at angle {angle}");
        }
    }

    #[test]
    fn zero_component_axis_is_never_stepped() {
        let grid = sealed_room(8);
        let pos = vec2(2.5, 3.5);
        let start = grid.world_to_grid(pos * TILE_SIZE);

        // Purely horizontal ray: the infinite Y delta must keep every
        // step on the X axis, so the hit is an X-side in the same row.
        let hit = cast(&grid, pos, start, vec2(1.0, 0.0)).unwrap();
        assert_eq!(hit.side, Side::X);
        assert!((hit.perp_dist - 4.5).abs() < 1e-4);

        let hit = cast(&grid, pos, start, vec2(0.0, -1.0)).unwrap();
        assert_eq!(hit.side, Side::Y);
        assert!((hit.perp_dist - 2.5).abs() < 1e-4);
    }

    #[test]
    fn open_boundary_escapes_instead_of_looping() {
        // Entirely empty map: no ray can ever hit anything.
        let grid = MapGrid::new(8, 8);
        let pos = vec2(4.5, 4.5);
        let start = grid.world_to_grid(pos * TILE_SIZE);
        assert!(cast(&grid, pos, start, vec2(1.0, 0.3)).is_none());
        assert!(cast(&grid, pos, start, vec2(-0.7, -0.7)).is_none());
    }

    /* texture column selection ----------------------------------------*/

    #[test]
    fn mirror_condition_inverts_tex_x() {
        let pos = vec2(2.0, 2.2);
        let hit = RayHit {
            perp_dist: 0.7,
            side: Side::X,
            source: 1,
        };
        // Same wall_x either way (the Y components match); only the
        // ray-X sign flips the mirror condition.
        let plain = texture_column(pos, vec2(-1.0, 0.4), &hit);
        let mirrored = texture_column(pos, vec2(1.0, 0.4), &hit);
        assert_eq!(mirrored, TEX_WIDTH - plain - 1);

        let hit = RayHit {
            perp_dist: 0.7,
            side: Side::Y,
            source: 1,
        };
        let plain = texture_column(pos, vec2(0.4, 1.0), &hit);
        let mirrored = texture_column(pos, vec2(0.4, -1.0), &hit);
        assert_eq!(mirrored, TEX_WIDTH - plain - 1);
    }

    /* shading ----------------------------------------------------------*/

    #[test]
    fn y_side_hits_are_half_intensity() {
        let grid = sealed_room(5);
        let cache = solid_cache(200);
        let pos = vec2(2.5, 2.5) * TILE_SIZE;

        // Facing +X: the centre ray crosses an X grid line last.
        let mut rc = Raycaster::new(320, 240);
        let viewer = Viewer::new(pos, vec2(1.0, 0.0), vec2(0.0, 0.66));
        rc.render(&viewer, &grid, &cache);
        assert_eq!(pixel(&rc, 160, 120), [200, 200, 200, 255]);

        // Facing +Y: identical texels, but a Y-side hit.
        let mut rc = Raycaster::new(320, 240);
        let viewer = Viewer::new(pos, vec2(0.0, 1.0), vec2(-0.66, 0.0));
        rc.render(&viewer, &grid, &cache);
        assert_eq!(pixel(&rc, 160, 120), [100, 100, 100, 255]);
    }

    /* whole-frame properties -------------------------------------------*/

    #[test]
    fn render_is_idempotent() {
        let grid = sealed_room(6);
        let cache = solid_cache(180);
        let viewer = Viewer::from_yaw(vec2(3.2, 2.8) * TILE_SIZE, 0.8, 66_f32.to_radians());

        let mut rc = Raycaster::new(160, 120);
        rc.render(&viewer, &grid, &cache);
        let first = rc.frame().to_vec();
        rc.render(&viewer, &grid, &cache);
        assert_eq!(rc.frame(), &first[..]);
    }

    #[test]
    fn centre_column_distance_in_small_room() {
        // 2×2 interior with an occupied one-cell boundary ring.
        let grid = sealed_room(4);
        let pos = vec2(2.0, 2.0);
        let start = grid.world_to_grid(pos * TILE_SIZE);

        // Screen 320 wide: column 160 has camera_x = 0, i.e. the ray is
        // exactly the facing direction (+X). Nearest wall face is one
        // cell away.
        assert_eq!(camera_x(160, 320), 0.0);
        let hit = cast(&grid, pos, start, vec2(1.0, 0.0)).unwrap();
        assert!((hit.perp_dist - 1.0).abs() < 1e-5);

        // lineHeight = H / perpWallDist: at distance 1 the slice spans
        // the full 240-row screen, so the centre column's top row is lit.
        let cache = solid_cache(50);
        let viewer = Viewer::new(pos * TILE_SIZE, vec2(1.0, 0.0), vec2(0.0, 0.65));
        let mut rc = Raycaster::new(320, 240);
        rc.render(&viewer, &grid, &cache);
        assert_eq!(pixel(&rc, 160, 0)[3], 255);

        // Twice the distance: half the slice, so the top quarter of the
        // column stays untouched (alpha 0).
        let far = Viewer::new(vec2(1.0, 2.0) * TILE_SIZE, vec2(1.0, 0.0), vec2(0.0, 0.65));
        let mut rc = Raycaster::new(320, 240);
        rc.render(&far, &grid, &cache);
        assert_eq!(pixel(&rc, 160, 0)[3], 0);
        assert_eq!(pixel(&rc, 160, 120)[3], 255);
    }

    #[test]
    fn viewer_on_grid_line_renders_cleanly() {
        let grid = sealed_room(6);
        let cache = solid_cache(90);
        // Fractional cell offset exactly 0.0 on both axes.
        let viewer = Viewer::from_yaw(vec2(3.0, 3.0) * TILE_SIZE, 0.5, 66_f32.to_radians());

        let mut rc = Raycaster::new(320, 240);
        rc.render(&viewer, &grid, &cache);

        // Every written pixel is a real texel write (alpha 255); nothing
        // degenerate leaked into the buffer.
        let mut written = 0usize;
        for px in rc.frame().chunks_exact(4) {
            assert!(px[3] == 0 || px[3] == 255);
            written += (px[3] == 255) as usize;
        }
        assert!(written > 0, "frame is empty");
    }

    #[test]
    fn present_hands_off_then_clears() {
        let grid = sealed_room(5);
        let cache = solid_cache(120);
        let viewer = Viewer::from_yaw(vec2(2.5, 2.5) * TILE_SIZE, 1.0, 66_f32.to_radians());

        let mut rc = Raycaster::new(64, 48);
        rc.render(&viewer, &grid, &cache);

        let mut sink = CaptureSink::default();
        rc.present(&mut sink).unwrap();

        assert_eq!(sink.width, 64);
        assert_eq!(sink.height, 48);
        assert_eq!(sink.frame.len(), 64 * 48 * 4);
        assert!(sink.frame.iter().any(|&b| b != 0), "sink got a blank frame");
        assert!(rc.frame().iter().all(|&b| b == 0), "buffer not cleared");
    }
}
