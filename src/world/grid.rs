// Tile-grid lookup seam between the map owner and the renderer.
// The caster only ever asks "what occupies cell (x, y)?" through `TileGrid`.

use glam::Vec2;

/// Runtime key identifying which texture a given occupied tile uses.
///
/// *Guaranteed* to remain stable for the lifetime of the current map.
pub type SourceId = u16;

/// World-space extent of one grid cell, in map units.
pub const TILE_SIZE: f32 = 64.0;

/// Read-only view of the tile map the rays traverse.
///
/// The map owner keeps whatever storage it likes; the caster needs exactly
/// three queries per frame.
pub trait TileGrid {
    /// Occupant of cell `(x, y)`: `Some(id)` for a wall, `None` for empty
    /// space. Cells outside the map are empty.
    fn cell_source_id(&self, x: i32, y: i32) -> Option<SourceId>;

    /// Cell containing the world-space point `pos`.
    fn world_to_grid(&self, pos: Vec2) -> (i32, i32) {
        (
            (pos.x / TILE_SIZE).floor() as i32,
            (pos.y / TILE_SIZE).floor() as i32,
        )
    }

    /// `(width, height)` of the used map rectangle, in cells.
    fn used_bounds(&self) -> (i32, i32);
}

/// Row-major grid storage, the in-memory map used by the demo binary and
/// the tests.
#[derive(Clone, Debug)]
pub struct MapGrid {
    width: i32,
    height: i32,
    cells: Vec<Option<SourceId>>,
}

impl MapGrid {
    /// Create an all-empty grid of `width × height` cells.
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "grid must be non-degenerate");
        Self {
            width,
            height,
            cells: vec![None; (width * height) as usize],
        }
    }

    /// Build from literal rows where `0` is empty and any other value is a
    /// source id. Ragged rows are padded with empty cells.
    pub fn from_rows(rows: &[&[u16]]) -> Self {
        let height = rows.len() as i32;
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0) as i32;
        let mut grid = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                if cell != 0 {
                    grid.set(x as i32, y as i32, Some(cell));
                }
            }
        }
        grid
    }

    /// Set the occupant of one cell. Panics outside the grid.
    pub fn set(&mut self, x: i32, y: i32, occupant: Option<SourceId>) {
        assert!(
            (0..self.width).contains(&x) && (0..self.height).contains(&y),
            "cell ({x}, {y}) outside {}x{} grid",
            self.width,
            self.height
        );
        self.cells[(y * self.width + x) as usize] = occupant;
    }
}

impl TileGrid for MapGrid {
    fn cell_source_id(&self, x: i32, y: i32) -> Option<SourceId> {
        if (0..self.width).contains(&x) && (0..self.height).contains(&y) {
            self.cells[(y * self.width + x) as usize]
        } else {
            None
        }
    }

    fn used_bounds(&self) -> (i32, i32) {
        (self.width, self.height)
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
