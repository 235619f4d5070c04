mod grid;
mod texture;
mod viewer;

pub use grid::{MapGrid, SourceId, TILE_SIZE, TileGrid};

pub use viewer::Viewer;

pub use texture::{TEX_HEIGHT, TEX_WIDTH, TEXELS_LEN, TextureCache, TextureError};
