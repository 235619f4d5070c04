//! tilecast — a first-person view of a 2D tile map, rendered on the CPU.
//!
//! One ray per screen column is DDA-stepped through the grid to the first
//! occupied cell; the perpendicular hit distance sizes a vertical strip of
//! texture samples composited into an RGBA8 frame buffer, which is then
//! loaned to a pluggable presentation sink.
//!
//! The crate owns the per-frame algorithm only. Map data, viewer movement
//! and texture decoding belong to the host; they enter through the
//! [`world::TileGrid`] trait, a [`world::Viewer`] snapshot and the
//! build-once [`world::TextureCache`].

pub mod defs;
pub mod renderer;
pub mod world;
