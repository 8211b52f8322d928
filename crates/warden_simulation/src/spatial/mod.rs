//! Spatial partition для neighbor queries
//!
//! Uniform 2D grid по плоскости XZ (Y игнорируется).
//! Полный rebuild каждый тик вместо инкрементального обновления —
//! никаких stale entries после перемещения агентов.

pub mod grid;


pub use grid::*;
