//! Regular grid over a perimeter's bounding box.

mod layout;
mod spec;

pub use layout::{GridCell, GridCells, GridLayout, MAX_GRID_CELLS};
pub use spec::{GridSpec, DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH};
