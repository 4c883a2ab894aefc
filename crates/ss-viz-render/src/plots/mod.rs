pub mod capacity;
pub mod heights;

mod axes_draw;
mod boxes;
