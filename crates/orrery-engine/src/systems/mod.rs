pub mod lighting;
pub mod lines;
pub mod raycast;
pub mod render;
pub mod starfield;
