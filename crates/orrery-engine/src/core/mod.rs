pub mod frame;
pub mod rng;
pub mod scene;
