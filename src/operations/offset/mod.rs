mod inward;
mod ring;
mod spiral;

pub use inward::{quad_corners, InwardOffset};
pub use ring::RingCorners;
pub use spiral::{Spiral, SpiralRun, SpiralStatus, DEFAULT_MAX_ROUNDS};
