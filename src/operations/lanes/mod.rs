mod stitch;
mod sweep;

pub use stitch::interleave;
pub use sweep::{LaneSweep, LongSide, SweepLanes};
