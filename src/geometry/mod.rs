pub mod circle;
pub mod line;
pub mod path;
pub mod quad;

pub use circle::Circle;
pub use line::Line;
pub use path::WaypointPath;
pub use quad::Quad;
