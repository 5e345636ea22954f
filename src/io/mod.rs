pub mod path_file;
pub mod transport;

pub use path_file::{format_path, load_path, parse_path, read_path, save_path, write_path};
pub use transport::{publish_once, JsonLinePublisher, PathMessage, PathPublisher, PoseStamped};
