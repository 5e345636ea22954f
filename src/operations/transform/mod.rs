mod frame;

pub use frame::CanonicalFrame;
