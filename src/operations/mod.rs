pub mod offset;
pub mod query;

pub use offset::{offset_path_string, OffsetPath};
pub use query::{Aabb, BoundingBox, PathLen};
