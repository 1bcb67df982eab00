mod bounding_box;
mod path_len;

pub use bounding_box::{Aabb, BoundingBox};
pub use path_len::PathLen;
