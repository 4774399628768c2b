//! Core data structures: labeled tensors and their coordinates.

mod coords;
mod tensor;

pub use coords::Coords;
pub use tensor::{broadcast_shape, union_dims, zip_with, NamedTensor};
