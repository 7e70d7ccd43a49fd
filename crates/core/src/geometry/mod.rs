//! Plain 2-D value types: vectors and augmented affine matrices.

mod affine;
mod vector;

pub use affine::AffineMatrix;
pub use vector::Vector2;
