pub mod buffer;
pub mod rotate;
