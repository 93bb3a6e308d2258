pub mod cv;
pub mod section;
