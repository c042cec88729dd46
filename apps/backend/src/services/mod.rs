pub mod games;
pub mod questions;
pub mod timer;
