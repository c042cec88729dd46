pub mod games;
pub mod grade;
pub mod questions;
