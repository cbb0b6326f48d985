pub mod common;
pub mod discipline;
pub mod participant;
pub mod ranking;
pub mod result;
