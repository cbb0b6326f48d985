pub mod discipline;
pub mod participant;
pub mod result;
