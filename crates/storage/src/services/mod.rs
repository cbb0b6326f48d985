pub mod age_group;
pub mod formatting;
pub mod quantity;
pub mod ranking;
