mod discipline;
mod participant;
mod result;
mod result_type;

pub use discipline::Discipline;
pub use participant::Participant;
pub use result::{NewResult, ResultChanges, ResultRecord};
pub use result_type::{RankingDirection, ResultType};
