mod daytime;
mod id;
mod timestamp;

pub use daytime::{TimeOfDay, TimeOfDayError};
pub use id::Id;
pub use timestamp::Timestamp;
