pub mod reference;
pub mod render;
pub mod schedule;
pub mod templates;

pub use crate::domain::model::{DayEntry, MeetingDay, ScheduleDefinition, ScheduleDocument, Week, WeekEntry};
pub use crate::domain::ports::{ReferenceSource, Selector, Storage};
pub use crate::utils::error::Result;
