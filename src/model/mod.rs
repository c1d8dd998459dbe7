//! Types that represent the core data model: the `Activity` record and the `ActivityStore`.
mod activity;
mod store;

pub use activity::{format_date, parse_date, parse_duration, Activity, DATE_FORMAT};
pub use store::{position, ActivityStore, Summary, TypeGroup, EXERCISE};
