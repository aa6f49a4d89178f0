//! Date/time normalization against the visible-hours window and display zones.

mod duration;
mod normalize;
mod range;
mod timezone;

pub use duration::visible_duration;
pub(crate) use duration::visible_overlap;
pub use normalize::{
    clamp_end, clamp_start, end_of_day, fix_end_date, takes_all_day, takes_several_days,
};
pub use range::DateRange;
pub use timezone::{DisplayTimeZone, TimeZoneResolver, convert_by_timezone};
