// Date utility functions

use chrono::{Local, NaiveDate};

/// Iterate every day from `start` to `end`, both included.
///
/// Yields nothing when `end` is before `start`.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start
        .iter_days()
        .take_while(move |date| *date <= end)
}

/// Today's date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
