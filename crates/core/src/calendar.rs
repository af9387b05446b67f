//! Elapsed-months arithmetic for year-to-date sums.

use chrono::{Datelike, NaiveDate};

/// Number of months of the analyzed year that have elapsed as of `as_of`.
///
/// Returns 12 when the analyzed year is entirely in the past, 0 when it is
/// entirely in the future, and the current calendar month number (1-12)
/// otherwise. Computed once per analysis pass and threaded through every
/// year-to-date sum.
#[must_use]
pub fn months_elapsed(year: i32, as_of: NaiveDate) -> u32 {
    if year < as_of.year() {
        12
    } else if year > as_of.year() {
        0
    } else {
        as_of.month()
    }
}
