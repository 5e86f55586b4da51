//! Clock text rendering.

use chrono::Timelike;

use crate::config::schema::DEFAULT_CLOCK_FORMAT;

/// Renders `format` for the wall-clock time `now`.
///
/// The first `{HH}`, `{mm}` and `{ss}` placeholders are replaced by the
/// zero-padded 24-hour hour, minute and second.  Later repeats of the same
/// placeholder are left as typed.  An empty format renders
/// [`DEFAULT_CLOCK_FORMAT`].
///
/// # Example
///
/// ```rust
/// use chrono::NaiveTime;
/// use newtab_core::format_clock;
///
/// let t = NaiveTime::from_hms_opt(7, 5, 9).unwrap();
/// assert_eq!(format_clock("{HH}:{mm}", &t), "07:05");
/// ```
pub fn format_clock<T: Timelike>(format: &str, now: &T) -> String {
    let format = if format.is_empty() {
        DEFAULT_CLOCK_FORMAT
    } else {
        format
    };

    format
        .replacen("{HH}", &format!("{:02}", now.hour()), 1)
        .replacen("{mm}", &format!("{:02}", now.minute()), 1)
        .replacen("{ss}", &format!("{:02}", now.second()), 1)
}
