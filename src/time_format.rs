use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Every date and time shown to the user is in Pacific time.
pub const PT: Tz = chrono_tz::America::Los_Angeles;

/// "Tue, Oct 21"
pub fn fmt_date(instant: DateTime<Utc>) -> String {
    instant.with_timezone(&PT).format("%a, %b %-d").to_string()
}

/// "7:30 PM"
pub fn fmt_time(instant: DateTime<Utc>) -> String {
    instant.with_timezone(&PT).format("%-I:%M %p").to_string()
}

/// "Tue, Oct 21 • 7:30 PM PT"
pub fn fmt_date_time(instant: DateTime<Utc>) -> String {
    format!("{} • {} PT", fmt_date(instant), fmt_time(instant))
}

/// True when both instants fall on the same Pacific calendar day.
pub fn is_same_day_pt(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.with_timezone(&PT).date_naive() == b.with_timezone(&PT).date_naive()
}
