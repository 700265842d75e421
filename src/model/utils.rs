use chrono::Duration as ChronoDuration;

/// Short human label for how long ago a snapshot was calculated.
#[must_use]
pub fn format_time_ago(td: ChronoDuration) -> String {
    const UNITS: &[(i64, &str)] = &[
        (7 * 24 * 3600, "week"),
        (24 * 3600, "day"),
        (3600, "hour"),
        (60, "minute"),
    ];

    let secs = td.num_seconds().max(0);
    for (size, label) in UNITS {
        if secs >= *size {
            let n = secs / size;
            return if n == 1 {
                format!("1 {label}")
            } else {
                format!("{n} {label}s")
            };
        }
    }
    if secs == 1 {
        "1 second".to_string()
    } else {
        format!("{secs} seconds")
    }
}
