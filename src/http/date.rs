use std::time::SystemTime;

use chrono::{DateTime, Utc};

/// Formats `time` as an HTTP-date (IMF-fixdate), e.g.
/// `Wed, 26 May 2021 14:51:23 GMT`.
pub fn http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time)
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}
