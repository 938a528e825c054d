//! Date-string helpers
//!
//! The store keeps delivery/creation dates as `YYYY-MM-DD` strings and
//! metrics months as `YYYY-MM` keys; payment timestamps are Unix millis.
//! All of these use the machine's local time, matching a single-shop,
//! single-machine deployment.

use chrono::Local;

/// Today as `YYYY-MM-DD`
pub fn today_string() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Current month key, `YYYY-MM`
pub fn current_month() -> String {
    Local::now().format("%Y-%m").to_string()
}

/// Current time as Unix milliseconds
pub fn now_millis() -> i64 {
    Local::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn today_has_dashed_date_shape() {
        let today = today_string();
        assert_eq!(today.len(), 10);
        assert_eq!(&today[4..5], "-");
        assert_eq!(&today[7..8], "-");
    }

    #[test]
    fn month_key_is_date_prefix() {
        assert!(today_string().starts_with(&current_month()));
    }
}
