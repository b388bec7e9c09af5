use chrono::{FixedOffset, Utc};

/// Canonical calendar-day key ("YYYY-MM-DD") in the quiz reference time
/// zone. Every "today" decision (selection, rollover detection, completion
/// tracking) goes through this one derivation.
pub fn date_key_now(offset: FixedOffset) -> String {
    Utc::now().with_timezone(&offset).format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_key_is_calendar_day_shaped() {
        let offset = FixedOffset::east_opt(-7 * 3600).unwrap();
        let key = date_key_now(offset);
        assert_eq!(key.len(), 10);
        assert_eq!(key.as_bytes()[4], b'-');
        assert_eq!(key.as_bytes()[7], b'-');
    }
}
