//! Expiry of hearts is judged on the Korean (UTC+9) wall clock, whatever
//! zone the viewer happens to be in.

use crate::MessageDetail;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone};
use thiserror::Error;

pub const KST_OFFSET_SECS: i64 = 9 * 60 * 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExpiryError {
    #[error("invalid backend timestamp: {0}")]
    InvalidTimestamp(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryStatus {
    pub now_kst: NaiveDateTime,
    pub created_at: Option<NaiveDateTime>,
    pub expires_at: NaiveDateTime,
    pub is_expired: bool,
}

impl ExpiryStatus {
    /// Time left before the heart closes, `None` once it has expired.
    pub fn remaining(&self) -> Option<Duration> {
        (!self.is_expired).then(|| self.expires_at - self.now_kst)
    }

    pub fn lifetime(&self) -> Option<Duration> {
        self.created_at.map(|created| self.expires_at - created)
    }
}

/// UTC+9 wall clock for the given instant.
pub fn kst_now<Tz: TimeZone>(now: &DateTime<Tz>) -> NaiveDateTime {
    now.naive_utc() + Duration::seconds(KST_OFFSET_SECS)
}

/// Parses a timestamp as the backend sends it. Zone-less values are already
/// KST wall clock; values carrying an offset are shifted onto it.
pub fn parse_backend_timestamp(raw: &str) -> Result<NaiveDateTime, ExpiryError> {
    let raw = raw.trim();
    if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
        return Ok(kst_now(&value));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(value) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(value);
        }
    }
    if let Ok(value) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = value.and_hms_opt(0, 0, 0) {
            return Ok(midnight);
        }
    }

    Err(ExpiryError::InvalidTimestamp(raw.to_string()))
}

pub fn compute_expiry<Tz: TimeZone>(
    detail: &MessageDetail,
    now: &DateTime<Tz>,
) -> Result<ExpiryStatus, ExpiryError> {
    let expires_at = parse_backend_timestamp(&detail.expired_date)?;
    let created_at = parse_backend_timestamp(&detail.created_date).ok();
    let now_kst = kst_now(now);

    Ok(ExpiryStatus {
        now_kst,
        created_at,
        expires_at,
        is_expired: now_kst > expires_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use chrono_tz::{America::New_York, Pacific::Kiritimati};

    fn detail_expiring(expired_date: &str) -> MessageDetail {
        MessageDetail {
            title: "hello".to_string(),
            content: "see you soon".to_string(),
            created_date: "2024-03-09T12:00:00".to_string(),
            expired_date: expired_date.to_string(),
            heart_id: 1,
            heart_url: "https://cdn.example/heart/1.png".to_string(),
            heart_name: "plain".to_string(),
            short_description: "a plain heart".to_string(),
            emoji_id: 0,
            emoji_url: None,
            is_stored: false,
        }
    }

    #[test]
    fn viewer_behind_kst_sees_expiry_on_kst_clock() {
        // 22:30 on the 9th in New York, already 12:30 on the 10th in Seoul.
        let now = Utc
            .with_ymd_and_hms(2024, 3, 10, 3, 30, 0)
            .unwrap()
            .with_timezone(&New_York);
        let status = compute_expiry(&detail_expiring("2024-03-10T12:00:00"), &now).unwrap();
        assert!(status.is_expired);
        assert_eq!(status.remaining(), None);
    }

    #[test]
    fn viewer_ahead_of_kst_is_not_expired_early() {
        // 16:00 on the 10th in Kiritimati (UTC+14), only 11:00 in Seoul.
        let now = Utc
            .with_ymd_and_hms(2024, 3, 10, 2, 0, 0)
            .unwrap()
            .with_timezone(&Kiritimati);
        let status = compute_expiry(&detail_expiring("2024-03-10T12:00:00"), &now).unwrap();
        assert!(!status.is_expired);
        assert_eq!(status.remaining(), Some(Duration::hours(1)));
        assert_eq!(status.lifetime(), Some(Duration::hours(24)));
    }

    #[test]
    fn expiry_instant_itself_is_not_expired() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 3, 0, 0).unwrap();
        let status = compute_expiry(&detail_expiring("2024-03-10 12:00:00"), &now).unwrap();
        assert!(!status.is_expired);
        assert_eq!(status.remaining(), Some(Duration::zero()));
    }

    #[test]
    fn offset_timestamps_are_moved_onto_kst() {
        let parsed = parse_backend_timestamp("2024-03-10T03:00:00Z").unwrap();
        assert_eq!(parsed, parse_backend_timestamp("2024-03-10T12:00:00").unwrap());
    }

    #[test]
    fn unparsable_expiry_is_an_error_but_created_date_is_optional() {
        let now = Utc::now();
        assert!(compute_expiry(&detail_expiring("tomorrow"), &now).is_err());

        let mut detail = detail_expiring("2099-01-01");
        detail.created_date = String::new();
        let status = compute_expiry(&detail, &now).unwrap();
        assert_eq!(status.created_at, None);
        assert!(!status.is_expired);
    }
}
