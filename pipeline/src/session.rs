//! Trading session window
//!
//! Session filtering is a pure time-of-day cut: bars outside the exchange
//! window are removed, nothing else is judged here. Weekday checks exist only
//! as a point-in-time question ("is the market open right now"), never as a
//! per-bar filter, so historical bars delivered by the feed are trusted.

use chrono::{DateTime, Datelike, FixedOffset, NaiveTime, Offset, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::types::Bar;

/// Exchange trading session in a fixed-offset timezone
///
/// Defaults describe the NSE cash session: 09:15-15:30 IST, closed on
/// weekends. Holidays are not modeled; a holiday falling on a weekday reads
/// as open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradingSession {
    /// Exchange UTC offset in seconds (IST is +19800)
    pub utc_offset_secs: i32,
    /// Session open, inclusive
    pub open: NaiveTime,
    /// Session close, inclusive
    pub close: NaiveTime,
    /// Treat Saturday and Sunday as closed in point-in-time checks
    pub weekend_closed: bool,
}

impl Default for TradingSession {
    fn default() -> Self {
        Self {
            utc_offset_secs: 5 * 3600 + 30 * 60,
            open: NaiveTime::from_hms_opt(9, 15, 0).unwrap_or(NaiveTime::MIN),
            close: NaiveTime::from_hms_opt(15, 30, 0).unwrap_or(NaiveTime::MIN),
            weekend_closed: true,
        }
    }
}

impl TradingSession {
    /// Exchange timezone as a chrono fixed offset
    ///
    /// Falls back to UTC for offsets outside chrono's supported range;
    /// config validation rejects such values up front.
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_secs).unwrap_or_else(|| Utc.fix())
    }

    /// Whether a given instant falls inside the session
    ///
    /// Checks the time-of-day window and, when `weekend_closed` is set, the
    /// weekday. This is the only place weekends are considered.
    pub fn is_open_at(&self, at: DateTime<Utc>) -> bool {
        let local = at.with_timezone(&self.offset());
        if self.weekend_closed && matches!(local.weekday(), Weekday::Sat | Weekday::Sun) {
            return false;
        }
        let t = local.time();
        t >= self.open && t <= self.close
    }
}

/// Keep only bars whose local time-of-day is inside the session window
///
/// Both bounds are inclusive: a bar stamped exactly at the close is the final
/// bar of the day. Pure and idempotent; an empty input yields an empty
/// output, which the caller distinguishes from "market closed".
pub fn filter_session(session: &TradingSession, bars: Vec<Bar>) -> Vec<Bar> {
    let tz = session.offset();
    bars.into_iter()
        .filter(|bar| {
            let t = bar.timestamp.with_timezone(&tz).time();
            t >= session.open && t <= session.close
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn bar_at(hour: u32, minute: u32) -> Bar {
        let session = TradingSession::default();
        let timestamp = session
            .offset()
            .with_ymd_and_hms(2024, 1, 2, hour, minute, 0)
            .unwrap();
        Bar {
            timestamp,
            open: 100.0,
            high: 101.0,
            low: 99.0,
            close: 100.5,
            volume: 0.0,
        }
    }

    #[test]
    fn test_default_session_is_nse() {
        let session = TradingSession::default();
        assert_eq!(session.utc_offset_secs, 19800);
        assert_eq!(session.open, NaiveTime::from_hms_opt(9, 15, 0).unwrap());
        assert_eq!(session.close, NaiveTime::from_hms_opt(15, 30, 0).unwrap());
        assert!(session.weekend_closed);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let session = TradingSession::default();
        let bars = vec![
            bar_at(9, 14),
            bar_at(9, 15),
            bar_at(12, 0),
            bar_at(15, 30),
            bar_at(15, 31),
        ];

        let kept = filter_session(&session, bars);
        let minutes: Vec<(u32, u32)> = kept
            .iter()
            .map(|b| {
                use chrono::Timelike;
                (b.timestamp.hour(), b.timestamp.minute())
            })
            .collect();
        assert_eq!(minutes, vec![(9, 15), (12, 0), (15, 30)]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let session = TradingSession::default();
        let bars = vec![bar_at(8, 0), bar_at(10, 0), bar_at(16, 0)];

        let once = filter_session(&session, bars);
        let twice = filter_session(&session, once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_in_empty_out() {
        let session = TradingSession::default();
        assert!(filter_session(&session, Vec::new()).is_empty());
    }

    #[test]
    fn test_filter_converts_foreign_offsets() {
        let session = TradingSession::default();
        // 04:30 UTC is 10:00 IST, inside the window
        let bar = Bar {
            timestamp: Utc
                .with_ymd_and_hms(2024, 1, 2, 4, 30, 0)
                .unwrap()
                .fixed_offset(),
            open: 100.0,
            high: 101.0,
            low: 99.0,
            close: 100.5,
            volume: 0.0,
        };
        assert_eq!(filter_session(&session, vec![bar]).len(), 1);
    }

    #[test]
    fn test_is_open_at_weekday_inside_window() {
        let session = TradingSession::default();
        // Tuesday 2024-01-02 10:00 IST = 04:30 UTC
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 4, 30, 0).unwrap();
        assert!(session.is_open_at(at));
    }

    #[test]
    fn test_is_open_at_weekend_closed() {
        let session = TradingSession::default();
        // Saturday 2024-01-06 10:00 IST
        let at = Utc.with_ymd_and_hms(2024, 1, 6, 4, 30, 0).unwrap();
        assert!(!session.is_open_at(at));

        let open_weekends = TradingSession {
            weekend_closed: false,
            ..TradingSession::default()
        };
        assert!(open_weekends.is_open_at(at));
    }

    #[test]
    fn test_is_open_at_outside_window() {
        let session = TradingSession::default();
        // Tuesday 2024-01-02 17:00 IST = 11:30 UTC
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 11, 30, 0).unwrap();
        assert!(!session.is_open_at(at));
    }
}
