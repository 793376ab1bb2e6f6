//! Bar normalization
//!
//! Turns raw provider rows into clean, timezone-aware bars. Corrupt rows are
//! recovered by dropping them, never by failing the whole batch; only a batch
//! with nothing left is an error.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use tracing::{debug, warn};

use sig_feed::bars::{RawBar, RawTimestamp};

use crate::error::{PipelineError, PipelineResult};
use crate::types::Bar;

/// Normalize raw provider rows into clean bars
///
/// Rows with unreadable timestamps, missing or non-finite prices, or a high
/// below the low are dropped and logged. Missing volume coerces to 0.0 (index
/// feeds report none). Output is sorted ascending; among duplicate timestamps
/// the first occurrence wins.
///
/// # Errors
/// Returns [`PipelineError::NoData`] when the input is empty or every row was
/// dropped.
pub fn normalize(raw: Vec<RawBar>, tz: FixedOffset) -> PipelineResult<Vec<Bar>> {
    let total = raw.len();
    let mut bars: Vec<Bar> = Vec::with_capacity(total);
    let mut dropped = 0usize;

    for row in raw {
        match clean_row(&row, tz) {
            Ok(bar) => bars.push(bar),
            Err(reason) => {
                dropped += 1;
                warn!("dropping corrupt bar ({}): {:?}", reason, row.timestamp);
            }
        }
    }

    bars.sort_by_key(|b| b.timestamp);
    let before = bars.len();
    bars.dedup_by_key(|b| b.timestamp);
    let duplicates = before - bars.len();
    if duplicates > 0 {
        warn!(
            "dropped {} duplicate timestamps, keeping first occurrence",
            duplicates
        );
    }

    if bars.is_empty() {
        return Err(PipelineError::NoData);
    }

    debug!(
        "normalized {} of {} raw rows ({} dropped)",
        bars.len(),
        total,
        dropped + duplicates
    );
    Ok(bars)
}

fn clean_row(row: &RawBar, tz: FixedOffset) -> Result<Bar, &'static str> {
    let timestamp = decode_timestamp(&row.timestamp, tz).ok_or("unreadable timestamp")?;

    let open = finite_price(row.open).ok_or("missing or non-finite open")?;
    let high = finite_price(row.high).ok_or("missing or non-finite high")?;
    let low = finite_price(row.low).ok_or("missing or non-finite low")?;
    let close = finite_price(row.close).ok_or("missing or non-finite close")?;

    if high < low {
        return Err("high below low");
    }

    let volume = row
        .volume
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0);

    Ok(Bar {
        timestamp,
        open,
        high,
        low,
        close,
        volume,
    })
}

fn finite_price(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn decode_timestamp(ts: &RawTimestamp, tz: FixedOffset) -> Option<DateTime<FixedOffset>> {
    match ts {
        RawTimestamp::Epoch(secs) => {
            DateTime::from_timestamp(*secs, 0).map(|dt| dt.with_timezone(&tz))
        }
        RawTimestamp::Text(text) => parse_text_timestamp(text, tz),
    }
}

/// Aware strings are converted to the exchange offset; naive strings have the
/// offset attached. A row that already carries a zone is never re-localized.
fn parse_text_timestamp(text: &str, tz: FixedOffset) -> Option<DateTime<FixedOffset>> {
    if let Ok(aware) = DateTime::parse_from_rfc3339(text) {
        return Some(aware.with_timezone(&tz));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return naive.and_local_timezone(tz).single();
        }
    }
    None
}
