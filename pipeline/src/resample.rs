//! Bar resampling
//!
//! Aggregates fixed-interval bars into wider buckets aligned to wall-clock
//! multiples of the target width from local midnight. Buckets never span a
//! day boundary, empty buckets are omitted rather than synthesized, and the
//! final pass assigns dense position indices so downstream indexing sees a
//! gap-free series.

use chrono::{DateTime, Duration, FixedOffset, Timelike};

use crate::types::{Bar, ResampledBar};

/// Resample bars into `width_minutes` buckets
///
/// Input must be sorted ascending (normalization guarantees this). Each
/// bucket takes the first open, last close, maximum high, minimum low and
/// summed volume of its source bars. Output positions run 0,1,2,... in
/// order with no holes.
pub fn resample(bars: &[Bar], width_minutes: u32) -> Vec<ResampledBar> {
    if bars.is_empty() || width_minutes == 0 {
        return Vec::new();
    }
    let width_secs = i64::from(width_minutes) * 60;

    let mut out: Vec<ResampledBar> = Vec::new();
    let mut current: Option<ResampledBar> = None;

    for bar in bars {
        let bucket_ts = bucket_start(bar.timestamp, width_secs);
        match current.as_mut() {
            Some(acc) if acc.timestamp == bucket_ts => {
                acc.high = acc.high.max(bar.high);
                acc.low = acc.low.min(bar.low);
                acc.close = bar.close;
                acc.volume += bar.volume;
            }
            _ => {
                if let Some(done) = current.take() {
                    out.push(done);
                }
                current = Some(ResampledBar {
                    position: 0,
                    timestamp: bucket_ts,
                    open: bar.open,
                    high: bar.high,
                    low: bar.low,
                    close: bar.close,
                    volume: bar.volume,
                });
            }
        }
    }
    if let Some(done) = current {
        out.push(done);
    }

    // Dense position assignment: adjacent indices even across gaps
    for (i, bar) in out.iter_mut().enumerate() {
        bar.position = i;
    }
    out
}

/// Start of the bucket containing `ts`, aligned to multiples of the width
/// from local midnight on the same day
fn bucket_start(ts: DateTime<FixedOffset>, width_secs: i64) -> DateTime<FixedOffset> {
    let secs = i64::from(ts.time().num_seconds_from_midnight());
    let delta = secs % width_secs;
    ts - Duration::seconds(delta)
}
