//! Multi-day forecast strip derived from the 3-hourly sample list.

use chrono::NaiveDate;

use crate::model::Sample;

/// Number of days shown in the forecast strip.
pub const FORECAST_DAYS: usize = 5;

/// The representative sample for one calendar day.
#[derive(Debug, Clone, Copy)]
pub struct DayBucket<'a> {
    pub date: NaiveDate,
    pub sample: &'a Sample,
}

impl DayBucket<'_> {
    /// Short label such as `Mon, Oct 5`.
    pub fn label(&self) -> String {
        self.date.format("%a, %b %-d").to_string()
    }
}

/// First sample of each distinct day, at most [`FORECAST_DAYS`] of them.
///
/// `samples` must be sorted by timestamp ascending.
pub fn daily_buckets(samples: &[Sample]) -> Vec<DayBucket<'_>> {
    buckets_after(samples, None)
}

/// Like [`daily_buckets`], but treats `today` as already seen so samples
/// still falling on it are skipped.
pub fn upcoming_days(samples: &[Sample], today: NaiveDate) -> Vec<DayBucket<'_>> {
    buckets_after(samples, Some(today))
}

fn buckets_after(samples: &[Sample], seen: Option<NaiveDate>) -> Vec<DayBucket<'_>> {
    let mut buckets = Vec::with_capacity(FORECAST_DAYS);
    let mut last_day = seen;

    for sample in samples {
        // Timestamps outside chrono's range cannot be placed on a day.
        let Some(date) = sample.date() else {
            continue;
        };

        if last_day != Some(date) {
            buckets.push(DayBucket { date, sample });
            last_day = Some(date);

            if buckets.len() == FORECAST_DAYS {
                break;
            }
        }
    }

    buckets
}
