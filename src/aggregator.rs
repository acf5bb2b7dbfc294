use std::collections::HashMap;

use crate::byte_format::format_bytes;
use crate::metric::Sample;

pub const TOTAL_LABEL: &str = "Total";

#[derive(Debug, PartialEq)]
pub enum Row {
    Daily {
        date: String,
        inbound: String,
        outbound: String,
    },
    Totals {
        inbound: String,
        outbound: String,
    },
}

impl Row {
    pub fn label(&self) -> &str {
        match self {
            Row::Daily { date, .. } => date.as_str(),
            Row::Totals { .. } => TOTAL_LABEL,
        }
    }

    pub fn inbound(&self) -> &str {
        match self {
            Row::Daily { inbound, .. } | Row::Totals { inbound, .. } => inbound.as_str(),
        }
    }

    pub fn outbound(&self) -> &str {
        match self {
            Row::Daily { outbound, .. } | Row::Totals { outbound, .. } => outbound.as_str(),
        }
    }

    pub fn is_totals(&self) -> bool {
        matches!(self, Row::Totals { .. })
    }

    pub fn cells(&self) -> [&str; 3] {
        [self.label(), self.inbound(), self.outbound()]
    }
}

/// Running sums for one UTC date. Only created from a sample, so
/// `sample_count` is never zero.
#[derive(Debug)]
struct DayBucket {
    inbound_sum: f64,
    outbound_sum: f64,
    sample_count: u32,
}

impl DayBucket {
    fn from_sample(sample: &Sample) -> Self {
        DayBucket {
            inbound_sum: sample.inbound,
            outbound_sum: sample.outbound_or_zero(),
            sample_count: 1,
        }
    }

    fn add(&mut self, sample: &Sample) {
        self.inbound_sum += sample.inbound;
        self.outbound_sum += sample.outbound_or_zero();
        self.sample_count += 1;
    }

    fn averages(&self) -> (f64, f64) {
        let count = f64::from(self.sample_count);
        (self.inbound_sum / count, self.outbound_sum / count)
    }
}

/// Groups samples by UTC date into daily average rows, sorted by date, followed
/// by a totals row holding the sum of the daily averages.
pub fn aggregate(samples: &[Sample]) -> Vec<Row> {
    let mut buckets: HashMap<String, DayBucket> = HashMap::new();
    for sample in samples {
        buckets
            .entry(sample.date_key())
            .and_modify(|bucket| bucket.add(sample))
            .or_insert_with(|| DayBucket::from_sample(sample));
    }

    let mut dates: Vec<&String> = buckets.keys().collect();
    dates.sort();

    let mut rows = Vec::with_capacity(dates.len() + 1);
    let mut inbound_total = 0.0;
    let mut outbound_total = 0.0;
    for date in dates {
        let (inbound, outbound) = buckets[date].averages();
        inbound_total += inbound;
        outbound_total += outbound;
        rows.push(Row::Daily {
            date: date.clone(),
            inbound: format_bytes(inbound),
            outbound: format_bytes(outbound),
        });
    }
    rows.push(Row::Totals {
        inbound: format_bytes(inbound_total),
        outbound: format_bytes(outbound_total),
    });
    rows
}
