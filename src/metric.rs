use chrono::{DateTime, Utc};

/// One statistical period of traffic for the reported instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub inbound: f64,
    /// `None` when the outbound series had no datapoint for this period.
    pub outbound: Option<f64>,
}

impl Sample {
    /// UTC calendar date used to group samples, e.g. `2024-06-01`.
    pub fn date_key(&self) -> String {
        self.timestamp.format("%Y-%m-%d").to_string()
    }

    pub fn outbound_or_zero(&self) -> f64 {
        self.outbound.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use crate::metric::Sample;
    use chrono::{DateTime, Utc};
    use std::str::FromStr;

    #[test]
    fn test_date_key_truncates_time_of_day() {
        let sample = Sample {
            timestamp: DateTime::<Utc>::from_str("2024-06-01T23:59:59.0+00:00").unwrap(),
            inbound: 1.0,
            outbound: None,
        };
        assert_eq!(sample.date_key(), "2024-06-01");
    }

    #[test]
    fn test_date_key_is_utc() {
        let sample = Sample {
            timestamp: DateTime::<Utc>::from_str("2024-06-02T08:00:00.0+09:00").unwrap(),
            inbound: 1.0,
            outbound: Some(2.0),
        };
        assert_eq!(sample.date_key(), "2024-06-01");
    }

    #[test]
    fn test_outbound_or_zero() {
        let timestamp = DateTime::<Utc>::from_str("2024-06-01T00:00:00.0+00:00").unwrap();
        let missing = Sample {
            timestamp,
            inbound: 1.0,
            outbound: None,
        };
        let present = Sample {
            timestamp,
            inbound: 1.0,
            outbound: Some(42.0),
        };
        assert_eq!(missing.outbound_or_zero(), 0.0);
        assert_eq!(present.outbound_or_zero(), 42.0);
    }
}
