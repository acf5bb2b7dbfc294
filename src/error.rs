use std::error::Error;

use rusoto_cloudwatch::GetMetricStatisticsError;
use rusoto_core::RusotoError;
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, PartialEq)]
pub enum ReportError {
    NoneValue,
    EmptyTimeRange,
    WindowOutOfRange(u32),
    InvalidTimestamp(String),
    GetMetricsError(RusotoError<GetMetricStatisticsError>),
}

impl ReportError {
    /// Status code of the HTTP response reporting this error.
    pub fn status_code(&self) -> u16 {
        match *self {
            ReportError::GetMetricsError(_) => 502,
            _ => 500,
        }
    }
}

impl Display for ReportError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            ReportError::NoneValue => write!(f, "Value is None"),
            ReportError::EmptyTimeRange => write!(f, "Report window must cover at least one day"),
            ReportError::WindowOutOfRange(days) => {
                write!(f, "Report window of {} days is out of range", days)
            }
            ReportError::InvalidTimestamp(ref timestamp) => {
                write!(f, "Invalid datapoint timestamp: {}", timestamp)
            }
            ReportError::GetMetricsError(ref error) => std::fmt::Display::fmt(error, f),
        }
    }
}

impl Error for ReportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            ReportError::GetMetricsError(ref error) => Some(error),
            _ => None,
        }
    }
}

impl From<RusotoError<GetMetricStatisticsError>> for ReportError {
    fn from(e: RusotoError<GetMetricStatisticsError>) -> ReportError {
        ReportError::GetMetricsError(e)
    }
}

#[derive(Debug)]
pub enum DeliveryError {
    Client(String),
    Request(reqwest::Error),
    Rejected { status: u16 },
}

impl Display for DeliveryError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            DeliveryError::Client(ref error) => {
                write!(f, "HTTP client is unavailable: {}", error)
            }
            DeliveryError::Request(ref error) => std::fmt::Display::fmt(error, f),
            DeliveryError::Rejected { status } => {
                write!(f, "Channel rejected the message with status {}", status)
            }
        }
    }
}

impl Error for DeliveryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            DeliveryError::Request(ref error) => Some(error),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for DeliveryError {
    fn from(e: reqwest::Error) -> DeliveryError {
        DeliveryError::Request(e)
    }
}
