//! Page outcome definitions for tracking run progress
//!
//! "Bad status" and "no item blocks" are kept as separate outcomes even though
//! the default policy stops the run for both.
use std::fmt;

/// Result of requesting and extracting one result page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// Page loaded and contained item blocks
    Extracted {
        /// Number of container matches on the page
        containers: usize,
        /// Number of records emitted (containers with a price)
        records: usize,
    },

    /// Server answered with something other than 200 OK
    HttpStatus {
        /// The HTTP status code
        status_code: u16,
    },

    /// Page loaded but the container selector matched nothing
    NoContainers,

    /// Request never produced a usable body (DNS, connect, timeout, read)
    TransportError {
        /// Error description
        error: String,
    },
}

impl PageOutcome {
    /// Returns true if the page yielded item blocks
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Extracted { .. })
    }

    /// Returns true for failures that say nothing about later pages
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::TransportError { .. })
    }

    /// Number of records this page contributed
    pub fn record_count(&self) -> usize {
        match self {
            Self::Extracted { records, .. } => *records,
            _ => 0,
        }
    }

    /// Short machine-friendly label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Extracted { .. } => "extracted",
            Self::HttpStatus { .. } => "http_status",
            Self::NoContainers => "no_containers",
            Self::TransportError { .. } => "transport_error",
        }
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extracted {
                containers,
                records,
            } => write!(f, "{} records from {} item blocks", records, containers),
            Self::HttpStatus { status_code } => write!(f, "HTTP status {}", status_code),
            Self::NoContainers => write!(f, "no item blocks found"),
            Self::TransportError { error } => write!(f, "transport error: {}", error),
        }
    }
}

/// Outcome of one page, tagged with its page number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReport {
    pub page: u32,
    pub url: String,
    pub outcome: PageOutcome,
}

/// Why the page loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every configured page was attempted
    Exhausted,

    /// A page returned a non-200 status
    HttpStatus { page: u32, status_code: u16 },

    /// A page loaded without any item blocks
    NoContainers { page: u32 },
}

impl StopReason {
    /// Returns true if the run ended before the configured page count
    pub fn is_early(&self) -> bool {
        !matches!(self, Self::Exhausted)
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted => write!(f, "all pages processed"),
            Self::HttpStatus { page, status_code } => {
                write!(f, "page {} returned HTTP {}", page, status_code)
            }
            Self::NoContainers { page } => write!(f, "page {} had no products", page),
        }
    }
}
