use crate::selector::SelectorTree;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure for Price-Scout
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub search: SearchConfig,
    #[serde(default)]
    pub request: RequestConfig,
    pub selectors: SelectorTree,
    #[serde(default)]
    pub output: OutputConfig,
}

/// What to search for and how many result pages to walk
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Search URL prefix; the query term is appended verbatim
    #[serde(rename = "url-base")]
    pub url_base: String,

    /// Search term (spaces become hyphens in the request URL)
    pub query: String,

    /// Number of result pages to request, starting at page 1
    #[serde(default = "default_pages")]
    pub pages: u32,

    /// Minimum delay before each request (seconds)
    #[serde(rename = "delay-min", default = "default_delay_min")]
    pub delay_min: f64,

    /// Maximum delay before each request (seconds)
    #[serde(rename = "delay-max", default = "default_delay_max")]
    pub delay_max: f64,

    /// What to do when a page loads but contains no item blocks
    #[serde(rename = "on-empty-page", default)]
    pub on_empty_page: EmptyPageAction,
}

/// Reaction to a successfully fetched page without any container match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyPageAction {
    /// Treat the page as the end of the catalog
    #[default]
    Stop,

    /// Skip the page and keep paging
    Continue,
}

/// HTTP request settings
#[derive(Debug, Clone, Deserialize)]
pub struct RequestConfig {
    /// Total request timeout (milliseconds)
    #[serde(rename = "timeout-ms", default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Replaces the built-in browser user agent
    #[serde(rename = "user-agent", default)]
    pub user_agent: Option<String>,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            user_agent: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the CSV file is written into (created if missing)
    #[serde(default = "default_directory")]
    pub directory: String,

    /// File name prefix; the extraction date is appended
    #[serde(rename = "file-prefix", default = "default_file_prefix")]
    pub file_prefix: String,
}

impl OutputConfig {
    /// Returns the CSV path for a run on the given date
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use price_scout::config::OutputConfig;
    ///
    /// let output = OutputConfig::default();
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
    /// assert_eq!(
    ///     output.csv_path(date),
    ///     std::path::Path::new("data/precios_2024-03-09.csv")
    /// );
    /// ```
    pub fn csv_path(&self, date: NaiveDate) -> PathBuf {
        PathBuf::from(&self.directory).join(format!(
            "{}_{}.csv",
            self.file_prefix,
            date.format("%Y-%m-%d")
        ))
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            file_prefix: default_file_prefix(),
        }
    }
}

fn default_pages() -> u32 {
    5
}

fn default_delay_min() -> f64 {
    3.0
}

fn default_delay_max() -> f64 {
    8.0
}

fn default_timeout_ms() -> u64 {
    15_000
}

fn default_directory() -> String {
    "data".to_string()
}

fn default_file_prefix() -> String {
    "precios".to_string()
}
