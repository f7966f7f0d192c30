use serde::Deserialize;
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::time::Duration;

pub use humantime::DurationError;

/// A decoded `prometheus.yml`.
///
/// Only the parts needed to enumerate jobs and their targets are typed. Any
/// other top-level key ends up in [`Document::extra`] as it was decoded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    pub global: GlobalConfig,
    /// The `scrape_configs` entries, in document order.
    pub jobs: Vec<Job>,
    /// Top-level keys that are not part of the typed schema.
    pub extra: BTreeMap<String, Value>,
}

impl Document {
    /// Find the first job with the given name.
    pub fn job(&self, name: &str) -> Option<&Job> {
        self.jobs.iter().find(|job| job.job_name == name)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub evaluation_interval: Option<String>,
    #[serde(default)]
    pub scrape_interval: Option<String>,
    #[serde(default)]
    pub scrape_timeout: Option<String>,
}

impl GlobalConfig {
    pub fn evaluation_interval_duration(&self) -> Result<Option<Duration>, DurationError> {
        parse_optional(self.evaluation_interval.as_deref())
    }

    pub fn scrape_interval_duration(&self) -> Result<Option<Duration>, DurationError> {
        parse_optional(self.scrape_interval.as_deref())
    }

    pub fn scrape_timeout_duration(&self) -> Result<Option<Duration>, DurationError> {
        parse_optional(self.scrape_timeout.as_deref())
    }
}

/// A single `scrape_configs` entry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Job {
    pub job_name: String,
    pub metrics_path: Option<String>,
    pub params: Params,
    pub relabel_configs: Vec<RelabelRule>,
    /// Always a sequence, even when the document used the single object
    /// shorthand.
    pub static_configs: Vec<StaticTargetGroup>,
    pub scrape_interval: Option<String>,
    pub scrape_timeout: Option<String>,
}

impl Job {
    /// All targets of the job, across its static groups.
    pub fn targets(&self) -> impl Iterator<Item = &str> + '_ {
        self.static_configs
            .iter()
            .flat_map(|group| group.targets.iter().map(String::as_str))
    }

    /// The job's own scrape interval, or the global one when the job does
    /// not override it.
    pub fn effective_scrape_interval<'a>(&'a self, global: &'a GlobalConfig) -> Option<&'a str> {
        self.scrape_interval
            .as_deref()
            .or(global.scrape_interval.as_deref())
    }

    pub fn effective_scrape_timeout<'a>(&'a self, global: &'a GlobalConfig) -> Option<&'a str> {
        self.scrape_timeout
            .as_deref()
            .or(global.scrape_timeout.as_deref())
    }

    pub fn scrape_interval_duration(
        &self,
        global: &GlobalConfig,
    ) -> Result<Option<Duration>, DurationError> {
        parse_optional(self.effective_scrape_interval(global))
    }

    pub fn scrape_timeout_duration(
        &self,
        global: &GlobalConfig,
    ) -> Result<Option<Duration>, DurationError> {
        parse_optional(self.effective_scrape_timeout(global))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Params {
    #[serde(default)]
    pub module: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RelabelRule {
    #[serde(default)]
    pub source_labels: Vec<String>,
    #[serde(default)]
    pub target_label: String,
    #[serde(default)]
    pub replacement: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StaticTargetGroup {
    pub targets: Vec<String>,
    pub labels: BTreeMap<String, String>,
}

/// Parse a Prometheus style duration such as `15s` or `1h30m`.
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    humantime::parse_duration(input.trim())
}

fn parse_optional(input: Option<&str>) -> Result<Option<Duration>, DurationError> {
    input.map(parse_duration).transpose()
}
