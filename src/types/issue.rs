use crate::error::{ImportanceError, Result};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A count that may be missing from the stored document.
///
/// Missing and `null` resolve to `DEFAULT`; an explicit zero stays zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OptionalCount<const DEFAULT: u64>(Option<u64>);

pub type DuplicateCount = OptionalCount<1>;
pub type Upvotes = OptionalCount<0>;

#[allow(dead_code)]
impl<const DEFAULT: u64> OptionalCount<DEFAULT> {
    pub fn new(count: u64) -> Self {
        Self(Some(count))
    }

    pub fn absent() -> Self {
        Self(None)
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    pub fn value(&self) -> u64 {
        self.0.unwrap_or(DEFAULT)
    }
}

impl<'de, const DEFAULT: u64> Deserialize<'de> for OptionalCount<DEFAULT> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<u64>::deserialize(deserializer).map(Self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    High,
    Medium,
    #[serde(other)]
    Unclassified,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Millis(i64),
    Document {
        #[serde(alias = "_seconds")]
        seconds: i64,
        #[serde(default, alias = "_nanoseconds")]
        nanoseconds: u32,
    },
}

impl RawTimestamp {
    fn resolve(&self) -> std::result::Result<DateTime<Utc>, String> {
        match self {
            Self::Text(text) => DateTime::parse_from_rfc3339(text)
                .map(|parsed| parsed.with_timezone(&Utc))
                .map_err(|e| format!("last_updated `{text}` is not an RFC 3339 timestamp: {e}")),
            Self::Millis(millis) => Utc
                .timestamp_millis_opt(*millis)
                .single()
                .ok_or_else(|| format!("last_updated {millis}ms is out of range")),
            Self::Document {
                seconds,
                nanoseconds,
            } => DateTime::<Utc>::from_timestamp(*seconds, *nanoseconds)
                .ok_or_else(|| format!("last_updated {seconds}s/{nanoseconds}ns is out of range")),
        }
    }
}

/// Raw field layout of a stored issue document.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueDocument {
    photo_urls: Option<Vec<String>>,
    video_urls: Option<Vec<String>>,
    summary: Option<String>,
    #[serde(default)]
    duplicate_count: DuplicateCount,
    #[serde(default)]
    upvotes: Upvotes,
    last_updated: Option<RawTimestamp>,
    ai_generated_severity: Option<Severity>,
    importance_score: Option<f64>,
}

/// Post-change view of an issue, as delivered by the change event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "IssueDocument")]
pub struct IssueSnapshot {
    pub photo_urls: Vec<String>,
    pub video_urls: Vec<String>,
    pub summary: Option<String>,
    pub duplicate_count: DuplicateCount,
    pub upvotes: Upvotes,
    pub last_updated: DateTime<Utc>,
    pub severity: Option<Severity>,
    pub importance_score: Option<f64>,
}

impl TryFrom<IssueDocument> for IssueSnapshot {
    type Error = String;

    fn try_from(document: IssueDocument) -> std::result::Result<Self, Self::Error> {
        let last_updated = document
            .last_updated
            .as_ref()
            .ok_or_else(|| "last_updated is missing".to_string())?
            .resolve()?;

        Ok(Self {
            photo_urls: document.photo_urls.unwrap_or_default(),
            video_urls: document.video_urls.unwrap_or_default(),
            summary: document.summary,
            duplicate_count: document.duplicate_count,
            upvotes: document.upvotes,
            last_updated,
            severity: document.ai_generated_severity,
            importance_score: document.importance_score,
        })
    }
}

impl IssueSnapshot {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| ImportanceError::MalformedInput(e.to_string()))
    }

    pub fn has_photos(&self) -> bool {
        !self.photo_urls.is_empty()
    }

    pub fn has_videos(&self) -> bool {
        !self.video_urls.is_empty()
    }

    pub fn has_summary(&self) -> bool {
        self.summary.as_deref().is_some_and(|summary| !summary.is_empty())
    }
}
