use chrono::{DateTime, FixedOffset};
use std::cmp::Ordering;
use std::fmt;

/// Highest score a rating may carry (CVSS scale).
pub const MAX_SCORE: f64 = 10.0;

/// Qualitative severity of a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Severity {
    #[default]
    Unknown,
    None,
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "critical" => Self::Critical,
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            "info" => Self::Info,
            "none" => Self::None,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Info => "info",
            Self::None => "none",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scoring method used to produce a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScoringMethod {
    CvssV2,
    CvssV3,
    CvssV31,
    CvssV4,
    Owasp,
    Ssvc,
    #[default]
    Other,
}

impl ScoringMethod {
    pub fn parse(value: &str) -> Self {
        match value {
            "CVSSv2" => Self::CvssV2,
            "CVSSv3" => Self::CvssV3,
            "CVSSv31" => Self::CvssV31,
            "CVSSv4" => Self::CvssV4,
            "OWASP" => Self::Owasp,
            "SSVC" => Self::Ssvc,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CvssV2 => "CVSSv2",
            Self::CvssV3 => "CVSSv3",
            Self::CvssV31 => "CVSSv31",
            Self::CvssV4 => "CVSSv4",
            Self::Owasp => "OWASP",
            Self::Ssvc => "SSVC",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ScoringMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name and URL of an authority (vulnerability source, rating source).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Source {
    pub name: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Rating {
    pub severity: Severity,
    pub method: ScoringMethod,
    pub score: Option<f64>,
    pub vector: Option<String>,
    pub justification: Option<String>,
    pub source: Option<Source>,
}

impl Rating {
    pub fn new(severity: Severity, method: ScoringMethod, score: Option<f64>) -> Self {
        Self {
            severity,
            method,
            score: score.and_then(checked_score),
            ..Default::default()
        }
    }
}

/// Keeps a score only when it lies on the 0.0 - 10.0 scale.
pub fn checked_score(score: f64) -> Option<f64> {
    (0.0..=MAX_SCORE).contains(&score).then_some(score)
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Advisory {
    pub title: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AffectedStatus {
    Affected,
    Unaffected,
    #[default]
    Unknown,
}

impl AffectedStatus {
    pub fn parse(value: &str) -> Self {
        match value {
            "affected" => Self::Affected,
            "unaffected" => Self::Unaffected,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Affected => "affected",
            Self::Unaffected => "unaffected",
            Self::Unknown => "unknown",
        }
    }
}

/// A single version or version range named by an `affects` entry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AffectedVersion {
    pub version: Option<String>,
    pub range: Option<String>,
    pub status: AffectedStatus,
}

/// Link from a vulnerability to one affected component.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Affect {
    pub bom_ref: String,
    pub versions: Vec<AffectedVersion>,
}

impl Affect {
    pub fn new(bom_ref: impl Into<String>) -> Self {
        Self {
            bom_ref: bom_ref.into(),
            versions: Vec::new(),
        }
    }
}

/// Vulnerability record as declared in the SBOM.
///
/// Lifecycle timestamps stay `None` when the document does not carry them
/// or carries something that is not RFC 3339.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Vulnerability {
    pub id: String,
    pub detail: Option<String>,
    pub description: Option<String>,
    pub recommendation: Option<String>,
    pub ratings: Vec<Rating>,
    pub cwes: Vec<u32>,
    pub advisories: Vec<Advisory>,
    pub affects: Vec<Affect>,
    pub source: Option<Source>,
    pub created: Option<DateTime<FixedOffset>>,
    pub updated: Option<DateTime<FixedOffset>>,
    pub published: Option<DateTime<FixedOffset>>,
    pub rejected: Option<DateTime<FixedOffset>>,
}

impl Vulnerability {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.ratings.push(rating);
        self
    }

    pub fn affecting(mut self, bom_ref: impl Into<String>) -> Self {
        self.affects.push(Affect::new(bom_ref));
        self
    }

    /// Highest scored rating, if any rating carries a score.
    pub fn max_score(&self) -> Option<f64> {
        self.ratings
            .iter()
            .filter_map(|r| r.score)
            .fold(None, |acc, s| Some(acc.map_or(s, |m: f64| m.max(s))))
    }

    /// Highest qualitative severity across all ratings.
    pub fn max_severity(&self) -> Severity {
        self.ratings
            .iter()
            .map(|r| r.severity)
            .max()
            .unwrap_or_default()
    }

    pub fn affects_ref(&self, bom_ref: &str) -> bool {
        self.affects.iter().any(|a| a.bom_ref == bom_ref)
    }
}

/// Orders vulnerabilities most severe first; unscored ones last, ties by id.
pub fn by_descending_score(a: &Vulnerability, b: &Vulnerability) -> Ordering {
    let score_a = a.max_score().unwrap_or(-1.0);
    let score_b = b.max_score().unwrap_or(-1.0);
    score_b
        .partial_cmp(&score_a)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.id.cmp(&b.id))
}
