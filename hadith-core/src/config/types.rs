//! Configuration type definitions
//!
//! Everything that would otherwise be a compiled-in literal: credentials,
//! API endpoint and key, retry budget, field names and length bounds.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::Write;

use serde::{Deserialize, Serialize};

use super::display::DisplayGeometry;
use crate::policy::AcceptancePolicy;

/// Hard upper bound on fetch attempts per cycle
pub const MAX_FETCH_ATTEMPTS: usize = 16;

/// Maximum number of HTTP status codes treated as success
pub const MAX_SUCCESS_STATUSES: usize = 4;

/// Default API endpoint
pub const DEFAULT_BASE_URL: &str = "https://hadithapi.com/api/hadiths";

/// Catalog size used by the standard preset
pub const STANDARD_IDENTIFIER_MAX: u32 = 7563;

/// Catalog size used by the compact preset
pub const COMPACT_IDENTIFIER_MAX: u32 = 1000;

/// Fetch budget of the standard preset
pub const STANDARD_MAX_ATTEMPTS: u8 = 10;

/// Fetch budget of the compact preset
pub const COMPACT_MAX_ATTEMPTS: u8 = 5;

/// Default pause between fetch attempts (ms)
pub const DEFAULT_BACKOFF_MS: u32 = 500;

/// Default deep sleep interval (s)
pub const DEFAULT_SLEEP_INTERVAL_S: u32 = 3600;

/// Reasons a configuration is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigIssue {
    /// Minimum text length above maximum
    LengthBoundsInverted,
    /// Fetch budget of zero attempts
    AttemptBudgetZero,
    /// Fetch budget above [`MAX_FETCH_ATTEMPTS`]
    AttemptBudgetTooLarge,
    /// Identifier range `[1, 0]`
    IdentifierRangeEmpty,
    /// No API base URL
    MissingBaseUrl,
    /// No API key
    MissingApiKey,
    /// No HTTP status would count as success
    NoSuccessStatus,
    /// A field path with no segments, or an empty segment
    EmptyFieldPath,
    /// Character width estimate of zero
    ZeroCharWidth,
    /// Margins leave no room for text
    PanelTooNarrow,
}

/// Extraction strategy for API payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "lowercase")]
pub enum ExtractStrategy {
    /// JSON-aware parse
    #[default]
    Structured,
    /// Textual key scan, tolerant of payloads that are not valid JSON
    Scan,
}

/// Wi-Fi credentials, consumed by the board firmware
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub ssid: String,
    pub password: String,
}

/// Remote catalog endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Endpoint without query string
    pub base_url: String,
    /// Static API key passed as `apiKey`
    pub api_key: String,
    /// Largest identifier requested; identifiers are drawn from `[1, identifier_max]`
    pub identifier_max: u32,
    /// Status codes treated as a successful fetch
    pub success_statuses: heapless::Vec<u16, MAX_SUCCESS_STATUSES>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let mut success_statuses = heapless::Vec::new();
        // 200 OK, 301 Moved Permanently (followed by the transport)
        let _ = success_statuses.push(200);
        let _ = success_statuses.push(301);

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            identifier_max: STANDARD_IDENTIFIER_MAX,
            success_statuses,
        }
    }
}

impl ApiConfig {
    /// Build the request URL for one identifier
    pub fn request_url(&self, identifier: u32) -> String {
        let mut url = String::with_capacity(self.base_url.len() + self.api_key.len() + 40);
        // Writing into a String cannot fail
        let _ = write!(
            url,
            "{}?apiKey={}&limit=1&hadithNumber={}",
            self.base_url, self.api_key, identifier
        );
        url
    }

    /// Check whether a status code counts as success
    pub fn is_success(&self, status: u16) -> bool {
        self.success_statuses.contains(&status)
    }

    pub fn validate(&self) -> Result<(), ConfigIssue> {
        if self.base_url.is_empty() {
            return Err(ConfigIssue::MissingBaseUrl);
        }
        if self.api_key.is_empty() {
            return Err(ConfigIssue::MissingApiKey);
        }
        if self.identifier_max == 0 {
            return Err(ConfigIssue::IdentifierRangeEmpty);
        }
        if self.success_statuses.is_empty() {
            return Err(ConfigIssue::NoSuccessStatus);
        }
        Ok(())
    }
}

/// Retry loop settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct FetchConfig {
    /// Fetch attempts per cycle (1..=[`MAX_FETCH_ATTEMPTS`])
    pub max_attempts: u8,
    /// Pause between attempts (ms)
    pub backoff_ms: u32,
    /// How payloads are taken apart
    pub strategy: ExtractStrategy,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_attempts: STANDARD_MAX_ATTEMPTS,
            backoff_ms: DEFAULT_BACKOFF_MS,
            strategy: ExtractStrategy::Structured,
        }
    }
}

impl FetchConfig {
    pub fn validate(&self) -> Result<(), ConfigIssue> {
        if self.max_attempts == 0 {
            return Err(ConfigIssue::AttemptBudgetZero);
        }
        if usize::from(self.max_attempts) > MAX_FETCH_ATTEMPTS {
            return Err(ConfigIssue::AttemptBudgetTooLarge);
        }
        Ok(())
    }
}

/// Path of keys from an object down to a value
pub type FieldPath = Vec<String>;

/// Names of the payload fields of interest
///
/// Each entry is a path of object keys. The collection path is followed
/// from the payload root; the others from each collection entry. The
/// scanning extractor only looks at the last key of each path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldMap {
    /// Array holding the entries
    pub collection: FieldPath,
    /// Primary (English) text
    pub text: FieldPath,
    /// Narrator line
    pub narrator: FieldPath,
    /// Book name
    pub book: FieldPath,
    /// Chapter title
    pub chapter: FieldPath,
    /// Catalog number
    pub number: FieldPath,
}

fn path(keys: &[&str]) -> FieldPath {
    keys.iter().map(|k| k.to_string()).collect()
}

impl Default for FieldMap {
    fn default() -> Self {
        Self {
            collection: path(&["hadiths", "data"]),
            text: path(&["hadithEnglish"]),
            narrator: path(&["englishNarrator"]),
            book: path(&["book", "bookName"]),
            chapter: path(&["chapter", "chapterEnglish"]),
            number: path(&["hadithNumber"]),
        }
    }
}

impl FieldMap {
    pub fn validate(&self) -> Result<(), ConfigIssue> {
        let paths = [
            &self.collection,
            &self.text,
            &self.narrator,
            &self.book,
            &self.chapter,
            &self.number,
        ];
        for p in paths {
            if p.is_empty() || p.iter().any(|key| key.is_empty()) {
                return Err(ConfigIssue::EmptyFieldPath);
            }
        }
        Ok(())
    }
}

/// Deep sleep settings, consumed by the board firmware
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct SleepConfig {
    /// Seconds between wake cycles
    pub interval_s: u32,
}

impl Default for SleepConfig {
    fn default() -> Self {
        Self {
            interval_s: DEFAULT_SLEEP_INTERVAL_S,
        }
    }
}

/// Complete configuration for one wake cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleConfig {
    pub network: NetworkConfig,
    pub api: ApiConfig,
    pub fetch: FetchConfig,
    pub acceptance: AcceptancePolicy,
    pub fields: FieldMap,
    pub display: DisplayGeometry,
    pub sleep: SleepConfig,
}

impl CycleConfig {
    /// Full catalog, ten attempts, JSON-aware extraction
    pub fn standard() -> Self {
        Self::default()
    }

    /// First thousand entries, five attempts, scanning extraction
    pub fn compact() -> Self {
        let mut config = Self::default();
        config.api.identifier_max = COMPACT_IDENTIFIER_MAX;
        config.fetch.max_attempts = COMPACT_MAX_ATTEMPTS;
        config.fetch.strategy = ExtractStrategy::Scan;
        config
    }

    /// Check every section, returning the first problem found
    pub fn validate(&self) -> Result<(), ConfigIssue> {
        self.api.validate()?;
        self.fetch.validate()?;
        self.acceptance.validate()?;
        self.fields.validate()?;
        self.display.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> CycleConfig {
        let mut config = CycleConfig::standard();
        config.api.api_key = "key".to_string();
        config
    }

    #[test]
    fn test_request_url_format() {
        let mut api = ApiConfig::default();
        api.api_key = "$2y$10$abc".to_string();
        assert_eq!(
            api.request_url(42),
            "https://hadithapi.com/api/hadiths?apiKey=$2y$10$abc&limit=1&hadithNumber=42"
        );
    }

    #[test]
    fn test_default_success_statuses() {
        let api = ApiConfig::default();
        assert!(api.is_success(200));
        assert!(api.is_success(301));
        assert!(!api.is_success(302));
        assert!(!api.is_success(404));
        assert!(!api.is_success(500));
    }

    #[test]
    fn test_presets() {
        let standard = CycleConfig::standard();
        assert_eq!(standard.fetch.max_attempts, 10);
        assert_eq!(standard.api.identifier_max, 7563);
        assert_eq!(standard.fetch.strategy, ExtractStrategy::Structured);

        let compact = CycleConfig::compact();
        assert_eq!(compact.fetch.max_attempts, 5);
        assert_eq!(compact.api.identifier_max, 1000);
        assert_eq!(compact.fetch.strategy, ExtractStrategy::Scan);
    }

    #[test]
    fn test_valid_config_passes() {
        assert_eq!(valid().validate(), Ok(()));
    }

    #[test]
    fn test_missing_api_key_rejected() {
        assert_eq!(
            CycleConfig::standard().validate(),
            Err(ConfigIssue::MissingApiKey)
        );
    }

    #[test]
    fn test_attempt_budget_bounds() {
        let mut config = valid();
        config.fetch.max_attempts = 0;
        assert_eq!(config.validate(), Err(ConfigIssue::AttemptBudgetZero));

        config.fetch.max_attempts = (MAX_FETCH_ATTEMPTS + 1) as u8;
        assert_eq!(config.validate(), Err(ConfigIssue::AttemptBudgetTooLarge));

        config.fetch.max_attempts = MAX_FETCH_ATTEMPTS as u8;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_empty_identifier_range_rejected() {
        let mut config = valid();
        config.api.identifier_max = 0;
        assert_eq!(config.validate(), Err(ConfigIssue::IdentifierRangeEmpty));
    }

    #[test]
    fn test_empty_field_path_rejected() {
        let mut config = valid();
        config.fields.book = path(&["book", ""]);
        assert_eq!(config.validate(), Err(ConfigIssue::EmptyFieldPath));

        config.fields.book = Vec::new();
        assert_eq!(config.validate(), Err(ConfigIssue::EmptyFieldPath));
    }
}
