//! Link discovery settings
//!
//! The defaults describe the Kyiv government-office sweep: nine search
//! centres covering Kyiv and Kyiv Oblast, four place types, and a curated
//! exclusion list for the private businesses that the Places API happily
//! tags as government or university.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::ConfigError;
use crate::utils::constants::{API_KEY_ENV, DEFAULT_LINKS_OUTPUT, PLACES_API_BASE};

/// One nearby-search centre
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub label: String,
}

impl GridPoint {
    pub fn new(lat: f64, lng: f64, label: impl Into<String>) -> Self {
        Self {
            lat,
            lng,
            label: label.into(),
        }
    }

    /// `lat,lng` as the Places API expects it
    #[must_use]
    pub fn as_param(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

/// Retry policy for fresh page tokens.
///
/// Google rejects a `next_page_token` with `INVALID_REQUEST` until it has
/// propagated, which takes a couple of seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageTokenRetry {
    /// Total attempts per page-token request
    pub max_attempts: u32,
    pub delay_ms: u64,
}

impl Default for PageTokenRetry {
    fn default() -> Self {
        Self {
            max_attempts: 6,
            delay_ms: 2500,
        }
    }
}

impl PageTokenRetry {
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Places API key. Empty means "read from the environment".
    pub api_key: String,

    /// Base URL of the Places web service
    pub api_base: String,

    /// Nearby-search radius in metres
    pub radius_m: u32,

    pub locations: Vec<GridPoint>,
    pub place_types: Vec<String>,

    /// Lowercase substrings that reject a place by name
    pub exclude_keywords: Vec<String>,

    /// Accepted first-level administrative area names (the oblast)
    pub accepted_regions: Vec<String>,

    /// Accepted names for the city itself
    pub accepted_cities: Vec<String>,

    pub output_path: PathBuf,
    pub page_token_retry: PageTokenRetry,
    pub nearby_timeout_secs: u64,
    pub details_timeout_secs: u64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: PLACES_API_BASE.to_string(),
            radius_m: 50_000,
            locations: default_locations(),
            place_types: to_strings(&[
                "local_government_office",
                "city_hall",
                "courthouse",
                "university",
            ]),
            exclude_keywords: default_exclude_keywords(),
            accepted_regions: to_strings(&[
                "Kyiv Oblast",
                "Kyivs'ka oblast",
                "Kyivska oblast",
                "Київська область",
            ]),
            accepted_cities: to_strings(&["Kyiv", "Київ", "misto Kyiv", "місто Київ"]),
            output_path: PathBuf::from(DEFAULT_LINKS_OUTPUT),
            page_token_retry: PageTokenRetry::default(),
            nearby_timeout_secs: 20,
            details_timeout_secs: 15,
        }
    }
}

impl DiscoveryConfig {
    /// Load overrides from a JSON file; missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Fill an empty API key from the environment and check the grid.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        if self.api_key.trim().is_empty() {
            self.api_key = std::env::var(API_KEY_ENV).unwrap_or_default();
        }
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey(API_KEY_ENV));
        }
        if self.locations.is_empty() || self.place_types.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one location and one place type are required".to_string(),
            ));
        }
        if self.page_token_retry.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "page_token_retry.max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn nearby_timeout(&self) -> Duration {
        Duration::from_secs(self.nearby_timeout_secs)
    }

    #[must_use]
    pub fn details_timeout(&self) -> Duration {
        Duration::from_secs(self.details_timeout_secs)
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn default_locations() -> Vec<GridPoint> {
    vec![
        GridPoint::new(50.4501, 30.5234, "Kyiv centre"),
        GridPoint::new(50.9000, 30.5234, "North (Dymer/Ivankiv)"),
        GridPoint::new(50.7500, 31.2000, "North-east (Brovary/Baryshivka)"),
        GridPoint::new(50.4500, 31.2230, "East"),
        GridPoint::new(50.1000, 31.1500, "South-east (Pereiaslav)"),
        GridPoint::new(49.9990, 30.5234, "South (Obukhiv/Ukrainka/Rzhyshchiv)"),
        GridPoint::new(50.0500, 29.9500, "South-west (Vasylkiv/Fastiv)"),
        GridPoint::new(50.4500, 29.8230, "West (Makariv)"),
        GridPoint::new(50.8000, 29.9500, "North-west (Bucha/Irpin/Borodianka)"),
    ]
}

fn default_exclude_keywords() -> Vec<String> {
    to_strings(&[
        // visa and document agencies
        "візовий",
        "visa",
        "вфс",
        "vfs",
        "пп документ",
        // addiction treatment
        "addiction treatment center",
        "rehab",
        "rehabilitation",
        "detox",
        "detoxification",
        "drug treatment",
        "substance abuse",
        "alcohol rehab",
        "drug rehab",
        "methadone clinic",
        "sobriety center",
        "treatment facility",
        "12-step program",
        "наркоцентр",
        "наркологічний центр",
        "лікування залежностей",
        "лікування адикцій",
        "реабілітаційний центр",
        "реабілітація",
        "центр реабілітації",
        "центр лікування наркоманії",
        "центр лікування алкоголю",
        "наркологія",
        "наркологічна клініка",
        "лікування від наркотиків",
        "лікування від алкоголю",
        "клініка залежностей",
        "терапія залежностей",
        "нарко центр",
        "реаб центр",
        "реаб. центр",
        "rehab center",
        "reab",
        "реаб",
        // private hospitals and clinics
        "приватна лікарня",
        "приватна клініка",
        "приватний медичний центр",
        "приватний госпіталь",
        "приватний медцентр",
        "приватний мед заклад",
        "private hospital",
        "private clinic",
        "private medical center",
        "private healthcare",
        "private infirmary",
        // lawyers
        "адвокат",
        "адвокатське бюро",
        "адвокатська компанія",
        "адвокатське об'єднання",
        "юридична фірма",
        "юридична компанія",
        "юридичні послуги",
        "правова допомога",
        "правова консультація",
        "юрист",
        "юридичн",
        "lawyer",
        "attorney",
        "law firm",
        "legal services",
        "legal aid",
        "solicitor",
        "barrister",
        // private schools
        "приватна школа",
        "приватний навчальний заклад",
        "приватний ліцей",
        "приватний коледж",
        "private school",
        "private high school",
        "private academy",
        "private college",
        // private universities
        "приватний університет",
        "приватний інститут",
        "приватна академія",
        "private university",
        "private institute",
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid() {
        let config = DiscoveryConfig::default();
        assert_eq!(config.locations.len(), 9);
        assert_eq!(config.locations[0].as_param(), "50.4501,30.5234");
        assert_eq!(config.radius_m, 50_000);
        assert_eq!(config.page_token_retry.max_attempts, 6);
        assert_eq!(config.page_token_retry.delay(), Duration::from_millis(2500));
    }

    #[test]
    fn test_explicit_key_survives_validation() {
        let config = DiscoveryConfig {
            api_key: "test-key".to_string(),
            ..DiscoveryConfig::default()
        }
        .validate()
        .expect("Config with key should validate");
        assert_eq!(config.api_key, "test-key");
    }

    #[test]
    fn test_empty_grid_is_rejected() {
        let config = DiscoveryConfig {
            api_key: "test-key".to_string(),
            locations: Vec::new(),
            ..DiscoveryConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
