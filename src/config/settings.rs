//! User settings for Forkly
//!
//! Manages the backend connection, onboarding validation rules and nearby
//! search defaults.

use serde::{Deserialize, Serialize};

use super::paths::ForklyPaths;
use crate::error::ForklyError;
use crate::models::SelectionBounds;
use crate::storage::file_io::write_json_atomic;

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSettings {
    /// Project URL of the hosted backend (e.g., "https://xyz.example.co")
    #[serde(default)]
    pub url: String,

    /// Public anonymous API key sent with every request
    #[serde(default)]
    pub anon_key: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl BackendSettings {
    /// Whether enough is configured to talk to the backend
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty() && !self.anon_key.trim().is_empty()
    }
}

/// Rules applied by the onboarding step validator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingRules {
    /// Minimum password length at signup
    #[serde(default = "default_password_min_length")]
    pub password_min_length: usize,

    /// How many occasions must be picked
    #[serde(default = "default_occasions_bounds")]
    pub occasions: SelectionBounds,

    /// How many place types must be picked
    #[serde(default = "default_place_types_bounds")]
    pub place_types: SelectionBounds,

    /// How many decision styles must be picked
    #[serde(default = "default_decision_style_bounds")]
    pub decision_style: SelectionBounds,

    /// Quiet period before a username availability check is sent
    #[serde(default = "default_username_check_debounce_ms")]
    pub username_check_debounce_ms: u64,
}

impl Default for OnboardingRules {
    fn default() -> Self {
        Self {
            password_min_length: default_password_min_length(),
            occasions: default_occasions_bounds(),
            place_types: default_place_types_bounds(),
            decision_style: default_decision_style_bounds(),
            username_check_debounce_ms: default_username_check_debounce_ms(),
        }
    }
}

/// Defaults for nearby restaurant searches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NearbySettings {
    /// Radius used when none is given
    #[serde(default = "default_radius_km")]
    pub default_radius_km: f64,

    /// Largest radius the client will ask for
    #[serde(default = "default_max_radius_km")]
    pub max_radius_km: f64,

    /// Number of results used when none is given
    #[serde(default = "default_nearby_limit")]
    pub default_limit: usize,
}

impl Default for NearbySettings {
    fn default() -> Self {
        Self {
            default_radius_km: default_radius_km(),
            max_radius_km: default_max_radius_km(),
            default_limit: default_nearby_limit(),
        }
    }
}

/// User settings for Forkly
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Backend connection
    #[serde(default)]
    pub backend: BackendSettings,

    /// Onboarding validation rules
    #[serde(default)]
    pub onboarding: OnboardingRules,

    /// Nearby search defaults
    #[serde(default)]
    pub nearby: NearbySettings,

    /// Whether onboarding has been completed on this machine
    #[serde(default)]
    pub onboarding_completed: bool,
}

fn default_schema_version() -> u32 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            backend: BackendSettings::default(),
            onboarding: OnboardingRules::default(),
            nearby: NearbySettings::default(),
            onboarding_completed: false,
        }
    }
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_password_min_length() -> usize {
    8
}

fn default_occasions_bounds() -> SelectionBounds {
    SelectionBounds::new(3, 6)
}

fn default_place_types_bounds() -> SelectionBounds {
    SelectionBounds::new(1, 3)
}

fn default_decision_style_bounds() -> SelectionBounds {
    SelectionBounds::new(1, 2)
}

fn default_username_check_debounce_ms() -> u64 {
    400
}

fn default_radius_km() -> f64 {
    5.0
}

fn default_max_radius_km() -> f64 {
    50.0
}

fn default_nearby_limit() -> usize {
    20
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &ForklyPaths) -> Result<Self, ForklyError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                ForklyError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ForklyError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ForklyPaths) -> Result<(), ForklyError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Apply command-line or environment overrides for the backend
    pub fn apply_backend_overrides(&mut self, url: Option<String>, anon_key: Option<String>) {
        if let Some(url) = url {
            self.backend.url = url.trim_end_matches('/').to_string();
        }
        if let Some(anon_key) = anon_key {
            self.backend.anon_key = anon_key;
        }
    }
}
