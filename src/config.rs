//! Build-time configuration.
//!
//! The wasm bundle has no process environment at runtime, so values are
//! captured from the build environment with `option_env!`.

use crate::error::MapError;
use log::LevelFilter;

pub const ACCESS_TOKEN_VAR: &str = "MAPBOX_ACCESS_TOKEN";
pub const LOG_LEVEL_VAR: &str = "OTTER_CURVE_LOG";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub access_token: Option<String>,
    pub log_level: LevelFilter,
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("MAPBOX_ACCESS_TOKEN"),
            option_env!("OTTER_CURVE_LOG"),
        )
    }

    pub fn from_values(access_token: Option<&str>, log_level: Option<&str>) -> Self {
        let access_token = access_token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        let log_level = log_level
            .and_then(|l| l.trim().parse().ok())
            .unwrap_or(LevelFilter::Info);
        Self {
            access_token,
            log_level,
        }
    }

    /// The token, or the configuration error the shell should display.
    pub fn access_token(&self) -> Result<&str, MapError> {
        self.access_token.as_deref().ok_or_else(|| {
            MapError::configuration(format!(
                "{ACCESS_TOKEN_VAR} was not set when the app was built"
            ))
        })
    }
}
