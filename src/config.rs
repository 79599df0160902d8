use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::{
    cache::CachePolicy,
    engine::{EngineOptions, DEFAULT_MAX_SAMPLES},
    error::{config_error, Error},
    external::{google_maps::DEFAULT_API_BASE, GoogleMapsConfig},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Platform {
    #[default]
    Ios,
    Android,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::Android => "android",
        }
    }

    fn key_var(&self) -> &'static str {
        match self {
            Self::Ios => "GOOGLE_MAPS_IOS_API_KEY",
            Self::Android => "GOOGLE_MAPS_ANDROID_API_KEY",
        }
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ios" => Ok(Self::Ios),
            "android" => Ok(Self::Android),
            _ => Err(config_error("ROADSIDE_PLATFORM", s)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub platform: Platform,
    pub api_base: String,
    pub api_key: String,
    pub listen_addr: SocketAddr,
    pub request_timeout: Duration,
    pub max_samples: usize,
    pub cache_ttl: Option<Duration>,
    pub cache_max_entries: Option<usize>,
    pub debounce_wait: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            api_base: DEFAULT_API_BASE.into(),
            api_key: String::new(),
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            request_timeout: Duration::from_secs(10),
            max_samples: DEFAULT_MAX_SAMPLES,
            cache_ttl: None,
            cache_max_entries: None,
            debounce_wait: Duration::from_millis(500),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from any variable source; unset variables keep their
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let platform = match lookup("ROADSIDE_PLATFORM") {
            Some(value) => value.parse()?,
            None => defaults.platform,
        };

        let api_key = lookup(platform.key_var()).unwrap_or_default();
        if api_key.is_empty() {
            tracing::warn!("{} is not set", platform.key_var());
        }

        Ok(Self {
            platform,
            api_base: lookup("GOOGLE_MAPS_API_BASE").unwrap_or(defaults.api_base),
            api_key,
            listen_addr: parse_or(&lookup, "ROADSIDE_LISTEN_ADDR", defaults.listen_addr)?,
            request_timeout: Duration::from_secs(parse_or(
                &lookup,
                "ROADSIDE_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )?),
            max_samples: parse_or(&lookup, "ROADSIDE_MAX_SAMPLES", defaults.max_samples)?,
            cache_ttl: parse_optional::<u64, _>(&lookup, "ROADSIDE_CACHE_TTL_SECS")?
                .map(Duration::from_secs),
            cache_max_entries: parse_optional(&lookup, "ROADSIDE_CACHE_MAX_ENTRIES")?,
            debounce_wait: Duration::from_millis(parse_or(
                &lookup,
                "ROADSIDE_DEBOUNCE_MS",
                defaults.debounce_wait.as_millis() as u64,
            )?),
        })
    }

    pub fn google_maps(&self) -> GoogleMapsConfig {
        GoogleMapsConfig {
            api_base: self.api_base.clone(),
            api_key: self.api_key.clone(),
            timeout: self.request_timeout,
        }
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            max_samples: self.max_samples,
            cache_policy: CachePolicy {
                ttl: self
                    .cache_ttl
                    .and_then(|ttl| chrono::Duration::from_std(ttl).ok()),
                max_entries: self.cache_max_entries,
            },
        }
    }
}

fn parse_or<T, F>(lookup: &F, name: &str, default: T) -> Result<T, Error>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    Ok(parse_optional(lookup, name)?.unwrap_or(default))
}

fn parse_optional<T, F>(lookup: &F, name: &str) -> Result<Option<T>, Error>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| config_error(name, &value)),
        None => Ok(None),
    }
}
