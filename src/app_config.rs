use crate::utm::{EllipsoidName, NumberFormat, UtmConverter};
use config::{Config, ConfigError};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    core: Core,
    #[serde(default)]
    utm: Utm,
    location: Location,
    places: Places,
    backend: Option<Backend>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(config::File::with_name("config").required(true))
            .add_source(config::File::with_name("config_local").required(false))
            .add_source(config::Environment::with_prefix("GRIDFIX").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn core(&self) -> &Core {
        &self.core
    }

    pub fn utm(&self) -> &Utm {
        &self.utm
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn places(&self) -> &Places {
        &self.places
    }

    pub fn backend(&self) -> Option<&Backend> {
        self.backend.as_ref()
    }
}

#[derive(Debug, Deserialize)]
pub struct Core {
    buffer_size: usize,
}

impl Core {
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Utm {
    #[serde(default)]
    ellipsoid: EllipsoidName,
    #[serde(default)]
    grouping_separator: Option<char>,
}

impl Utm {
    pub fn converter(&self) -> UtmConverter {
        let number_format = NumberFormat {
            grouping_separator: self.grouping_separator,
        };
        UtmConverter::new(self.ellipsoid.into(), number_format)
    }
}

#[derive(Debug, Deserialize)]
pub struct Location {
    fixes_file: String,
    #[serde(with = "humantime_serde")]
    interval: Duration,
}

impl Location {
    pub fn fixes_file(&self) -> &str {
        &self.fixes_file
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

#[derive(Debug, Deserialize)]
pub struct Places {
    file: String,
    #[serde(default)]
    bookmark_first_fix: bool,
}

impl Places {
    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn bookmark_first_fix(&self) -> bool {
        self.bookmark_first_fix
    }
}

#[derive(Debug, Deserialize)]
pub struct Backend {
    url: String,
    retry_ms: u64,
    retry_max_delay_ms: u64,
    max_attempts: usize,
}

impl Backend {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn retry_ms(&self) -> u64 {
        self.retry_ms
    }

    pub fn retry_max_delay_ms(&self) -> Duration {
        Duration::from_millis(self.retry_max_delay_ms)
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                core: Core { buffer_size: 8 },
                utm: Utm::default(),
                location: Location {
                    fixes_file: "fixes.jsonl".to_string(),
                    interval: Duration::from_millis(10),
                },
                places: Places {
                    file: "places.json".to_string(),
                    bookmark_first_fix: false,
                },
                backend: Some(Backend {
                    url: "https://backend.url".to_string(),
                    retry_ms: 10,
                    retry_max_delay_ms: 20,
                    max_attempts: 2,
                }),
            },
        }
    }

    pub fn backend_url(mut self, url: String) -> Self {
        if let Some(backend) = self.config.backend.as_mut() {
            backend.url = url;
        }
        self
    }

    pub fn grouping_separator(mut self, separator: char) -> Self {
        self.config.utm.grouping_separator = Some(separator);
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}
