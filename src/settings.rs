use chrono_tz::Tz;
use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub max_connections: u32,
    pub debug: bool,
    pub enable_swagger: bool,
    pub port: u16,
    pub admin_password: String,
    pub auth_token: Option<String>,
    pub site_title: String,
    pub instagram_url: Option<Url>,
    pub telegram_url: Option<Url>,
    pub location: Option<String>,
    pub timezone: String,
    pub seed_demo_data: bool,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let config = Config::builder()
            // APP_DATABASE_URL -> database_url; "__" separates nested keys
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("database_url", "sqlite://yoga.db")?
            .set_default("max_connections", 5)?
            .set_default("debug", false)?
            .set_default("enable_swagger", true)?
            .set_default("port", 8080)?
            .set_default("admin_password", "tim123yoga")?
            .set_default("site_title", "Tim's Yoga")?
            .set_default("timezone", "UTC")?
            .set_default("seed_demo_data", false)?
            .build()?;

        let mut settings: Settings = config.try_deserialize()?;
        // APP_AUTH_TOKEN="" leaves the admin API open
        settings.auth_token = settings.auth_token.filter(|token| !token.trim().is_empty());
        settings.timezone.parse::<Tz>().map_err(|_| {
            ConfigError::Message(format!("unknown timezone '{}'", settings.timezone))
        })?;
        Ok(settings)
    }

    /// Studio timezone; validated in [`Settings::from_env`].
    pub fn tz(&self) -> Tz {
        self.timezone.parse().unwrap_or(Tz::UTC)
    }
}
