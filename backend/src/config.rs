use thiserror::Error;

pub const DELIVERY_HOST: &str = "cdn.contentful.com";
pub const PREVIEW_HOST: &str = "preview.contentful.com";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct ContentfulConfig {
    pub space_id: String,
    pub environment_id: String,
    pub access_token: String,
    /// Scheme + host, without a trailing slash.
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub contentful: ContentfulConfig,
    pub port: u16,
    pub frontend_url: String,
    pub static_dir: String,
}

impl Config {
    /// Reads every setting from the process environment. Call `dotenvy::dotenv()` first.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let space_id = required("CONTENTFUL_SPACE_ID")?;
        let environment_id = required("CONTENTFUL_ENVIRONMENT_ID")?;
        let access_token = required("CONTENTFUL_CDA_TOKEN")?;

        let preview = matches!(
            lookup("CONTENTFUL_PREVIEW").as_deref(),
            Some("true") | Some("1")
        );
        let base_url = match lookup("CONTENTFUL_BASE_URL") {
            Some(url) => url.trim_end_matches('/').to_string(),
            None if preview => format!("https://{}", PREVIEW_HOST),
            None => format!("https://{}", DELIVERY_HOST),
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw,
            })?,
            None => 3000,
        };

        Ok(Self {
            contentful: ContentfulConfig {
                space_id,
                environment_id,
                access_token,
                base_url,
            },
            port,
            frontend_url: lookup("FRONTEND_URL")
                .unwrap_or_else(|| "http://localhost:8080".to_string()),
            static_dir: lookup("STATIC_DIR").unwrap_or_else(|| "../frontend/dist".to_string()),
        })
    }
}
