use gloo_net::http::{Request, Response};
use gloo_net::Error as GlooError;
use thiserror::Error;
use web_sys::RequestCredentials;

use crate::config;
use crate::content::HeroContent;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Could not reach the server: {0}")]
    Network(String),
    #[error("Server returned {0}")]
    Status(u16),
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl From<GlooError> for FetchError {
    fn from(e: GlooError) -> Self {
        match e {
            GlooError::SerdeError(e) => FetchError::Decode(e.to_string()),
            other => FetchError::Network(other.to_string()),
        }
    }
}

/// Thin client for the site's own backend.
pub struct Api;

/// Request wrapper that prefixes the backend URL and logs failures.
pub struct RequestWrapper {
    request: Request,
    path: String,
}

impl RequestWrapper {
    fn new(path: &str) -> Self {
        let full_url = format!("{}{}", config::get_backend_url(), path);
        let request = Request::get(&full_url).credentials(RequestCredentials::SameOrigin);
        Self {
            request,
            path: path.to_string(),
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.request = self.request.header(name, value);
        self
    }

    pub async fn send(self) -> Result<Response, GlooError> {
        match self.request.send().await {
            Ok(response) => {
                if !response.ok() {
                    log::warn!("GET {} returned {}", self.path, response.status());
                }
                Ok(response)
            }
            Err(e) => {
                log::error!("GET {} failed: {}", self.path, e);
                Err(e)
            }
        }
    }
}

impl Api {
    pub fn get(path: &str) -> RequestWrapper {
        RequestWrapper::new(path)
    }
}

pub fn home_path(slug: &str) -> String {
    format!("/api/home?slug={}", js_sys::encode_uri_component(slug))
}

/// Loads the hero for a page. `Ok(None)` when the backend has no content for it.
pub async fn fetch_home_hero(slug: &str) -> Result<Option<HeroContent>, FetchError> {
    let response = Api::get(&home_path(slug))
        .header("Accept", "application/json")
        .send()
        .await?;

    match response.status() {
        404 => Ok(None),
        status if !response.ok() => Err(FetchError::Status(status)),
        _ => Ok(Some(response.json::<HeroContent>().await?)),
    }
}
