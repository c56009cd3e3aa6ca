/// Backend origin prefixed to every API path. Empty means same origin, which is
/// how the backend serves the compiled app in production.
pub fn get_backend_url() -> &'static str {
    option_env!("BACKEND_URL").unwrap_or("")
}

/// Path prefix the site is served under, for bundled fallback assets.
pub fn get_public_url() -> &'static str {
    option_env!("PUBLIC_URL").unwrap_or("/")
}

/// Joins a bundled asset path onto the public prefix.
pub fn public_asset(path: &str) -> String {
    format!(
        "{}/{}",
        get_public_url().trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
