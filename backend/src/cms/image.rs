//! Contentful Images API URL helpers. One uploaded asset is turned into the
//! thumbnail, tile and full-size variants the page needs.

use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    Fill,
    Scale,
    Thumb,
    Pad,
    Crop,
}

impl Fit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Fit::Fill => "fill",
            Fit::Scale => "scale",
            Fit::Thumb => "thumb",
            Fit::Pad => "pad",
            Fit::Crop => "crop",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Jpg,
    Png,
    Webp,
    Avif,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Jpg => "jpg",
            Format::Png => "png",
            Format::Webp => "webp",
            Format::Avif => "avif",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageOptions {
    pub w: Option<u32>,
    pub h: Option<u32>,
    /// Quality, 1-100.
    pub q: Option<u8>,
    pub fit: Option<Fit>,
    pub fm: Option<Format>,
    pub bg: Option<String>,
}

impl ImageOptions {
    pub fn sized(w: u32, q: u8, fm: Format) -> Self {
        Self {
            w: Some(w),
            q: Some(q),
            fm: Some(fm),
            ..Default::default()
        }
    }
}

pub const DEFAULT_SRCSET_WIDTHS: [u32; 5] = [320, 480, 768, 1024, 1440];

/// Promotes protocol-relative asset URLs (`//images.ctfassets.net/...`) to https.
pub fn absolute_url(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{}", url)
    } else {
        url.to_string()
    }
}

/// Builds a transformed image URL. Every option that is set replaces the query
/// parameter of the same name; other parameters are left untouched.
pub fn img_url(url: &str, opts: &ImageOptions) -> Result<String, url::ParseError> {
    let mut parsed = Url::parse(&absolute_url(url))?;

    let mut overrides: Vec<(&str, String)> = Vec::new();
    if let Some(w) = opts.w.filter(|w| *w > 0) {
        overrides.push(("w", w.to_string()));
    }
    if let Some(h) = opts.h.filter(|h| *h > 0) {
        overrides.push(("h", h.to_string()));
    }
    if let Some(q) = opts.q.filter(|q| *q > 0) {
        overrides.push(("q", q.min(100).to_string()));
    }
    if let Some(fit) = opts.fit {
        overrides.push(("fit", fit.as_str().to_string()));
    }
    if let Some(fm) = opts.fm {
        overrides.push(("fm", fm.as_str().to_string()));
    }
    if let Some(bg) = opts.bg.as_deref().filter(|bg| !bg.is_empty()) {
        overrides.push(("bg", bg.to_string()));
    }

    if overrides.is_empty() {
        return Ok(parsed.to_string());
    }

    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| !overrides.iter().any(|(name, _)| *name == key.as_ref()))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    {
        let mut query = parsed.query_pairs_mut();
        query.clear();
        for (k, v) in &kept {
            query.append_pair(k, v);
        }
        for (k, v) in &overrides {
            query.append_pair(k, v);
        }
    }

    Ok(parsed.to_string())
}

/// Very small placeholder for blur-up.
pub fn thumb_url(url: &str) -> Result<String, url::ParseError> {
    img_url(url, &ImageOptions::sized(40, 20, Format::Jpg))
}

/// Default gallery tile.
pub fn tile_url(url: &str) -> Result<String, url::ParseError> {
    img_url(url, &ImageOptions::sized(600, 70, Format::Webp))
}

/// Large image for the slider.
pub fn full_url(url: &str) -> Result<String, url::ParseError> {
    img_url(url, &ImageOptions::sized(1600, 80, Format::Webp))
}

/// Responsive `srcset` value, one webp candidate per width.
pub fn src_set(url: &str, widths: &[u32]) -> Result<String, url::ParseError> {
    let candidates = widths
        .iter()
        .map(|w| img_url(url, &ImageOptions::sized(*w, 70, Format::Webp)).map(|u| format!("{} {}w", u, w)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(candidates.join(", "))
}
