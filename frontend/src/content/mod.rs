use serde::Deserialize;

pub mod fallback;

/// Hero content as served by `/api/home`. Everything is optional: whatever is
/// missing falls back to the bundled copy.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroContent {
    #[serde(default)]
    pub main_title: Option<Vec<String>>,
    #[serde(default)]
    pub typed_texts: Option<Vec<String>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cta_text: Option<String>,
    #[serde(default)]
    pub cta_link: Option<String>,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default)]
    pub service_boxes: Option<Vec<ServiceBox>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceBox {
    pub id: i64,
    pub index: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub image_small: Option<String>,
    #[serde(default)]
    pub full_image: Option<String>,
    #[serde(default)]
    pub src_set: Option<String>,
}

impl ServiceBox {
    /// Largest image available for the slider.
    pub fn slide_image(&self) -> &str {
        self.full_image.as_deref().unwrap_or(&self.image)
    }
}

/// Fully populated hero, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct HeroProps {
    pub main_title: Vec<String>,
    pub typed_texts: Vec<String>,
    pub description: Option<String>,
    pub cta_text: String,
    pub cta_link: String,
    pub background_image: Option<String>,
    pub service_boxes: Vec<ServiceBox>,
}

fn non_empty_list<T: Clone>(list: &Option<Vec<T>>) -> Option<Vec<T>> {
    list.as_ref().filter(|l| !l.is_empty()).cloned()
}

fn non_blank(text: &Option<String>) -> Option<String> {
    text.as_ref().filter(|t| !t.trim().is_empty()).cloned()
}

impl HeroProps {
    /// Field-by-field merge of remote content over the bundled fallback.
    /// Empty lists and blank strings count as missing.
    pub fn resolve(remote: Option<&HeroContent>) -> Self {
        let fallback = fallback::default_hero();
        let Some(remote) = remote else {
            return fallback;
        };

        Self {
            main_title: non_empty_list(&remote.main_title).unwrap_or(fallback.main_title),
            typed_texts: non_empty_list(&remote.typed_texts).unwrap_or(fallback.typed_texts),
            description: non_blank(&remote.description).or(fallback.description),
            cta_text: non_blank(&remote.cta_text).unwrap_or(fallback.cta_text),
            cta_link: non_blank(&remote.cta_link).unwrap_or(fallback.cta_link),
            background_image: non_blank(&remote.background_image).or(fallback.background_image),
            service_boxes: non_empty_list(&remote.service_boxes).unwrap_or(fallback.service_boxes),
        }
    }
}
