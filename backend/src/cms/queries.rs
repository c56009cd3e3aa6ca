use crate::cms::client::{CmsError, ContentfulClient, EntryQuery};
use crate::cms::mapper::map_hero;
use crate::cms::types::{content_type, HeroSection};

pub const DEFAULT_SLUG: &str = "home";

/// Fetches the page with the given slug, expanding hero, boxes and assets, and
/// maps it to the hero record. `Ok(None)` when nothing usable matched.
pub async fn fetch_home_hero(
    client: &ContentfulClient,
    slug: &str,
) -> Result<Option<HeroSection>, CmsError> {
    let query = EntryQuery::content_type(content_type::PAGE)
        .field("slug", slug)
        .include(2)
        .limit(1);

    let items = client.get_entries(&query).await?;
    let Some(page) = items.first() else {
        tracing::info!("No page found for slug {}", slug);
        return Ok(None);
    };

    let hero = map_hero(page);
    match &hero {
        Some(hero) => tracing::debug!(
            "Mapped hero for {}: {} service boxes",
            slug,
            hero.service_boxes.len()
        ),
        None => tracing::info!("Page {} has no usable hero section", slug),
    }
    Ok(hero)
}
