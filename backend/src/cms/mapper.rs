//! Flattens a resolved `page` entry into the hero display record.

use serde_json::Value;

use crate::cms::image::{full_url, src_set, thumb_url, tile_url, DEFAULT_SRCSET_WIDTHS};
use crate::cms::types::{
    asset_url, content_type, content_type_of, int_field, link_field, link_list_field,
    str_field, str_list_field, HeroSection, ServiceBox,
};

/// Maps a page to its hero. `None` when the page has no resolved hero entry.
pub fn map_hero(page: &Value) -> Option<HeroSection> {
    let hero = link_field(page, "hero")?;
    if content_type_of(hero).is_some_and(|t| t != content_type::HERO_SECTION) {
        tracing::warn!("Page hero links to a {:?} entry, ignoring", content_type_of(hero));
        return None;
    }

    let background_image = link_field(hero, "backgroundImage")
        .and_then(asset_url)
        .and_then(|base| tile_url(&base).ok());

    Some(HeroSection {
        main_title: str_list_field(hero, "mainTitle"),
        typed_texts: str_list_field(hero, "typedTexts"),
        description: str_field(hero, "description"),
        cta_text: str_field(hero, "ctaText"),
        cta_link: str_field(hero, "ctaLink"),
        background_image,
        service_boxes: map_service_boxes(hero),
    })
}

/// Boxes sorted by their `index` field. Boxes without an image, integer
/// `id`/`index` or a title are dropped.
pub fn map_service_boxes(hero: &Value) -> Vec<ServiceBox> {
    let mut boxes: Vec<ServiceBox> = link_list_field(hero, "serviceBoxes")
        .unwrap_or_default()
        .into_iter()
        .filter_map(map_service_box)
        .collect();
    boxes.sort_by_key(|b| b.index);
    boxes
}

fn map_service_box(entry: &Value) -> Option<ServiceBox> {
    let base = link_field(entry, "image").and_then(asset_url)?;
    let image = tile_url(&base).ok()?;

    let (Some(id), Some(index), Some(title)) = (
        int_field(entry, "id"),
        int_field(entry, "index"),
        str_field(entry, "title"),
    ) else {
        tracing::debug!("Skipping service box with missing id/index/title");
        return None;
    };

    Some(ServiceBox {
        id,
        index,
        title,
        description: str_field(entry, "description").unwrap_or_default(),
        image,
        image_small: thumb_url(&base).ok(),
        full_image: full_url(&base).ok(),
        src_set: src_set(&base, &DEFAULT_SRCSET_WIDTHS).ok(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn asset(url: &str) -> Value {
        json!({"sys": {"type": "Asset", "id": url}, "fields": {"file": {"url": url}}})
    }

    fn service_box(id: i64, index: i64, title: &str, image: Option<&str>) -> Value {
        let mut fields = json!({"id": id, "index": index, "title": title});
        if let Some(url) = image {
            fields["image"] = asset(url);
        }
        json!({"sys": {"contentType": {"sys": {"id": "serviceBox"}}}, "fields": fields})
    }

    fn page(hero_fields: Value) -> Value {
        json!({
            "fields": {
                "title": "Home",
                "slug": "home",
                "hero": {
                    "sys": {"contentType": {"sys": {"id": "heroSection"}}},
                    "fields": hero_fields
                }
            }
        })
    }

    #[test]
    fn maps_full_hero() {
        let page = page(json!({
            "mainTitle": ["we", "make"],
            "typedTexts": ["gardens", "patios"],
            "description": "Landscaping",
            "ctaText": "Book",
            "ctaLink": "#contact",
            "backgroundImage": asset("//images.ctfassets.net/bg.jpg"),
            "serviceBoxes": [
                service_box(2, 1, "Lawns", Some("//images.ctfassets.net/lawn.jpg")),
                service_box(1, 0, "Trees", Some("//images.ctfassets.net/tree.jpg"))
            ]
        }));

        let hero = map_hero(&page).unwrap();
        assert_eq!(hero.main_title, Some(vec!["we".to_string(), "make".to_string()]));
        assert_eq!(hero.typed_texts.as_ref().map(Vec::len), Some(2));
        assert_eq!(hero.description.as_deref(), Some("Landscaping"));
        assert_eq!(hero.cta_text.as_deref(), Some("Book"));
        assert_eq!(hero.cta_link.as_deref(), Some("#contact"));
        assert_eq!(
            hero.background_image.as_deref(),
            Some("https://images.ctfassets.net/bg.jpg?w=600&q=70&fm=webp")
        );

        let titles: Vec<&str> = hero.service_boxes.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Trees", "Lawns"]);

        let trees = &hero.service_boxes[0];
        assert_eq!(trees.id, 1);
        assert_eq!(trees.description, "");
        assert_eq!(
            trees.image,
            "https://images.ctfassets.net/tree.jpg?w=600&q=70&fm=webp"
        );
        assert_eq!(
            trees.image_small.as_deref(),
            Some("https://images.ctfassets.net/tree.jpg?w=40&q=20&fm=jpg")
        );
        assert_eq!(
            trees.full_image.as_deref(),
            Some("https://images.ctfassets.net/tree.jpg?w=1600&q=80&fm=webp")
        );
        assert!(trees.src_set.as_deref().unwrap().ends_with(" 1440w"));
    }

    #[test]
    fn page_without_hero_maps_to_none() {
        assert!(map_hero(&json!({"fields": {"slug": "home"}})).is_none());
        let unresolved = json!({"fields": {"hero": {"sys": {"type": "Link", "linkType": "Entry", "id": "x"}}}});
        assert!(map_hero(&unresolved).is_none());
    }

    #[test]
    fn hero_of_wrong_type_is_ignored() {
        let page = json!({"fields": {"hero": {
            "sys": {"contentType": {"sys": {"id": "blogPost"}}},
            "fields": {"ctaText": "x"}
        }}});
        assert!(map_hero(&page).is_none());
    }

    #[test]
    fn malformed_fields_degrade_to_none() {
        let hero = map_hero(&page(json!({
            "mainTitle": "we make",
            "typedTexts": [],
            "description": {"nodeType": "document"},
            "ctaText": 12,
            "backgroundImage": {"sys": {"type": "Link", "linkType": "Asset", "id": "bg"}}
        })))
        .unwrap();
        assert_eq!(hero, HeroSection::default());
    }

    #[test]
    fn boxes_without_image_or_identity_are_dropped() {
        let mut untitled = service_box(4, 3, "x", Some("//images.ctfassets.net/d.jpg"));
        untitled["fields"]
            .as_object_mut()
            .unwrap()
            .remove("title");
        let mut string_index = service_box(5, 0, "Bad", Some("//images.ctfassets.net/e.jpg"));
        string_index["fields"]["index"] = json!("0");

        let hero = map_hero(&page(json!({
            "serviceBoxes": [
                service_box(1, 2, "Kept", Some("//images.ctfassets.net/a.jpg")),
                service_box(2, 0, "No image", None),
                untitled,
                string_index,
                {"sys": {"type": "Link", "linkType": "Entry", "id": "missing"}}
            ]
        })))
        .unwrap();
        assert_eq!(hero.service_boxes.len(), 1);
        assert_eq!(hero.service_boxes[0].title, "Kept");
    }

    #[test]
    fn sort_is_stable_for_equal_indexes() {
        let hero = map_hero(&page(json!({
            "serviceBoxes": [
                service_box(1, 1, "First", Some("//images.ctfassets.net/a.jpg")),
                service_box(2, 0, "Zero", Some("//images.ctfassets.net/b.jpg")),
                service_box(3, 1, "Second", Some("//images.ctfassets.net/c.jpg"))
            ]
        })))
        .unwrap();
        let ids: Vec<i64> = hero.service_boxes.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }
}
