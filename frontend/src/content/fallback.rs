use crate::config::public_asset;
use crate::content::{HeroProps, ServiceBox};

fn bundled_box(id: i64, title: &str, description: &str, image: &str) -> ServiceBox {
    let url = public_asset(image);
    ServiceBox {
        id,
        index: id - 1,
        title: title.to_string(),
        description: description.to_string(),
        image: url.clone(),
        image_small: None,
        full_image: Some(url),
        src_set: None,
    }
}

/// Copy shipped with the bundle, shown whenever the content service has nothing.
pub fn default_hero() -> HeroProps {
    HeroProps {
        main_title: vec!["we".to_string(), "make".to_string()],
        typed_texts: vec![
            "eco-friendly outdoors".to_string(),
            "self-sustaining gardens".to_string(),
            "relaxing spaces".to_string(),
            "beautiful landscapes".to_string(),
        ],
        description: Some(
            "Landscape design, planting and care for homes that want to live outdoors."
                .to_string(),
        ),
        cta_text: "Get a Free Site Visit".to_string(),
        cta_link: "#contact".to_string(),
        background_image: None,
        service_boxes: vec![
            bundled_box(1, "Garden Design & Planning", "Transform your outdoor space with expert design", "images/l3.jpg"),
            bundled_box(2, "Professional Lawn Care", "Maintain a lush, healthy lawn year-round", "images/l1.jpg"),
            bundled_box(3, "Hardscaping Solutions", "Patios, walkways, and retaining walls", "images/l4.jpg"),
            bundled_box(4, "Tree & Plant Care", "Expert pruning and plant health services", "images/hero.jpg"),
            bundled_box(5, "Irrigation Systems", "Efficient watering solutions for your landscape", "images/5.jpg"),
            bundled_box(6, "Seasonal Maintenance", "Year-round care for your outdoor spaces", "images/6.jpg"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_complete_and_ordered() {
        let hero = default_hero();
        assert!(!hero.main_title.is_empty());
        assert_eq!(hero.typed_texts.len(), 4);
        assert!(hero
            .service_boxes
            .windows(2)
            .all(|pair| pair[0].index < pair[1].index));
        assert!(hero.service_boxes[0].image.ends_with("/images/l3.jpg"));
    }
}
