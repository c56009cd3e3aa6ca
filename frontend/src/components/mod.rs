pub mod hero_section;
pub mod lazy_image;
pub mod observer;
pub mod slider_modal;
