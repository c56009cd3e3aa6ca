use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::hero_section::HeroSection;
use crate::content::{HeroContent, HeroProps};
use crate::utils::api;

pub const HOME_SLUG: &str = "home";

#[derive(Clone, PartialEq)]
enum Load {
    Pending,
    Ready(Option<HeroContent>),
    Failed(String),
}

#[function_component(Home)]
pub fn home() -> Html {
    let load = use_state(|| Load::Pending);

    {
        let load = load.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    log::info!("Fetching home page content");
                    match api::fetch_home_hero(HOME_SLUG).await {
                        Ok(Some(content)) => load.set(Load::Ready(Some(content))),
                        Ok(None) => {
                            log::info!("No remote content for '{}', using bundled copy", HOME_SLUG);
                            load.set(Load::Ready(None));
                        }
                        Err(e) => {
                            log::error!("Failed to load home content: {}", e);
                            load.set(Load::Failed(e.to_string()));
                        }
                    }
                });
                || ()
            },
            (),
        );
    }

    let (remote, error) = match &*load {
        Load::Pending => {
            return html! {
                <div class="preloader" role="status" aria-live="polite"
                     style="min-height: 100vh; display: flex; align-items: center; justify-content: center; color: #5b7c4f;">
                    {"Loading..."}
                </div>
            };
        }
        Load::Ready(content) => (content.as_ref(), None),
        Load::Failed(message) => (None, Some(message.clone())),
    };

    html! {
        <main>
            {
                if let Some(message) = error {
                    html! {
                        <div class="content-error" role="alert"
                             style="padding: 0.75rem 1.5rem; background: #fdecea; color: #8a1c12; text-align: center;">
                            {format!("Showing default content: {}", message)}
                        </div>
                    }
                } else {
                    html! {}
                }
            }
            <HeroSection hero={HeroProps::resolve(remote)} />
        </main>
    }
}
