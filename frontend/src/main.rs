use yew::prelude::*;
use yew_router::prelude::*;

mod animation;
mod components;
mod config;
mod content;
mod pages;
mod utils;

use pages::home::Home;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home | Route::NotFound => html! { <Home /> },
    }
}

#[function_component(App)]
fn app() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    log::info!("Starting frontend, backend at '{}'", config::get_backend_url());
    yew::Renderer::<App>::new().render();
}
