use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::content::ServiceBox;

#[derive(Properties, PartialEq)]
pub struct SliderModalProps {
    pub boxes: Vec<ServiceBox>,
    pub open: bool,
    pub index: usize,
    pub on_close: Callback<()>,
    pub on_change: Callback<usize>,
}

pub fn next_index(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (index + 1) % len
    }
}

pub fn prev_index(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (index + len - 1) % len
    }
}

#[function_component(SliderModal)]
pub fn slider_modal(props: &SliderModalProps) -> Html {
    let len = props.boxes.len();
    let index = if len == 0 { 0 } else { props.index % len };

    // keyboard: Escape closes, arrows step
    {
        let on_close = props.on_close.clone();
        let on_change = props.on_change.clone();
        use_effect_with_deps(
            move |(open, index, len)| {
                let (open, index, len) = (*open, *index, *len);
                let destructor: Box<dyn FnOnce()> = match web_sys::window() {
                    Some(window) if open => {
                        let callback = Closure::<dyn Fn(KeyboardEvent)>::new(move |e: KeyboardEvent| {
                            match e.key().as_str() {
                                "Escape" => on_close.emit(()),
                                "ArrowRight" => on_change.emit(next_index(index, len)),
                                "ArrowLeft" => on_change.emit(prev_index(index, len)),
                                _ => {}
                            }
                        });
                        if let Err(e) = window
                            .add_event_listener_with_callback("keydown", callback.as_ref().unchecked_ref())
                        {
                            log::warn!("Could not listen for keys: {:?}", e);
                        }
                        Box::new(move || {
                            let _ = window.remove_event_listener_with_callback(
                                "keydown",
                                callback.as_ref().unchecked_ref(),
                            );
                        })
                    }
                    _ => Box::new(|| ()),
                };
                move || destructor()
            },
            (props.open, index, len),
        );
    }

    if !props.open || len == 0 {
        return html! {};
    }

    let current = &props.boxes[index];
    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let previous = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_change.emit(prev_index(index, len));
        })
    };
    let next = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_change.emit(next_index(index, len));
        })
    };
    let keep_open = Callback::from(|e: MouseEvent| e.stop_propagation());

    html! {
        <div class="slider-modal" role="dialog" aria-modal="true" onclick={close.clone()}>
            <div class="slider-modal-content" onclick={keep_open}>
                <button class="slider-close" aria-label="Close" onclick={close}>{"×"}</button>
                <button class="slider-prev" aria-label="Previous" onclick={previous}>{"‹"}</button>
                <figure class="slider-slide">
                    <img src={current.slide_image().to_string()} alt={current.title.clone()} />
                    <figcaption>
                        <h3>{&current.title}</h3>
                        {
                            if current.description.is_empty() {
                                html! {}
                            } else {
                                html! { <p>{&current.description}</p> }
                            }
                        }
                    </figcaption>
                </figure>
                <button class="slider-next" aria-label="Next" onclick={next}>{"›"}</button>
                <div class="slider-counter">{format!("{} / {}", index + 1, len)}</div>
            </div>
        </div>
    }
}
