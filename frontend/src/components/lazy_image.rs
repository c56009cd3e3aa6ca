use web_sys::Element;
use yew::prelude::*;

use super::observer;

#[derive(Properties, PartialEq)]
pub struct LazyImageProps {
    pub src: AttrValue,
    #[prop_or_default]
    pub alt: AttrValue,
    /// Small image shown blurred until the real one has loaded.
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
    #[prop_or_default]
    pub width: Option<u32>,
    #[prop_or_default]
    pub height: Option<u32>,
    #[prop_or_default]
    pub src_set: Option<AttrValue>,
    #[prop_or_default]
    pub sizes: Option<AttrValue>,
    #[prop_or(AttrValue::from("cover"))]
    pub object_fit: AttrValue,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub img_class: Classes,
    /// Extra inline style for the wrapper, applied after the sizing rules.
    #[prop_or_default]
    pub style: Option<AttrValue>,
    /// Fired once the full image has loaded.
    #[prop_or_default]
    pub on_load: Callback<Event>,
    /// Skip the observer and load right away.
    #[prop_or_default]
    pub eager: bool,
    #[prop_or(AttrValue::from("300px"))]
    pub root_margin: AttrValue,
}

fn wrapper_style(width: Option<u32>, height: Option<u32>, extra: Option<&str>) -> String {
    let mut style = "position: relative; overflow: hidden;".to_string();
    if let (Some(w), Some(h)) = (width, height) {
        if w > 0 && h > 0 {
            style.push_str(&format!(" aspect-ratio: {} / {};", w, h));
        }
    }
    if let Some(extra) = extra.map(str::trim).filter(|s| !s.is_empty()) {
        style.push(' ');
        style.push_str(extra);
    }
    style
}

#[function_component(LazyImage)]
pub fn lazy_image(props: &LazyImageProps) -> Html {
    let container = use_node_ref();
    let in_view = use_state(|| props.eager);
    let loaded = use_state(|| false);

    {
        let container = container.clone();
        let in_view_handle = in_view.clone();
        let root_margin = props.root_margin.clone();
        use_effect_with_deps(
            move |(eager, visible)| {
                let mut handle = None;
                if !*eager && !*visible {
                    if let Some(element) = container.cast::<Element>() {
                        let setter = in_view_handle.clone();
                        handle = observer::observe(&element, &root_margin, 0.01, move |entry| {
                            if entry.is_intersecting() {
                                setter.set(true);
                            }
                        });
                        if handle.is_none() {
                            in_view_handle.set(true);
                        }
                    }
                }
                move || drop(handle)
            },
            (props.eager, *in_view),
        );
    }

    // a new source starts over from the placeholder
    {
        let loaded = loaded.clone();
        use_effect_with_deps(
            move |_| {
                loaded.set(false);
                || ()
            },
            props.src.clone(),
        );
    }

    let onload = {
        let loaded = loaded.clone();
        let on_load = props.on_load.clone();
        Callback::from(move |e: Event| {
            loaded.set(true);
            on_load.emit(e);
        })
    };

    let img_style = format!(
        "position: absolute; inset: 0; width: 100%; height: 100%; object-fit: {}; transition: opacity 350ms ease; opacity: {};",
        props.object_fit,
        if *loaded { 1 } else { 0 }
    );

    html! {
        <div ref={container} class={classes!("lazy-wrap", props.class.clone())}
             style={wrapper_style(props.width, props.height, props.style.as_deref())}>
            {
                if let Some(placeholder) = props.placeholder.clone().filter(|_| !*loaded) {
                    html! {
                        <img class={classes!("lazy-img", "lazy-img--blur", props.img_class.clone())}
                             src={placeholder} alt="" aria-hidden="true"
                             decoding="async" loading="eager"
                             style={format!(
                                 "position: absolute; inset: 0; width: 100%; height: 100%; object-fit: {}; filter: blur(12px); transform: scale(1.05);",
                                 props.object_fit
                             )} />
                    }
                } else {
                    html! {}
                }
            }
            {
                if *in_view {
                    html! {
                        <img class={classes!("lazy-img", props.img_class.clone(), (*loaded).then_some("lazy-img--loaded"))}
                             src={props.src.clone()}
                             srcset={props.src_set.clone()}
                             sizes={props.sizes.clone()}
                             alt={props.alt.clone()}
                             width={props.width.map(|w| w.to_string())}
                             height={props.height.map(|h| h.to_string())}
                             loading={if props.eager { "eager" } else { "lazy" }}
                             decoding="async"
                             style={img_style}
                             {onload} />
                    }
                } else {
                    html! {}
                }
            }
            <noscript>
                <img class={classes!("lazy-img", "noscript", props.img_class.clone())}
                     src={props.src.clone()}
                     alt={props.alt.clone()}
                     width={props.width.map(|w| w.to_string())}
                     height={props.height.map(|h| h.to_string())}
                     style={format!("width: 100%; height: 100%; object-fit: {};", props.object_fit)} />
            </noscript>
        </div>
    }
}
