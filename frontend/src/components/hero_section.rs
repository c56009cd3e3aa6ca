use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlImageElement, ScrollRestoration};
use yew::prelude::*;

use super::lazy_image::LazyImage;
use super::observer;
use super::slider_modal::SliderModal;
use crate::animation::timing::{
    run_schedule, BRICK_FLIGHT_MS, CYCLE_INTERVAL_MS, CYCLE_IN_MS, CYCLE_LETTER_MS,
    CYCLE_LETTER_STAGGER_MS, CYCLE_OUT_MS, FALLBACK_MS, LETTER_MS, LETTER_STAGGER_MS,
    REENTRY_DELAY_MS, TITLE_STAGGER_MS, TITLE_WORD_MS,
};
use crate::animation::visibility::band_root_margin;
use crate::animation::wall::{BRICK_HEIGHT, BRICK_WIDTH};
use crate::animation::{
    brick_flights, classify_visibility, letters, SequenceAction, SequenceState, Side, Stage,
    Visibility, WallLayout,
};
use crate::content::HeroProps;

const BOX_SIZES: &str = "(max-width: 768px) 44vw, (max-width: 1200px) 28vw, 18vw";

#[derive(Properties, PartialEq)]
pub struct HeroSectionProps {
    pub hero: HeroProps,
}

fn measure_layout(heading: &NodeRef) -> WallLayout {
    match heading.cast::<Element>() {
        Some(element) => {
            let rect = element.get_bounding_client_rect();
            WallLayout::for_box(rect.width(), rect.height())
        }
        None => WallLayout::default(),
    }
}

/// (duration, stagger) of the tagline letters: the first line of a run comes
/// in slower than the ones that replace it.
fn letter_timing(cycled: bool) -> (u32, u32) {
    if cycled {
        (CYCLE_LETTER_MS, CYCLE_LETTER_STAGGER_MS)
    } else {
        (LETTER_MS, LETTER_STAGGER_MS)
    }
}

#[function_component(HeroSection)]
pub fn hero_section(props: &HeroSectionProps) -> Html {
    let hero = &props.hero;
    let heading = use_node_ref();
    let sequence = {
        let line_count = hero.typed_texts.len();
        use_reducer(move || SequenceState::new(WallLayout::default(), line_count))
    };
    let slide = use_state(|| None::<usize>);

    // Scroll to top only on initial mount
    {
        use_effect_with_deps(
            move |_| {
                if let Some(window) = web_sys::window() {
                    // otherwise the browser puts the old offset back after a reload
                    match window.history() {
                        Ok(history) => {
                            if let Err(e) = history.set_scroll_restoration(ScrollRestoration::Manual) {
                                log::debug!("Could not disable scroll restoration: {:?}", e);
                            }
                        }
                        Err(e) => log::debug!("No history object: {:?}", e),
                    }
                    window.scroll_to_with_x_and_y(0.0, 0.0);
                }
                || ()
            },
            (),
        );
    }

    // Warm the cache for the slider
    {
        use_effect_with_deps(
            move |boxes: &Vec<crate::content::ServiceBox>| {
                for service_box in boxes {
                    if let Some(full) = &service_box.full_image {
                        match HtmlImageElement::new() {
                            Ok(img) => img.set_src(full),
                            Err(e) => log::debug!("Could not preload {}: {:?}", full, e),
                        }
                    }
                }
                || ()
            },
            hero.service_boxes.clone(),
        );
    }

    // Keep the wall sized to the heading and the tagline count current
    {
        let sequence = sequence.clone();
        let heading = heading.clone();
        let line_count = hero.typed_texts.len();
        use_effect_with_deps(
            move |_| {
                let configure = {
                    let sequence = sequence.clone();
                    let heading = heading.clone();
                    move || {
                        sequence.dispatch(SequenceAction::Configure {
                            layout: measure_layout(&heading),
                            line_count,
                        });
                    }
                };
                configure();

                let destructor: Box<dyn FnOnce()> = match web_sys::window() {
                    Some(window) => {
                        let callback = Closure::<dyn Fn()>::new(configure);
                        if let Err(e) = window
                            .add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
                        {
                            log::warn!("Could not listen for resize: {:?}", e);
                        }
                        Box::new(move || {
                            let _ = window.remove_event_listener_with_callback(
                                "resize",
                                callback.as_ref().unchecked_ref(),
                            );
                        })
                    }
                    None => Box::new(|| ()),
                };
                move || destructor()
            },
            (hero.main_title.clone(), line_count),
        );
    }

    // Watch the heading against the active band
    {
        let sequence = sequence.clone();
        let heading = heading.clone();
        use_effect_with_deps(
            move |_| {
                let side = Rc::new(RefCell::new(Side::default()));
                let handle = heading.cast::<Element>().and_then(|element| {
                    let sequence = sequence.clone();
                    observer::observe(&element, &band_root_margin(), 0.0, move |entry| {
                        let viewport_height = web_sys::window()
                            .and_then(|w| w.inner_height().ok())
                            .and_then(|h| h.as_f64())
                            .unwrap_or(0.0);
                        let previous = *side.borrow();
                        let (current, event) = classify_visibility(
                            previous,
                            entry.is_intersecting(),
                            entry.bounding_client_rect().bottom(),
                            viewport_height,
                        );
                        *side.borrow_mut() = current;
                        if let Some(event) = event {
                            log::debug!("hero heading: {:?}", event);
                            sequence.dispatch(SequenceAction::Visibility(event));
                        }
                    })
                });
                if handle.is_none() {
                    sequence.dispatch(SequenceAction::Visibility(Visibility::Enter));
                }
                move || drop(handle)
            },
            (),
        );
    }

    // Show the copy anyway if the heading never enters the band
    {
        let sequence = sequence.clone();
        use_effect_with_deps(
            move |_| {
                let timeout = Timeout::new(FALLBACK_MS, move || {
                    sequence.dispatch(SequenceAction::Fallback { run: 0 });
                });
                move || drop(timeout)
            },
            (),
        );
    }

    // Per-run timers. A new run drops the previous run's timers.
    {
        let starting = sequence.stage == Stage::Assembling;
        let restart_pending = sequence.restart_pending;
        let layout = sequence.layout;
        let title_words = hero.main_title.len();
        let dispatcher = sequence.clone();
        use_effect_with_deps(
            move |run: &u32| {
                let run = *run;
                let mut timers: Vec<Timeout> = Vec::new();
                if starting {
                    for (at, step) in run_schedule(&layout, title_words) {
                        let dispatcher = dispatcher.clone();
                        timers.push(Timeout::new(at, move || {
                            dispatcher.dispatch(SequenceAction::Step { run, step });
                        }));
                    }
                } else if restart_pending {
                    timers.push(Timeout::new(REENTRY_DELAY_MS, move || {
                        dispatcher.dispatch(SequenceAction::Restart { run });
                    }));
                }
                move || drop(timers)
            },
            sequence.run,
        );
    }

    // Tagline rotation
    {
        let sequence = sequence.clone();
        use_effect_with_deps(
            move |_| {
                let interval = Interval::new(CYCLE_INTERVAL_MS, move || {
                    sequence.dispatch(SequenceAction::CycleTick);
                });
                move || drop(interval)
            },
            (),
        );
    }
    {
        let dispatcher = sequence.clone();
        use_effect_with_deps(
            move |(cycle, cycling_out): &(u32, bool)| {
                let cycle = *cycle;
                let timeout = cycling_out.then(|| {
                    Timeout::new(CYCLE_OUT_MS, move || {
                        dispatcher.dispatch(SequenceAction::CycleOutDone { cycle });
                    })
                });
                move || drop(timeout)
            },
            (sequence.cycle, sequence.cycling_out),
        );
    }

    let open_slide = {
        let slide = slide.clone();
        let sequence = sequence.clone();
        Callback::from(move |index: usize| {
            slide.set(Some(index));
            sequence.dispatch(SequenceAction::Pause);
        })
    };
    let close_slider = {
        let slide = slide.clone();
        let sequence = sequence.clone();
        Callback::from(move |_: ()| {
            slide.set(None);
            sequence.dispatch(SequenceAction::Resume);
        })
    };
    let change_slide = {
        let slide = slide.clone();
        Callback::from(move |index: usize| slide.set(Some(index)))
    };

    let wall = if sequence.wall_visible {
        let flights = brick_flights(&sequence.layout, sequence.run as u64);
        html! {
            <div key={format!("wall-{}", sequence.run)}
                 class={classes!("brick-wall", sequence.wall_built.then_some("built"))}
                 aria-hidden="true">
                { for flights.iter().map(|b| html! {
                    <div class="brick" style={format!(
                        "left: {}px; top: {}px; width: {}px; height: {}px; --from-x: {}px; --from-y: {}px; --rot: {}deg; animation-delay: {}ms;",
                        b.left, b.top, BRICK_WIDTH, BRICK_HEIGHT, b.from_x, b.from_y, b.rotation, b.delay_ms
                    )} />
                }) }
            </div>
        }
    } else {
        html! {}
    };

    let tagline = match hero.typed_texts.get(sequence.line_index) {
        Some(text) if sequence.text_visible => {
            let (duration, stagger) = letter_timing(sequence.line_cycled);
            html! {
                <span key={sequence.line_generation}
                      class={classes!("changing-text", sequence.cycling_out.then_some("out"))}>
                    { for letters(text).into_iter().enumerate().map(|(i, letter)| html! {
                        <span class="letter" style={format!(
                            "animation-duration: {}ms; animation-delay: {}ms;",
                            duration, i as u32 * stagger
                        )}>{letter}</span>
                    }) }
                </span>
            }
        }
        _ => html! { <span class="changing-text" /> },
    };

    let section_style = hero
        .background_image
        .as_ref()
        .map(|url| format!("background-image: url({});", url));

    html! {
        <>
            <style>{hero_css()}</style>
            <section id="home" class="info-section" style={section_style}>
                <div class="left-part">
                    <h1 ref={heading}>
                        {wall}
                        <div class="d-flex-wrapper">
                            { for hero.main_title.iter().enumerate().map(|(i, word)| html! {
                                <div class="d-flex">
                                    <span class={classes!("title-word", sequence.title_visible.then_some("visible"))}
                                          style={format!("transition-delay: {}ms;", i as u32 * TITLE_STAGGER_MS)}>
                                        {word}
                                    </span>
                                </div>
                            }) }
                        </div>
                        {tagline}
                    </h1>
                    {
                        if let Some(description) = &hero.description {
                            html! {
                                <p class={classes!("hero-description", sequence.text_visible.then_some("visible"))}>
                                    {description}
                                </p>
                            }
                        } else {
                            html! {}
                        }
                    }
                    <a href={hero.cta_link.clone()}
                       class={classes!("book-link", sequence.text_visible.then_some("visible"))}>
                        <span class="linktext">
                            { for hero.cta_text.chars().enumerate().map(|(i, c)| html! {
                                <span class="char" style={format!("animation-delay: {}ms;", i as u32 * LETTER_STAGGER_MS)}>
                                    { if c == ' ' { '\u{00A0}'.to_string() } else { c.to_string() } }
                                </span>
                            }) }
                        </span>
                        <span class="arrow" />
                    </a>
                </div>
                <div class="right-part">
                    <div class={classes!("main-grid", "d-flex", sequence.paused.then_some("paused"))}>
                        { for hero.service_boxes.iter().enumerate().map(|(i, service_box)| {
                            let onclick = {
                                let open_slide = open_slide.clone();
                                Callback::from(move |_: MouseEvent| open_slide.emit(i))
                            };
                            html! {
                                <div key={service_box.id} class="box" role="button"
                                     aria-label={service_box.title.clone()} {onclick}>
                                    <div class="bg-img">
                                        <LazyImage
                                            src={service_box.image.clone()}
                                            placeholder={service_box.image_small.clone().map(AttrValue::from)}
                                            src_set={service_box.src_set.clone().map(AttrValue::from)}
                                            sizes={AttrValue::from(BOX_SIZES)}
                                            alt={service_box.title.clone()}
                                            width={600}
                                            height={600}
                                            class={classes!("circle-tile")}
                                            img_class={classes!("img")} />
                                    </div>
                                    <span class="box-title">{&service_box.title}</span>
                                </div>
                            }
                        }) }
                    </div>
                </div>
            </section>
            <SliderModal
                boxes={hero.service_boxes.clone()}
                open={slide.is_some()}
                index={slide.unwrap_or(0)}
                on_close={close_slider}
                on_change={change_slide} />
        </>
    }
}

fn hero_css() -> String {
    format!(
        r#"
        .info-section {{
            position: relative;
            display: flex;
            flex-wrap: wrap;
            gap: 3rem;
            align-items: center;
            min-height: 100vh;
            padding: 6rem 4rem;
            background-size: cover;
            background-position: center;
        }}
        .info-section .left-part {{
            flex: 1 1 420px;
        }}
        .info-section .right-part {{
            flex: 1 1 420px;
        }}
        .info-section h1 {{
            position: relative;
            isolation: isolate;
            font-size: 3.5rem;
            line-height: 1.1;
            color: #2f3e2a;
        }}
        .brick-wall {{
            position: absolute;
            inset: 0;
            z-index: -1;
            transition: opacity 600ms ease;
        }}
        .brick-wall.built {{
            opacity: 0.85;
        }}
        .brick {{
            position: absolute;
            box-sizing: border-box;
            background: rgba(250, 248, 243, 0.95);
            border: 0.5px solid rgba(91, 124, 79, 0.15);
            box-shadow: inset 0 0 15px rgba(91, 124, 79, 0.1);
            animation: brick-in {flight}ms cubic-bezier(0.34, 1.3, 0.64, 1) both;
        }}
        @keyframes brick-in {{
            from {{
                opacity: 0;
                transform: translate(var(--from-x), var(--from-y)) rotate(var(--rot));
            }}
            to {{
                opacity: 1;
                transform: none;
            }}
        }}
        .d-flex-wrapper .d-flex {{
            display: inline-flex;
            overflow: hidden;
            margin-right: 0.3em;
        }}
        .title-word {{
            display: inline-block;
            opacity: 0;
            transform: translateY(100%);
            transition: transform {word}ms cubic-bezier(0.22, 1, 0.36, 1), opacity {word}ms ease;
        }}
        .title-word.visible {{
            opacity: 1;
            transform: none;
        }}
        .changing-text {{
            display: block;
            min-height: 1.2em;
            color: #5b7c4f;
        }}
        .changing-text .letter {{
            display: inline-block;
            animation-name: letter-in;
            animation-timing-function: cubic-bezier(0.22, 1, 0.36, 1);
            animation-fill-mode: both;
        }}
        .changing-text.out .letter {{
            animation: letter-out {out}ms ease-in both;
        }}
        @keyframes letter-in {{
            from {{ opacity: 0; transform: translateX(50px); }}
            to {{ opacity: 1; transform: none; }}
        }}
        @keyframes letter-out {{
            to {{ opacity: 0; transform: translateY(-40px); }}
        }}
        .hero-description {{
            max-width: 34rem;
            color: #4a4a4a;
            opacity: 0;
            transition: opacity {cycle_in}ms ease;
        }}
        .hero-description.visible {{
            opacity: 1;
        }}
        .book-link {{
            display: inline-flex;
            align-items: center;
            gap: 0.75rem;
            margin-top: 2rem;
            color: #2f3e2a;
            font-weight: 600;
            text-decoration: none;
        }}
        .book-link .char {{
            display: inline-block;
            transition: transform 0.2s ease;
        }}
        .book-link.visible .char {{
            animation: char-in {letter}ms cubic-bezier(0.22, 1, 0.36, 1) backwards;
        }}
        .book-link:hover .char {{
            transform: translateY(-2px);
        }}
        @keyframes char-in {{
            from {{ opacity: 0; transform: translateY(12px); }}
            to {{ opacity: 1; transform: none; }}
        }}
        .book-link .arrow::after {{
            content: "→";
        }}
        .main-grid {{
            display: grid;
            grid-template-columns: repeat(3, 1fr);
            gap: 1.25rem;
        }}
        .main-grid .box {{
            cursor: pointer;
            text-align: center;
        }}
        .main-grid .circle-tile {{
            border-radius: 50%;
            transition: transform 0.3s ease;
        }}
        .main-grid:not(.paused) .box:hover .circle-tile {{
            transform: scale(1.05);
        }}
        .box-title {{
            display: block;
            margin-top: 0.5rem;
            font-size: 0.95rem;
            color: #2f3e2a;
        }}
        .slider-modal {{
            position: fixed;
            inset: 0;
            z-index: 1000;
            display: flex;
            align-items: center;
            justify-content: center;
            background: rgba(0, 0, 0, 0.85);
        }}
        .slider-modal-content {{
            position: relative;
            max-width: min(90vw, 1200px);
            color: #fff;
        }}
        .slider-slide img {{
            max-width: 100%;
            max-height: 75vh;
            object-fit: contain;
        }}
        .slider-close, .slider-prev, .slider-next {{
            position: absolute;
            background: none;
            border: none;
            color: #fff;
            font-size: 2.5rem;
            cursor: pointer;
        }}
        .slider-close {{ top: -3rem; right: 0; }}
        .slider-prev {{ left: -3rem; top: 40%; }}
        .slider-next {{ right: -3rem; top: 40%; }}
        @media (max-width: 768px) {{
            .info-section {{
                padding: 4rem 1.5rem;
            }}
            .info-section h1 {{
                font-size: 2.4rem;
            }}
            .main-grid {{
                grid-template-columns: repeat(2, 1fr);
            }}
        }}
    "#,
        flight = BRICK_FLIGHT_MS,
        word = TITLE_WORD_MS,
        out = CYCLE_OUT_MS,
        cycle_in = CYCLE_IN_MS,
        letter = LETTER_MS,
    )
}
