use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

/// Live intersection observer. Disconnects when dropped.
pub struct ObserverHandle {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl Drop for ObserverHandle {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Watches `element` and calls `on_entry` for every report. Returns `None` when
/// the browser has no IntersectionObserver; callers should then act as if the
/// element were visible.
pub fn observe<F>(element: &Element, root_margin: &str, threshold: f64, mut on_entry: F) -> Option<ObserverHandle>
where
    F: FnMut(&IntersectionObserverEntry) + 'static,
{
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                    on_entry(&entry);
                }
            }
        },
    );

    let mut init = IntersectionObserverInit::new();
    init.root_margin(root_margin);
    init.threshold(&JsValue::from_f64(threshold));

    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
        Ok(observer) => {
            observer.observe(element);
            Some(ObserverHandle {
                observer,
                _callback: callback,
            })
        }
        Err(e) => {
            log::warn!("IntersectionObserver unavailable: {:?}", e);
            None
        }
    }
}
