//! DOM event-listener glue shared by the browser adapters.

use platform_host::{ListenerCallback, ListenerHandle};

/// Attaches `on_change` to `event` on `target`; the returned handle detaches it and frees the
/// JS closure.
#[cfg(target_arch = "wasm32")]
pub(crate) fn attach_event_listener(
    target: web_sys::EventTarget,
    event: &'static str,
    on_change: ListenerCallback,
) -> ListenerHandle {
    use wasm_bindgen::{closure::Closure, JsCast};

    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
        on_change();
    });
    if target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .is_err()
    {
        return ListenerHandle::inert();
    }

    ListenerHandle::new(move || {
        let _ =
            target.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        drop(closure);
    })
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn detached_listener(on_change: ListenerCallback) -> ListenerHandle {
    let _ = on_change;
    ListenerHandle::inert()
}
