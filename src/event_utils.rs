use leptos::ev::EventDescriptor;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Event, EventTarget};

#[derive(Clone, Debug)]
pub struct EventOptions {
    pub passive: bool,
    pub capture: bool,
    pub once: bool,
}

impl Default for EventOptions {
    fn default() -> Self {
        Self { passive: true, capture: false, once: false }
    }
}

/// Keeps a listener's closure alive. Dropping the handle detaches the listener.
pub struct EventListenerHandle {
    target: EventTarget,
    event_name: String,
    callback: Closure<dyn FnMut(Event)>,
    capture: bool,
}

impl EventListenerHandle {
    pub fn remove(self) {
        drop(self);
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }
}

impl Drop for EventListenerHandle {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback_and_bool(
            &self.event_name,
            self.callback.as_ref().unchecked_ref(),
            self.capture,
        );
    }
}

/// Listen for a raw event name on any target.
pub fn listen_named(
    target: &EventTarget,
    event_name: &str,
    options: &EventOptions,
    cb: impl FnMut(Event) + 'static,
) -> EventListenerHandle {
    let opts = AddEventListenerOptions::new();
    opts.set_passive(options.passive);
    opts.set_capture(options.capture);
    opts.set_once(options.once);

    let callback = Closure::wrap(Box::new(cb) as Box<dyn FnMut(Event)>);
    let _ = target.add_event_listener_with_callback_and_add_event_listener_options(
        event_name,
        callback.as_ref().unchecked_ref(),
        &opts,
    );

    EventListenerHandle {
        target: target.clone(),
        event_name: event_name.to_string(),
        callback,
        capture: options.capture,
    }
}

/// Typed listener using leptos event descriptors (`ev::click`, `ev::mouseenter`, ...).
pub fn listen<E>(
    target: &EventTarget,
    event: E,
    options: &EventOptions,
    mut cb: impl FnMut(E::EventType) + 'static,
) -> EventListenerHandle
where
    E: EventDescriptor + 'static,
    E::EventType: JsCast,
{
    let event_name = event.name().into_owned();
    listen_named(target, &event_name, options, move |ev: Event| {
        cb(ev.unchecked_into::<E::EventType>());
    })
}

/// Same as [`listen`] with default (passive) options.
pub fn on<E>(target: &EventTarget, event: E, cb: impl FnMut(E::EventType) + 'static) -> EventListenerHandle
where
    E: EventDescriptor + 'static,
    E::EventType: JsCast,
{
    listen(target, event, &EventOptions::default(), cb)
}

pub fn window_target() -> Option<EventTarget> {
    web_sys::window().map(|window| window.unchecked_into::<EventTarget>())
}
