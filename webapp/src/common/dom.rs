use gloo_console::error as console_error;
use web_sys::{
    Document, Event, HtmlElement, KeyboardEvent, ScrollBehavior, ScrollToOptions,
    wasm_bindgen::{JsCast, closure::Closure},
};

use api::page::SectionSpan;

// the few places where the page reaches past the rsx tree
//
// every lookup here is optional; an element that isn't there means the
// feature quietly does nothing

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

fn html_element(doc: &Document, id: &str) -> Option<HtmlElement> {
    doc.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()
}

// <html data-theme="...">
pub fn set_root_attribute(name: &str, value: &str) {
    let Some(root) = document().and_then(|doc| doc.document_element()) else {
        return;
    };

    if let Err(err) = root.set_attribute(name, value) {
        console_error!(format!("Failed to set {name} on document: {err:?}"));
    }
}

// <body class="..."> lives outside the dioxus root
pub fn set_body_class(class: &str, on: bool) {
    let Some(body) = document().and_then(|doc| doc.body()) else {
        return;
    };

    if let Err(err) = body.class_list().toggle_with_force(class, on) {
        console_error!(format!("Failed to toggle body class {class}: {err:?}"));
    }
}

// a listener on the document itself, removed again when dropped
pub struct DocumentListener {
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Drop for DocumentListener {
    fn drop(&mut self) {
        if let Some(doc) = document() {
            let _ = doc
                .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
        }
    }
}

pub fn listen_document<F>(kind: &'static str, handler: F) -> Option<DocumentListener>
where
    F: FnMut(Event) + 'static,
{
    let doc = document()?;
    let callback = Closure::<dyn FnMut(Event)>::new(handler);

    if let Err(err) = doc.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref()) {
        console_error!(format!("Failed to listen for {kind} on document: {err:?}"));
        return None;
    }

    Some(DocumentListener { kind, callback })
}

pub fn keyboard_key(event: &Event) -> Option<String> {
    event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key)
}

pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub client_height: f64,
    pub sections: Vec<SectionSpan>,
}

// section offsets are relative to the container, which is positioned for
// exactly this reason (see the stylesheet)
pub fn measure(container_id: &str, section_ids: &[&str]) -> Option<ScrollMetrics> {
    let doc = document()?;
    let container = doc.get_element_by_id(container_id)?;

    let sections = section_ids
        .iter()
        .filter_map(|id| {
            let section = html_element(&doc, id)?;

            Some(SectionSpan {
                id: (*id).to_owned(),
                top: f64::from(section.offset_top()),
                height: f64::from(section.offset_height()),
            })
        })
        .collect();

    Some(ScrollMetrics {
        scroll_top: f64::from(container.scroll_top()),
        client_height: f64::from(container.client_height()),
        sections,
    })
}

pub fn smooth_scroll_to(container_id: &str, section_id: &str) {
    let Some(doc) = document() else {
        return;
    };

    let (Some(container), Some(target)) = (
        doc.get_element_by_id(container_id),
        html_element(&doc, section_id),
    ) else {
        return;
    };

    let options = ScrollToOptions::new();
    options.set_top(f64::from(target.offset_top()));
    options.set_behavior(ScrollBehavior::Smooth);

    container.scroll_to_with_scroll_to_options(&options);
}

pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
