use std::rc::Rc;

use dioxus::prelude::*;

use crate::common::{dom, storage::get_local_storage};
use api::page::{
    DocumentInput, FocusMarker, KEYBOARD_NAVIGATION_CLASS, MenuState, NavHighlight,
    THEME_STORAGE_KEY, Theme, active_section, navbar_scrolled, probe_point,
};

mod contact;
use contact::ContactSection;

mod navbar;
use navbar::NavBar;

// the page scrolls inside this element rather than the window
pub const MAIN_CONTAINER: &str = "mainContainer";

// (section id, nav label), in document order
pub const SECTIONS: [(&str, &str); 4] = [
    ("home", "Home"),
    ("about", "About"),
    ("projects", "Projects"),
    ("contact", "Contact"),
];

// recompute everything that depends on the scroll position
//
// called on every scroll of the main container and once after mounting; the
// signals are only written when something actually changed
fn track_scroll(mut scrolled: Signal<bool>, mut highlight: Signal<NavHighlight>) {
    let section_ids = SECTIONS.map(|(id, _)| id);

    let Some(metrics) = dom::measure(MAIN_CONTAINER, &section_ids) else {
        return;
    };

    let is_scrolled = navbar_scrolled(metrics.scroll_top);
    if *scrolled.peek() != is_scrolled {
        scrolled.set(is_scrolled);
    }

    let point = probe_point(metrics.scroll_top, metrics.client_height);

    let mut next = highlight.peek().clone();
    next.update(active_section(&metrics.sections, point));

    if *highlight.peek() != next {
        highlight.set(next);
    }
}

fn track_focus(mut focus: Signal<FocusMarker>, input: DocumentInput) {
    let next = focus.peek().after_input(input);

    if *focus.peek() != next {
        focus.set(next);
    }
}

#[component]
pub fn Page() -> Element {
    let theme = use_signal(|| Theme::from_stored(get_local_storage(THEME_STORAGE_KEY).as_deref()));
    let menu = use_signal(MenuState::default);
    let scrolled = use_signal(|| false);
    let highlight = use_signal(NavHighlight::default);
    let focus = use_signal(FocusMarker::default);

    // attributes outside the dioxus root follow their signals
    use_effect(move || dom::set_root_attribute("data-theme", theme().as_str()));
    use_effect(move || dom::set_body_class(KEYBOARD_NAVIGATION_CLASS, focus().visible));

    use_effect(move || track_scroll(scrolled, highlight));

    // tab and pointer presses are watched on the document, since a key press
    // with nothing focused is dispatched to <body> and never reaches the page;
    // the listeners go away with the hook
    use_hook(move || {
        Rc::new([
            dom::listen_document("keydown", move |evt| {
                if let Some(key) = dom::keyboard_key(&evt) {
                    track_focus(focus, DocumentInput::Key(&key));
                }
            }),
            dom::listen_document("mousedown", move |_| {
                track_focus(focus, DocumentInput::PointerDown)
            }),
        ])
    });

    rsx! {
        div {
            NavBar {
                theme,
                menu,
                scrolled,
                highlight,
            }

            div {
                id: MAIN_CONTAINER,
                class: "main-container",
                onscroll: move |_| track_scroll(scrolled, highlight),

                section { id: "home", class: "section",
                    h1 { "Hello, I'm a software developer" }
                    p { "I build fast, reliable software for the web and the systems behind it." }
                }

                section { id: "about", class: "section",
                    h2 { "About" }
                    p {
                        "I enjoy working across the stack, from network services and storage "
                        "engines to the pages people actually see."
                    }
                }

                section { id: "projects", class: "section",
                    h2 { "Projects" }
                    div { class: "projects-grid",
                        div { class: "project-card",
                            h3 { "Media server" }
                            p { "Self-hosted photo and video library with shared albums." }
                        }
                        div { class: "project-card",
                            h3 { "Contact relay" }
                            p { "The small service that turns this page's contact form into email." }
                        }
                    }
                }

                ContactSection {}
            }
        }
    }
}
