use dioxus::prelude::*;

use crate::common::{dom, storage::set_local_storage};
use crate::page::{MAIN_CONTAINER, SECTIONS};
use api::page::{MenuState, NavHighlight, THEME_STORAGE_KEY, Theme, activates};

#[derive(Clone, PartialEq, Props)]
pub struct NavBarProps {
    theme: Signal<Theme>,
    menu: Signal<MenuState>,
    scrolled: Signal<bool>,
    highlight: Signal<NavHighlight>,
}

fn toggle_theme(mut theme: Signal<Theme>) {
    let next = theme().toggled();

    set_local_storage(THEME_STORAGE_KEY, next.as_str());
    theme.set(next);
}

// every nav link does the same thing: close the mobile menu and scroll the
// container to its section
fn navigate(mut menu: Signal<MenuState>, section: &str) {
    menu.set(menu().closed());
    dom::smooth_scroll_to(MAIN_CONTAINER, section);
}

#[derive(Clone, PartialEq, Props)]
struct NavLinkProps {
    section: &'static str,
    label: &'static str,
    menu: Signal<MenuState>,
    highlight: Signal<NavHighlight>,
}

#[component]
fn NavLink(props: NavLinkProps) -> Element {
    let section = props.section;
    let menu = props.menu;
    let highlight = props.highlight;

    rsx! {
        li {
            a {
                class: highlight.read().class(section),
                href: "#{section}",
                "data-section": section,
                "aria-current": highlight.read().aria_current(section),
                onclick: move |evt: MouseEvent| {
                    evt.prevent_default();
                    navigate(menu, section);
                },
                onkeydown: move |evt: KeyboardEvent| {
                    if activates(&evt.key().to_string()) {
                        evt.prevent_default();
                        navigate(menu, section);
                    }
                },
                "{props.label}"
            }
        }
    }
}

#[component]
pub fn NavBar(props: NavBarProps) -> Element {
    let theme = props.theme;
    let mut menu = props.menu;
    let scrolled = props.scrolled;
    let highlight = props.highlight;

    rsx! {
        nav {
            id: "navbar",
            class: if scrolled() { "navbar scrolled" } else { "navbar" },

            span { class: "nav-logo", "Portfolio" }

            ul {
                id: "nav-menu",
                class: "nav-menu {menu().class()}",
                for (section , label) in SECTIONS {
                    NavLink {
                        key: "{section}",
                        section,
                        label,
                        menu,
                        highlight,
                    }
                }
            }

            div { class: "nav-controls",
                button {
                    id: "themeToggle",
                    class: "theme-toggle",
                    r#type: "button",
                    "aria-label": "Toggle theme",
                    onclick: move |_| toggle_theme(theme),
                    onkeydown: move |evt: KeyboardEvent| {
                        if activates(&evt.key().to_string()) {
                            evt.prevent_default();
                            toggle_theme(theme);
                        }
                    },
                    span { id: "themeIcon", "{theme().icon()}" }
                }

                button {
                    id: "mobile-menu",
                    class: "hamburger {menu().class()}",
                    r#type: "button",
                    "aria-label": "Toggle navigation",
                    "aria-expanded": menu().aria_expanded(),
                    onclick: move |_| menu.set(menu().toggled()),
                    span { class: "bar" }
                    span { class: "bar" }
                    span { class: "bar" }
                }
            }
        }
    }
}
