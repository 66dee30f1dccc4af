// page state
//
// the webapp keeps all of its interactive state in these small structs and
// only ever derives the document (classes, attributes, scroll position) from
// them.  none of this touches the dom, so it lives here where it can be
// tested without a browser

// theme

pub const THEME_STORAGE_KEY: &str = "theme";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    // anything other than "dark" (including nothing at all) is light
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    // the indicator shows what a click switches to
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Light => "🌙",
            Theme::Dark => "☀️",
        }
    }
}

// mobile menu

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MenuState {
    pub open: bool,
}

impl MenuState {
    pub fn toggled(self) -> Self {
        MenuState { open: !self.open }
    }

    pub fn closed(self) -> Self {
        MenuState { open: false }
    }

    pub fn class(self) -> &'static str {
        if self.open { "active" } else { "" }
    }

    pub fn aria_expanded(self) -> &'static str {
        if self.open { "true" } else { "false" }
    }
}

// navbar

pub const NAVBAR_SCROLL_THRESHOLD: f64 = 50.0;

pub fn navbar_scrolled(scroll_top: f64) -> bool {
    scroll_top > NAVBAR_SCROLL_THRESHOLD
}

// active section
//
// a section is "in view" when its span contains the point halfway down the
// visible part of the scroll container

#[derive(Clone, Debug, PartialEq)]
pub struct SectionSpan {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionSpan {
    pub fn contains(&self, point: f64) -> bool {
        point >= self.top && point < self.top + self.height
    }
}

pub fn probe_point(scroll_top: f64, client_height: f64) -> f64 {
    scroll_top + client_height / 2.0
}

// sections are given in document order; when spans overlap, the last match
// wins, since each match replaces the previous highlight
pub fn active_section(sections: &[SectionSpan], point: f64) -> Option<&str> {
    sections
        .iter()
        .filter(|section| section.contains(point))
        .last()
        .map(|section| section.id.as_str())
}

// which nav item is highlighted
//
// the highlight only moves when some section contains the probe point; in a
// gap between sections the previous item stays active
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NavHighlight {
    current: Option<String>,
}

impl NavHighlight {
    pub fn update(&mut self, found: Option<&str>) {
        if let Some(id) = found {
            self.current = Some(id.to_owned());
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn is_active(&self, section: &str) -> bool {
        self.current.as_deref() == Some(section)
    }

    pub fn class(&self, section: &str) -> &'static str {
        if self.is_active(section) { "nav-link active" } else { "nav-link" }
    }

    pub fn aria_current(&self, section: &str) -> &'static str {
        if self.is_active(section) { "page" } else { "false" }
    }
}

// keyboard

// keys that act like a click on buttons and nav links
pub fn activates(key: &str) -> bool {
    matches!(key, "Enter" | " ")
}

// focus rings are only shown to people navigating with the keyboard: tab
// turns the marker on, and any pointer press turns it off again
pub const KEYBOARD_NAVIGATION_CLASS: &str = "keyboard-navigation";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FocusMarker {
    pub visible: bool,
}

impl FocusMarker {
    pub fn after_key(self, key: &str) -> Self {
        if key == "Tab" {
            FocusMarker { visible: true }
        } else {
            self
        }
    }

    pub fn after_pointer_down(self) -> Self {
        FocusMarker { visible: false }
    }

    pub fn after_input(self, input: DocumentInput) -> Self {
        match input {
            DocumentInput::Key(key) => self.after_key(key),
            DocumentInput::PointerDown => self.after_pointer_down(),
        }
    }
}

// input seen by the listeners on the document itself, so a key press counts
// even when nothing on the page has focus yet
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DocumentInput<'a> {
    Key(&'a str),
    PointerDown,
}

// contact form

pub const INVALID_BORDER: &str = "#e74c3c";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum FormPhase {
    #[default]
    Editing,
    // a request is in flight; nothing is disabled in the meantime
    Submitting,
}
