//! Application Context
//!
//! Screen switching shared via Leptos Context API.

use leptos::prelude::*;

use crate::models::Screen;

/// App-wide navigation signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Current screen - read
    pub screen: ReadSignal<Screen>,
    /// Current screen - write
    set_screen: WriteSignal<Screen>,
    /// Screens to return to with `back`
    history: RwSignal<Vec<Screen>>,
}

impl AppContext {
    pub fn new(screen: (ReadSignal<Screen>, WriteSignal<Screen>)) -> Self {
        Self {
            screen: screen.0,
            set_screen: screen.1,
            history: RwSignal::new(Vec::new()),
        }
    }

    /// Push the current screen and show `next`
    pub fn navigate(&self, next: Screen) {
        let current = self.screen.get_untracked();
        self.history.update(|h| h.push(current));
        self.set_screen.set(next);
    }

    /// Show `next` and forget the way back (login, logout)
    pub fn replace(&self, next: Screen) {
        self.history.update(|h| h.clear());
        self.set_screen.set(next);
    }

    /// Return to the previous screen; Home when there is none
    pub fn back(&self) {
        let mut previous = None;
        self.history.update(|h| previous = h.pop());
        self.set_screen.set(previous.unwrap_or(Screen::Home));
    }

    pub fn can_go_back(&self) -> bool {
        self.history.with(|h| !h.is_empty())
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
