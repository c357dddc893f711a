//! Route table of the protected application and the gate's render decision.

use std::fmt;

/// Pages reachable once the gate is unlocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    /// `/`
    Home,
    /// `/auth`
    Auth,
    /// `/guida`, the explainer page.
    Guide,
    /// Any other path.
    NotFound,
}

impl Page {
    /// Every routable page, in table order. `NotFound` is the fallback and
    /// is not listed.
    pub const ROUTED: [Page; 3] = [Page::Home, Page::Auth, Page::Guide];

    /// Select the page for `path`.
    ///
    /// Query strings, fragments and a trailing slash are ignored.
    pub fn resolve(path: &str) -> Page {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };

        Self::ROUTED
            .into_iter()
            .find(|page| page.path() == Some(normalized))
            .unwrap_or(Page::NotFound)
    }

    /// Canonical path, `None` for the fallback page.
    pub fn path(self) -> Option<&'static str> {
        match self {
            Page::Home => Some("/"),
            Page::Auth => Some("/auth"),
            Page::Guide => Some("/guida"),
            Page::NotFound => None,
        }
    }

    /// Short display title.
    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Auth => "auth",
            Page::Guide => "guida",
            Page::NotFound => "not-found",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// What the UI should render for the current gate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateView {
    /// The startup check has not finished: show a neutral waiting indicator.
    Waiting,
    /// Locked: show the code-entry surface.
    CodeEntry,
    /// Unlocked: mount the auth provider and router on this page.
    Protected(Page),
}

impl fmt::Display for GateView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateView::Waiting => f.write_str("waiting"),
            GateView::CodeEntry => f.write_str("code-entry"),
            GateView::Protected(page) => write!(f, "{}", page),
        }
    }
}
