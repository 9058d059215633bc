//! Auth gate policy: whether the app is usable and whether the credential
//! modal covers it.
//!
//! DESIGN
//! ======
//! The gate is a pure function of the auth snapshot and the current path.
//! Routes that must stay reachable while signed out (the reset link target)
//! are an explicit allow-list handed to [`AuthGate::new`].

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;

/// Target of emailed reset links; must never be gated.
pub const RESET_PASSWORD_ROUTE: &str = "/reset-password";

/// Auth lifecycle as seen by the gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateState {
    /// Startup token verification has not settled.
    Checking,
    Unauthenticated,
    Authenticated,
}

impl GateState {
    #[must_use]
    pub fn of(loading: bool, has_user: bool) -> Self {
        match (loading, has_user) {
            (true, _) => GateState::Checking,
            (false, false) => GateState::Unauthenticated,
            (false, true) => GateState::Authenticated,
        }
    }
}

/// What the gate renders for a given state and route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateView {
    /// Nothing at all, so the modal cannot flash before verification ends.
    Hidden,
    /// Content dimmed and inert under an undismissable credential modal.
    Gated,
    /// Content as normal, no modal.
    Open,
    /// Allow-listed route: the gate steps aside regardless of auth state.
    Bypassed,
}

impl GateView {
    #[must_use]
    pub fn shows_modal(self) -> bool {
        matches!(self, GateView::Gated)
    }

    #[must_use]
    pub fn renders_content(self) -> bool {
        !matches!(self, GateView::Hidden)
    }

    #[must_use]
    pub fn content_inert(self) -> bool {
        matches!(self, GateView::Gated)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthGate {
    open_routes: Vec<String>,
}

impl Default for AuthGate {
    fn default() -> Self {
        Self::new([RESET_PASSWORD_ROUTE])
    }
}

impl AuthGate {
    pub fn new<I, S>(open_routes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let open_routes = open_routes
            .into_iter()
            .map(|r| {
                let route: String = r.into();
                normalize_path(&route).to_owned()
            })
            .collect();
        Self { open_routes }
    }

    /// True for an allow-listed route or any path beneath one. Query strings
    /// and fragments are ignored.
    #[must_use]
    pub fn is_open_route(&self, path: &str) -> bool {
        let path = normalize_path(path);
        self.open_routes.iter().any(|route| {
            path == route
                || path
                    .strip_prefix(route.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    #[must_use]
    pub fn view(&self, state: GateState, path: &str) -> GateView {
        if self.is_open_route(path) {
            return GateView::Bypassed;
        }
        match state {
            GateState::Checking => GateView::Hidden,
            GateState::Unauthenticated => GateView::Gated,
            GateState::Authenticated => GateView::Open,
        }
    }
}

fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}
