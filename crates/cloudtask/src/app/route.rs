/*
[INPUT]:  Navigation requests from pages
[OUTPUT]: Current route and transition history
[POS]:    App layer - client-visible routes
[UPDATE]: When adding pages
*/

use std::fmt;
use std::str::FromStr;

/// Client-visible routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`, the unauthenticated entry point
    Login,
    Register,
    Dashboard,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
        }
    }

    pub fn requires_session(self) -> bool {
        matches!(self, Route::Dashboard)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "/" | "" | "/login" => Ok(Route::Login),
            "/register" => Ok(Route::Register),
            "/dashboard" => Ok(Route::Dashboard),
            other => Err(format!("unknown route: {other}")),
        }
    }
}

/// Routes kept by `Navigator::history`
pub const MAX_HISTORY: usize = 32;

/// Tracks which page is showing
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Route,
    /// Most recent routes, at most `MAX_HISTORY`
    history: Vec<Route>,
}

impl Navigator {
    pub fn new(start: Route) -> Self {
        Self {
            current: start,
            history: vec![start],
        }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    /// Routes shown so far, oldest first, trimmed to the last `MAX_HISTORY`
    pub fn history(&self) -> &[Route] {
        &self.history
    }

    pub fn navigate(&mut self, to: Route) {
        tracing::debug!(from = %self.current, to = %to, "navigate");
        self.current = to;
        if self.history.len() == MAX_HISTORY {
            self.history.remove(0);
        }
        self.history.push(to);
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Login)
    }
}
