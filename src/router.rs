//! Route table and navigation state
//!
//! Maps URL paths to views and keeps the document title in sync with the
//! current route.

use std::sync::RwLock;

use thiserror::Error;
use tracing::{debug, info};

pub const APP_TITLE: &str = "Expense Tracker";
pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Transactions,
    Budgets,
    Categories,
    Reports,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub view: View,
    pub title: &'static str,
}

pub const ROUTES: [Route; 6] = [
    Route { path: "/", name: "Dashboard", view: View::Dashboard, title: "Dashboard" },
    Route { path: "/transactions", name: "Transactions", view: View::Transactions, title: "Transactions" },
    Route { path: "/budgets", name: "Budgets", view: View::Budgets, title: "Budgets" },
    Route { path: "/categories", name: "Categories", view: View::Categories, title: "Categories" },
    Route { path: "/reports", name: "Reports", view: View::Reports, title: "Reports" },
    Route { path: "/settings", name: "Settings", view: View::Settings, title: "Settings" },
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("No route matches '{0}'")]
    NotFound(String),
}

/// Look up the route for a path; query strings, fragments and trailing slashes are ignored
pub fn resolve(path: &str) -> Option<&'static Route> {
    let path = path.split(['?', '#']).next().unwrap_or("");
    let trimmed = path.trim_end_matches('/');
    let normalized = if trimmed.is_empty() { "/" } else { trimmed };
    ROUTES.iter().find(|r| r.path == normalized)
}

pub fn by_name(name: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|r| r.name == name)
}

/// Browser-tab title for a route
pub fn page_title(route: Option<&Route>) -> String {
    match route {
        Some(route) => format!("{} - {}", route.title, APP_TITLE),
        None => APP_TITLE.to_string(),
    }
}

/// Hook the transport uses to force navigation, e.g. to the login page
pub trait Navigator: Send + Sync {
    fn redirect(&self, path: &str);
}

#[derive(Debug, Clone)]
struct Location {
    path: String,
    route: Option<&'static Route>,
    title: String,
}

impl Location {
    fn at(path: &str) -> Self {
        let route = resolve(path);
        Self {
            path: path.to_string(),
            route,
            title: page_title(route),
        }
    }
}

pub struct Router {
    location: RwLock<Location>,
    history: RwLock<Vec<String>>,
}

impl Router {
    pub fn new() -> Self {
        Self::starting_at("/")
    }

    pub fn starting_at(path: &str) -> Self {
        Self {
            location: RwLock::new(Location::at(path)),
            history: RwLock::new(vec![path.to_string()]),
        }
    }

    /// In-app navigation; only paths in the route table are accepted
    pub fn push(&self, path: &str) -> Result<&'static Route, RouteError> {
        let route = resolve(path).ok_or_else(|| RouteError::NotFound(path.to_string()))?;
        self.go(path);
        debug!("Navigated to {} ({})", route.path, route.name);
        Ok(route)
    }

    pub fn push_named(&self, name: &str) -> Result<&'static Route, RouteError> {
        let route = by_name(name).ok_or_else(|| RouteError::NotFound(name.to_string()))?;
        self.push(route.path)
    }

    /// Step back in history; returns false when already at the first entry
    pub fn back(&self) -> bool {
        let previous = {
            let Ok(mut history) = self.history.write() else {
                return false;
            };
            if history.len() < 2 {
                return false;
            }
            history.pop();
            history.last().cloned()
        };
        match previous {
            Some(path) => {
                self.set_location(&path);
                true
            }
            None => false,
        }
    }

    pub fn current_path(&self) -> String {
        self.location
            .read()
            .map(|l| l.path.clone())
            .unwrap_or_else(|_| "/".to_string())
    }

    pub fn current_route(&self) -> Option<&'static Route> {
        self.location.read().ok().and_then(|l| l.route)
    }

    pub fn document_title(&self) -> String {
        self.location
            .read()
            .map(|l| l.title.clone())
            .unwrap_or_else(|_| APP_TITLE.to_string())
    }

    fn go(&self, path: &str) {
        if let Ok(mut history) = self.history.write() {
            history.push(path.to_string());
        }
        self.set_location(path);
    }

    fn set_location(&self, path: &str) {
        if let Ok(mut location) = self.location.write() {
            *location = Location::at(path);
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for Router {
    fn redirect(&self, path: &str) {
        info!("Redirecting to {}", path);
        self.go(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_has_title() {
        let paths = ["/", "/transactions", "/budgets", "/categories", "/reports", "/settings"];
        for path in paths {
            let route = resolve(path).unwrap();
            assert_eq!(route.path, path);
            assert_eq!(page_title(Some(route)), format!("{} - Expense Tracker", route.title));
        }
    }

    #[test]
    fn test_resolve_normalizes_path() {
        assert_eq!(resolve("/budgets/").map(|r| r.view), Some(View::Budgets));
        assert_eq!(resolve("/reports?year=2024").map(|r| r.view), Some(View::Reports));
        assert_eq!(resolve("").map(|r| r.view), Some(View::Dashboard));
        assert!(resolve("/login").is_none());
    }

    #[test]
    fn test_push_updates_title() {
        let router = Router::new();
        assert_eq!(router.document_title(), "Dashboard - Expense Tracker");

        router.push("/transactions").unwrap();
        assert_eq!(router.current_path(), "/transactions");
        assert_eq!(router.document_title(), "Transactions - Expense Tracker");

        router.push_named("Settings").unwrap();
        assert_eq!(router.current_route().map(|r| r.view), Some(View::Settings));
    }

    #[test]
    fn test_push_rejects_unknown_path() {
        let router = Router::new();
        assert_eq!(router.push("/nope"), Err(RouteError::NotFound("/nope".to_string())));
        assert_eq!(router.current_path(), "/");
    }

    #[test]
    fn test_redirect_accepts_login() {
        let router = Router::new();
        router.redirect(LOGIN_PATH);
        assert_eq!(router.current_path(), LOGIN_PATH);
        assert!(router.current_route().is_none());
        assert_eq!(router.document_title(), APP_TITLE);
    }

    #[test]
    fn test_back() {
        let router = Router::new();
        assert!(!router.back());
        router.push("/budgets").unwrap();
        router.push("/reports").unwrap();
        assert!(router.back());
        assert_eq!(router.current_path(), "/budgets");
    }
}
