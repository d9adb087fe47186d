//! In-process location and history, standing in for a hash router.

use crate::{
    menu::{MenuIndex, HOME_KEY},
    nav::Navigate,
};

///
pub const LOGIN_PATH: &str = "/login";

///
pub const REGISTER_PATH: &str = "/register";

///
pub const NETWORK_LOGS_PATH: &str = "/network-logs";

/// What a location renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    ///
    Login,

    ///
    Register,

    ///
    Home,

    /// The request inspector.
    NetworkLogs,

    /// A page reached through the menu.
    Page {
        ///
        key: String,

        ///
        label: String,
    },

    ///
    NotFound,
}

///
#[derive(Debug)]
pub struct Router {
    ///
    location: String,

    ///
    history: Vec<String>,
}

impl Router {
    ///
    pub fn new(start: &str) -> Self {
        Self {
            location: normalize(start),
            history: vec![],
        }
    }

    ///
    pub fn location(&self) -> &str {
        &self.location
    }

    ///
    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Returns to the previous location, if any.
    pub fn back(&mut self) -> bool {
        if let Some(previous) = self.history.pop() {
            log::debug!("Back from {} to {previous}", self.location);
            self.location = previous;
            true
        } else {
            false
        }
    }

    ///
    pub fn resolve(index: &MenuIndex, path: &str) -> Route {
        match path {
            LOGIN_PATH => Route::Login,
            REGISTER_PATH => Route::Register,
            NETWORK_LOGS_PATH => Route::NetworkLogs,
            "" | HOME_KEY => Route::Home,
            _ => index.find_leaf(path).map_or(Route::NotFound, |leaf| Route::Page {
                key: leaf.key.clone(),
                label: leaf.label.clone(),
            }),
        }
    }
}

impl Navigate for Router {
    fn navigate(&mut self, path: &str) {
        let path = normalize(path);

        if path == self.location {
            return;
        }

        let previous = core::mem::replace(&mut self.location, path);
        self.history.push(previous);
    }
}

///
fn normalize(path: &str) -> String {
    if path.is_empty() {
        HOME_KEY.to_owned()
    } else {
        path.to_owned()
    }
}
