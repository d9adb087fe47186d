//!

use std::{env, path::PathBuf};

use log::LevelFilter;

use crate::menu::HOME_KEY;

///
const DEFAULT_LOG_FILE: &str = "navshell.log";

///
const DEFAULT_COLLAPSE_WIDTH: u16 = 80;

///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Menu catalog file; the built-in catalog is used when absent.
    pub menu_file: Option<PathBuf>,

    ///
    pub start_path: String,

    /// Terminal width under which the sidebar collapses.
    pub collapse_width: u16,

    /// log4rs YAML config, takes precedence over the settings below.
    pub log_config: Option<PathBuf>,

    ///
    pub log_file: PathBuf,

    ///
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            menu_file: None,
            start_path: HOME_KEY.to_owned(),
            collapse_width: DEFAULT_COLLAPSE_WIDTH,
            log_config: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    /// Reads `NAVSHELL_*` variables, loading `.env` first when present.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    ///
    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            menu_file: lookup("NAVSHELL_MENU").map(PathBuf::from),
            start_path: lookup("NAVSHELL_START_PATH").unwrap_or(defaults.start_path),
            collapse_width: lookup("NAVSHELL_COLLAPSE_WIDTH")
                .and_then(|width| width.parse().ok())
                .unwrap_or(defaults.collapse_width),
            log_config: lookup("NAVSHELL_LOG_CONFIG").map(PathBuf::from),
            log_file: lookup("NAVSHELL_LOG_FILE").map_or(defaults.log_file, PathBuf::from),
            log_level: lookup("NAVSHELL_LOG_LEVEL")
                .and_then(|level| level.parse().ok())
                .unwrap_or(defaults.log_level),
        }
    }

    /// A menu file given on the command line wins over the environment.
    pub fn with_args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        if let Some(file_name) = args.into_iter().nth(1) {
            self.menu_file = Some(PathBuf::from(file_name));
        }

        self
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None);

        assert_eq!(Config::default(), config);
    }

    #[test]
    fn test_lookup() {
        let vars = HashMap::from([
            ("NAVSHELL_MENU", "menu.yml"),
            ("NAVSHELL_START_PATH", "/network-logs"),
            ("NAVSHELL_COLLAPSE_WIDTH", "100"),
            ("NAVSHELL_LOG_LEVEL", "debug"),
        ]);

        let config = Config::from_lookup(|name| vars.get(name).map(|value| (*value).to_owned()));

        assert_eq!(Some(PathBuf::from("menu.yml")), config.menu_file);
        assert_eq!("/network-logs", config.start_path);
        assert_eq!(100, config.collapse_width);
        assert_eq!(LevelFilter::Debug, config.log_level);
        assert_eq!(PathBuf::from("navshell.log"), config.log_file);
    }

    #[test]
    fn test_bad_numbers_fall_back() {
        let config = Config::from_lookup(|name| {
            (name == "NAVSHELL_COLLAPSE_WIDTH").then(|| "wide".to_owned())
        });

        assert_eq!(80, config.collapse_width);
    }

    #[test]
    fn test_args_override_menu() {
        let config = Config::default().with_args(vec!["navshell".to_owned(), "other.json".to_owned()]);

        assert_eq!(Some(PathBuf::from("other.json")), config.menu_file);
    }
}
