//! Entry point for the **hyprpair** CLI.
//!
//! Each invocation is a short-lived batch run: parse one mode flag, query
//! the compositor, apply one layout, update the toggle state, exit.
//! Exit code 0 means the layout (or the single-monitor no-op) was applied;
//! exit code 1 covers every failure, including the degraded-fallback paths
//! that still configured something.

use hyprpair::config::Config;
use hyprpair::hyprland::backend::HyprlandBackend;
use hyprpair::layout::{LayoutMode, SecondaryPosition};
use hyprpair::state::FileStateStore;
use hyprpair::toggler::LayoutToggler;
use log::{error, info};

/// What one invocation should do, decided entirely by the mode flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Toggle(LayoutMode),
    Place(SecondaryPosition),
}

/// Map a mode flag to an action.
fn parse_action(flag: &str) -> Option<Action> {
    match flag {
        "-t" | "--toggle" => Some(Action::Toggle(LayoutMode::Horizontal)),
        "-v" | "--toggle-vertical" => Some(Action::Toggle(LayoutMode::Vertical)),
        "-h" | "--left" => Some(Action::Place(SecondaryPosition::Left)),
        "-l" | "--right" => Some(Action::Place(SecondaryPosition::Right)),
        "-k" | "--above" => Some(Action::Place(SecondaryPosition::Above)),
        "-j" | "--below" => Some(Action::Place(SecondaryPosition::Below)),
        _ => None,
    }
}

fn usage() {
    eprintln!(
        "usage: hyprpair <flag>\n\
         \n\
         toggles (alternate on every run, state persisted per axis):\n\
         \x20 -t, --toggle            horizontal toggle\n\
         \x20 -v, --toggle-vertical   vertical toggle\n\
         \n\
         absolute placements (stateless, idempotent):\n\
         \x20 -h, --left              secondary left of primary\n\
         \x20 -l, --right             secondary right of primary\n\
         \x20 -k, --above             secondary above primary\n\
         \x20 -j, --below             secondary below primary"
    );
}

/// Resolve the config directory (`$XDG_CONFIG_HOME/hyprpair`).
fn config_dir() -> std::path::PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    std::path::PathBuf::from(base).join("hyprpair")
}

/// Try to load the config from `$XDG_CONFIG_HOME/hyprpair/config.json`,
/// falling back to compiled-in defaults.
fn load_config() -> Config {
    let path = config_dir().join("config.json");
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            info!("no config file ({}), using defaults", e);
            Config::default()
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let action = match args.as_slice() {
        [flag] => parse_action(flag),
        _ => None,
    };
    let Some(action) = action else {
        usage();
        std::process::exit(1);
    };

    let config = load_config();
    let store = match &config.state_dir {
        Some(dir) => FileStateStore::new(dir),
        None => FileStateStore::in_runtime_dir(),
    };
    let toggler = LayoutToggler::new(HyprlandBackend::new(), store, config);

    let result = match action {
        Action::Toggle(mode) => toggler.toggle(mode),
        Action::Place(position) => toggler.place(position),
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flags_parse() {
        assert_eq!(
            parse_action("-t"),
            Some(Action::Toggle(LayoutMode::Horizontal))
        );
        assert_eq!(
            parse_action("--toggle-vertical"),
            Some(Action::Toggle(LayoutMode::Vertical))
        );
    }

    #[test]
    fn placement_flags_parse() {
        assert_eq!(parse_action("-h"), Some(Action::Place(SecondaryPosition::Left)));
        assert_eq!(parse_action("-l"), Some(Action::Place(SecondaryPosition::Right)));
        assert_eq!(parse_action("-k"), Some(Action::Place(SecondaryPosition::Above)));
        assert_eq!(parse_action("-j"), Some(Action::Place(SecondaryPosition::Below)));
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert_eq!(parse_action("-x"), None);
        assert_eq!(parse_action(""), None);
        assert_eq!(parse_action("--help"), None);
    }
}
