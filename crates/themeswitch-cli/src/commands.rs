//! Subcommand handlers.

use std::thread;

use anyhow::{Context, Result};
use serde::Serialize;
use themeswitch::{
    render_button, render_status, render_with_output, Activation, AdaptiveTheme,
    AppearanceWatcher, Config, ControlState, FixedAppearance, MemoryRoot, MemoryStore,
    OsAppearance, OutputMode, PreferenceStore, StatusView, SystemAppearance, ThemeController,
    ThemeEvent, Transition,
};
use tracing::{debug, warn};

use crate::cli::{Cli, Command};

const MODE_TEMPLATE: &str = r#"{{ mode | style("mode") }}"#;
const TRANSITION_TEMPLATE: &str = r#"{{ transition | style("label") }} {{ mode | style("mode") }}"#;

type CliController = ThemeController<Box<dyn PreferenceStore>, MemoryRoot>;

/// Everything a subcommand needs, built once from flags and config.
struct Session {
    controller: CliController,
    appearance: Box<dyn SystemAppearance>,
    themes: AdaptiveTheme,
    output: OutputMode,
    config: Config,
}

impl Session {
    fn new(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => Config::discover().context("loading config")?,
        };
        if let Some(store) = &cli.store {
            config.store_path = Some(store.clone());
        }
        if let Some(origin) = &cli.origin {
            config.origin = origin.clone();
        }
        if let Some(key) = &cli.key {
            config.storage_key = key.clone();
        }

        let store: Box<dyn PreferenceStore> = match config.file_store() {
            Ok(store) => {
                debug!(path = %store.path().display(), "using file store");
                Box::new(store)
            }
            Err(e) => {
                warn!(error = %e, "no durable store; preference lasts for this run only");
                Box::new(MemoryStore::new())
            }
        };

        let appearance: Box<dyn SystemAppearance> = match cli.system.forced() {
            Some(mode) => Box::new(FixedAppearance(mode)),
            None => Box::new(OsAppearance::new()),
        };

        let themes = config
            .adaptive_theme()
            .context("loading stylesheets")?;

        let controller =
            ThemeController::new(store, MemoryRoot::new()).with_key(config.storage_key.clone());

        Ok(Self {
            controller,
            appearance,
            themes,
            output: cli.output.into(),
            config,
        })
    }

    fn prefers_dark(&self) -> bool {
        self.appearance.prefers_dark()
    }

    fn load(&mut self) -> Transition {
        let prefers_dark = self.prefers_dark();
        self.load_with(prefers_dark)
    }

    fn load_with(&mut self, prefers_dark: bool) -> Transition {
        Transition::LoadResolve(self.controller.resolve(prefers_dark))
    }

    fn print<T: Serialize>(&self, template: &str, data: &T) -> Result<()> {
        let theme = self.themes.select(self.controller.effective());
        let rendered = render_with_output(template, data, theme, self.output)?;
        println!("{}", rendered);
        Ok(())
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let mut session = Session::new(&cli)?;

    match cli.command {
        Command::Resolve => {
            let transition = session.load();
            session.print(MODE_TEMPLATE, &transition)
        }
        Command::Toggle => {
            session.load();
            let transition = session
                .controller
                .handle(ThemeEvent::Activate(Activation::Click))
                .context("toggle produced no transition")?;
            session.print(MODE_TEMPLATE, &transition)
        }
        Command::Status => {
            session.load();
            let view = StatusView::new(
                session.controller.effective(),
                session.controller.preference(),
                session.appearance.color_mode(),
            );
            println!("{}", render_status(&view, &session.themes, session.output)?);
            Ok(())
        }
        Command::Reset => {
            let prefers_dark = session.prefers_dark();
            let transition = session
                .controller
                .handle(ThemeEvent::Reset { prefers_dark })
                .context("reset produced no transition")?;
            session.print(MODE_TEMPLATE, &transition)
        }
        Command::Watch {
            interval_ms,
            max_polls,
        } => watch(&mut session, interval_ms, max_polls),
        Command::Button { id } => {
            session.load();
            let state = ControlState::for_mode(session.controller.effective());
            if session.output == OutputMode::Json {
                println!("{}", serde_json::to_string_pretty(&state)?);
            } else {
                println!("{}", render_button(&state, &id)?);
            }
            Ok(())
        }
    }
}

fn watch(session: &mut Session, interval_ms: Option<u64>, max_polls: Option<u64>) -> Result<()> {
    let interval = match interval_ms {
        Some(ms) => std::time::Duration::from_millis(ms),
        None => session.config.poll_interval(),
    };

    // One answer feeds both the resolution and the baseline, so a change
    // landing between them is still reported by the first poll.
    let prefers_dark = session.prefers_dark();
    let initial = session.load_with(prefers_dark);
    session.print(TRANSITION_TEMPLATE, &initial)?;

    let mut watcher = AppearanceWatcher::with_baseline(prefers_dark);
    let mut polls = 0u64;
    while max_polls.map_or(true, |max| polls < max) {
        thread::sleep(interval);
        polls += 1;

        let Some(prefers_dark) = watcher.poll(session.appearance.as_ref()) else {
            continue;
        };
        match session
            .controller
            .handle(ThemeEvent::SystemChange { prefers_dark })
        {
            Some(transition) => session.print(TRANSITION_TEMPLATE, &transition)?,
            None => debug!(prefers_dark, "platform changed; stored preference kept"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use themeswitch::{ColorMode, ThemePreference, DEFAULT_STORAGE_KEY};

    /// Answers light for the first `light_calls` queries, dark afterwards.
    struct FlipsToDark {
        calls: Cell<usize>,
        light_calls: usize,
    }

    impl SystemAppearance for FlipsToDark {
        fn prefers_dark(&self) -> bool {
            let n = self.calls.get();
            self.calls.set(n + 1);
            n >= self.light_calls
        }
    }

    fn session(store: MemoryStore, light_calls: usize) -> Session {
        let config = Config::default();
        let store: Box<dyn PreferenceStore> = Box::new(store);
        Session {
            controller: ThemeController::new(store, MemoryRoot::new())
                .with_key(config.storage_key.clone()),
            appearance: Box::new(FlipsToDark {
                calls: Cell::new(0),
                light_calls,
            }),
            themes: AdaptiveTheme::default(),
            output: OutputMode::Text,
            config,
        }
    }

    #[test]
    fn test_watch_follows_change_right_after_load() {
        let mut session = session(MemoryStore::new(), 1);
        watch(&mut session, Some(0), Some(3)).unwrap();
        assert_eq!(session.controller.effective(), ColorMode::Dark);
    }

    #[test]
    fn test_watch_follows_later_change() {
        let mut session = session(MemoryStore::new(), 2);
        watch(&mut session, Some(0), Some(3)).unwrap();
        assert_eq!(session.controller.effective(), ColorMode::Dark);
        assert_eq!(session.controller.preference(), ThemePreference::Unset);
    }

    #[test]
    fn test_watch_keeps_stored_choice() {
        let store = MemoryStore::new().with(DEFAULT_STORAGE_KEY, "light");
        let mut session = session(store, 1);
        watch(&mut session, Some(0), Some(3)).unwrap();
        assert_eq!(session.controller.effective(), ColorMode::Light);
    }
}
