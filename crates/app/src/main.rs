use clap::Parser;
use engine::{Calculator, EntryLog, Home, JsonFileStorage, Key, Notice, Notifier};

use crate::{
    config::{AppConfig, Cli, Command, HomeCommand},
    error::Result,
    terminal::{FileClipboard, StdoutClipboard, TerminalNotifier},
};

mod config;
mod error;
mod keypad;
mod terminal;

type HomeScreen = Home<JsonFileStorage, TerminalNotifier>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = config::load(cli.overrides)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "spendbook={level},engine={level}",
            level = settings.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let notifier = TerminalNotifier::new(cli.yes);
    let ok = match cli.command {
        Command::Calc { expression } => calc(expression, &notifier)?,
        Command::Home(command) => {
            let mut home = home_screen(&settings, notifier)?;
            open_and_run(&mut home, command).await
        }
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

fn home_screen(settings: &AppConfig, notifier: TerminalNotifier) -> Result<HomeScreen> {
    tracing::debug!("storing entries under {}", settings.data_dir);
    let log = EntryLog::builder(JsonFileStorage::new(&settings.data_dir))
        .timezone(settings.timezone()?)
        .build();
    Ok(Home::new(log, notifier).with_currency_symbol(settings.currency_symbol.clone()))
}

/// Loads the stored entries, then runs `command`.
///
/// Every run starts from an empty log, so after a failed load an `add` or
/// `remove` would replace a collection that was never read. Those are
/// refused; `clear` still runs since it drops the stored collection anyway.
async fn open_and_run(home: &mut HomeScreen, command: HomeCommand) -> bool {
    if !home.load_entries().await && command.rewrites_log() {
        tracing::error!("stored entries could not be read, leaving them untouched");
        return false;
    }
    run_home(home, command).await
}

async fn run_home(home: &mut HomeScreen, command: HomeCommand) -> bool {
    match command {
        HomeCommand::Add { name, cost } => {
            home.name = name;
            home.cost = cost;
            home.add_entry().await
        }
        HomeCommand::List { filter } => {
            home.set_filter(filter.unwrap_or_default());
            print_view(home);
            true
        }
        HomeCommand::Remove { id } => {
            let Some(entry) = find_entry(home, &id) else {
                return false;
            };
            home.remove_entry(&entry).await
        }
        HomeCommand::Clear => home.remove_all().await,
        HomeCommand::Export { filter, output } => {
            home.set_filter(filter.unwrap_or_default());
            match output {
                Some(path) => home.copy_records(&FileClipboard::new(path)).await,
                None => home.copy_records(&StdoutClipboard).await,
            }
        }
    }
}

fn find_entry(home: &HomeScreen, prefix: &str) -> Option<engine::Entry> {
    let mut matches = home
        .entries()
        .iter()
        .filter(|entry| entry.id.to_string().starts_with(prefix));
    let notifier = TerminalNotifier::new(false);

    match (matches.next(), matches.next()) {
        (Some(entry), None) => Some(entry.clone()),
        (Some(_), _) => {
            notifier.notify(&Notice::new(
                "Error",
                format!("\"{prefix}\" matches more than one entry"),
            ));
            None
        }
        (None, _) => {
            notifier.notify(&Notice::new("Error", format!("No entry with id \"{prefix}\"")));
            None
        }
    }
}

fn print_view(home: &HomeScreen) {
    let view = home.grouped_view();
    if view.is_empty() {
        println!("No entries.");
        return;
    }

    let symbol = home.currency_symbol();
    for group in &view {
        println!("{}  ({symbol} {:.2})", group.key, group.total());
        for entry in &group.entries {
            println!(
                "  {:<24} {symbol} {:>10.2}  {}",
                entry.name, entry.cost, entry.id
            );
        }
    }
}

fn calc(expression: Option<String>, notifier: &TerminalNotifier) -> Result<bool> {
    let mut calculator = Calculator::new();
    let Some(expression) = expression else {
        keypad::run(&mut calculator, notifier)?;
        return Ok(true);
    };

    for token in expression.chars().filter(|ch| !ch.is_whitespace()) {
        if let Err(err) = calculator.append(token) {
            notifier.notify(&Notice::new("Error", err.to_string()));
            return Ok(false);
        }
    }
    if !calculator.press_and_notify(Key::Equals, notifier) {
        return Ok(false);
    }
    println!("{}", calculator.result());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;

    const TRUNCATED: &str = r#"[{"name":"Milk","cost":40,"date":"2024-01-05T09:00:00.000Z"},{"name":"Bus""#;

    fn data_dir(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../target/test_data")
            .join(format!("{name}-{}", std::process::id()))
    }

    fn settings_for(dir: &Path) -> AppConfig {
        AppConfig {
            data_dir: dir.to_string_lossy().into_owned(),
            timezone: "UTC".to_string(),
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn unreadable_log_is_not_overwritten() {
        let dir = data_dir("unreadable-log");
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("entries.json");
        std::fs::write(&file, TRUNCATED).unwrap();

        let settings = settings_for(&dir);
        let mut home = home_screen(&settings, TerminalNotifier::new(true)).unwrap();
        let add = HomeCommand::Add {
            name: "Tea".to_string(),
            cost: "2".to_string(),
        };
        assert!(!open_and_run(&mut home, add).await);

        let mut home = home_screen(&settings, TerminalNotifier::new(true)).unwrap();
        let remove = HomeCommand::Remove {
            id: String::new(),
        };
        assert!(!open_and_run(&mut home, remove).await);

        assert_eq!(std::fs::read_to_string(&file).unwrap(), TRUNCATED);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn readable_log_accepts_additions() {
        let dir = data_dir("readable-log");
        let settings = settings_for(&dir);

        let mut home = home_screen(&settings, TerminalNotifier::new(true)).unwrap();
        let add = HomeCommand::Add {
            name: "Tea".to_string(),
            cost: "2".to_string(),
        };
        assert!(open_and_run(&mut home, add).await);
        assert_eq!(home.entries().len(), 1);

        let stored = std::fs::read_to_string(dir.join("entries.json")).unwrap();
        assert!(stored.contains("Tea"));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
