use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::*;
use flexi_logger::{FileSpec, Logger};
use log::{error, info};
use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc::UnboundedReceiver;

mod app;
use app::App;

mod config;
use config::Config;

mod debounce;
use debounce::Debouncer;

mod error;
mod favorites;

mod market;
use market::CoinGecko;

mod router;
use router::{detail_location, Location, Page, FAVORITES_PAGE, LISTING_PAGE};

mod screen;
use screen::{Element, Screen, TerminalScreen};

mod store;
use store::FileStore;

mod view;
use view::RowAction;

type Board = App<CoinGecko, FileStore>;

#[tokio::main]
async fn main() -> Result<()> {
    let home_dir = dirs_next::home_dir().context("Could not find home directory")?;
    let config_dir = home_dir.join(".coinboard/");
    let config_src = config_dir.join("config.json");
    std::fs::create_dir_all(&config_dir)?;

    let _logger = Logger::try_with_env_or_str("info")?
        .log_to_file(FileSpec::default().directory(&config_dir))
        .start()?;

    let config = load_config(&config_src)?;
    let store = FileStore::new(config_dir.join("storage.json"));
    let mut app = App::new(CoinGecko::new(&config.api_url)?, store);

    match std::env::args().nth(1) {
        Some(location) => run_once(&mut app, &config, &location).await,
        None => interactive(&mut app, &config).await,
    }
}

/// Load or setup new config
fn load_config(config_src: &Path) -> Result<Config> {
    match std::fs::read_to_string(config_src) {
        Ok(file) => Ok(serde_json::from_str(&file)?),
        Err(_e) => {
            println!("Creating new config file");
            let mut c = Config::default();
            if std::io::stdin().is_terminal() {
                c.api_url = Input::new()
                    .with_prompt("Market data API url")
                    .default(c.api_url.clone())
                    .interact_text()?;
            }
            serde_json::to_writer(&std::fs::File::create(config_src)?, &c)?;
            println!("Successfully created new config file!");
            info!("created config at {}", config_src.display());
            Ok(c)
        }
    }
}

/// Flow failures are logged; whatever the screen last showed stays up.
fn report(result: error::Result<()>) {
    if let Err(e) = result {
        error!("{}", e);
    }
}

async fn run_once(app: &mut Board, config: &Config, location: &str) -> Result<()> {
    let location = Location::parse(location);
    let mut screen = TerminalScreen::for_page(Page::route(&location));
    report(app.on_ready(&mut screen, &location).await.map(|_| ()));

    if screen.contains(Element::SearchInput) && !std::io::stdin().is_terminal() {
        search_from_stdin(app, config, &mut screen).await?;
    }
    Ok(())
}

/// Every stdin line is one input event on the search box.
async fn search_from_stdin(
    app: &mut Board,
    config: &Config,
    screen: &mut TerminalScreen,
) -> Result<()> {
    let (mut debouncer, mut queries) = Debouncer::new(config.debounce());
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => debouncer.trigger(line),
                None => break,
            },
            Some(query) = queries.recv() => report(app.search(screen, &query).await),
        }
    }

    // input closed, let the last quiet period run out
    tokio::time::sleep(config.debounce() + Duration::from_millis(50)).await;
    while let Ok(query) = queries.try_recv() {
        report(app.search(screen, &query).await);
    }
    Ok(())
}

enum Choice {
    Row(usize),
    Search,
    Goto(String),
    Quit,
}

async fn interactive(app: &mut Board, config: &Config) -> Result<()> {
    // CLI options
    let items = vec!["Market listing", "Favorites", "Coin details", "Show config"];
    let selection = Select::with_theme(&ColorfulTheme::default())
        .items(&items)
        .default(0)
        .interact()?;

    let mut location = match selection {
        0 => LISTING_PAGE.to_string(),
        1 => FAVORITES_PAGE.to_string(),
        2 => {
            let id: String = Input::new()
                .with_prompt("Coin id: bitcoin, ethereum, dogecoin")
                .interact_text()?;
            detail_location(id.trim())
        }
        3 => {
            println!("{}", &config);
            println!(" favorites: {:?}", app.favorites().list()?);
            return Ok(());
        }
        _ => {
            panic!("Unknown command")
        }
    };

    let (mut debouncer, mut queries) = Debouncer::new(config.debounce());
    loop {
        let parsed = Location::parse(&location);
        let page = Page::route(&parsed);
        let mut screen = TerminalScreen::for_page(page);
        report(app.on_ready(&mut screen, &parsed).await.map(|_| ()));

        match pick(app, &mut screen, page, &mut debouncer, &mut queries).await? {
            Some(next) => location = next,
            None => return Ok(()),
        }
    }
}

/// Menu over the rendered page. Returns the next location, or `None` to quit.
async fn pick(
    app: &mut Board,
    screen: &mut TerminalScreen,
    page: Option<Page>,
    debouncer: &mut Debouncer<String>,
    queries: &mut UnboundedReceiver<String>,
) -> Result<Option<String>> {
    loop {
        let mut choices: Vec<(String, Choice)> = screen
            .rows()
            .iter()
            .enumerate()
            .map(|(idx, row)| (row.to_string(), Choice::Row(idx)))
            .collect();
        if screen.contains(Element::SearchInput) {
            choices.push(("Search".to_string(), Choice::Search));
        }
        if page != Some(Page::Listing) {
            choices.push(("Market listing".to_string(), Choice::Goto(LISTING_PAGE.to_string())));
        }
        if page != Some(Page::Favorites) {
            choices.push(("Favorites".to_string(), Choice::Goto(FAVORITES_PAGE.to_string())));
        }
        choices.push(("Quit".to_string(), Choice::Quit));

        let labels: Vec<&str> = choices.iter().map(|(label, _)| label.as_str()).collect();
        let selection = Select::with_theme(&ColorfulTheme::default())
            .items(&labels)
            .default(0)
            .interact()?;

        match &choices[selection].1 {
            Choice::Row(idx) => {
                let row = screen.rows()[*idx].clone();
                let actions = ["View details", row.action.label(), "Back"];
                let action = Select::with_theme(&ColorfulTheme::default())
                    .with_prompt(row.to_string())
                    .items(&actions)
                    .default(0)
                    .interact()?;
                match action {
                    0 => return Ok(Some(row.link)),
                    1 => match row.action {
                        RowAction::AddFavorite => match app.add_to_favorites(&row.id) {
                            Ok(outcome) => println!("{}", outcome.message().green()),
                            Err(e) => error!("{}", e),
                        },
                        RowAction::RemoveFavorite => {
                            report(app.remove_from_favorites(screen, &row.id).await)
                        }
                    },
                    _ => (),
                }
            }
            Choice::Search => {
                let query: String = Input::new()
                    .with_prompt("Search")
                    .allow_empty(true)
                    .interact_text()?;
                debouncer.trigger(query);
                if let Some(query) = queries.recv().await {
                    report(app.search(screen, &query).await);
                }
            }
            Choice::Goto(next) => return Ok(Some(next.clone())),
            Choice::Quit => return Ok(None),
        }
    }
}
