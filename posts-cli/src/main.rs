use std::process;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use posts_client::{HttpClient, PostDetailFetcher, PostListFetcher, PostSource};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

mod logging;
mod render;
mod settings;

use logging::init_logging;
use render::{render_detail, render_list};
use settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "posts-cli", version, about = "CLI для ленты постов блога")]
struct Cli {
    /// Базовый URL коллекции постов (по умолчанию `POSTS_API_URL` или сайт).
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Печатать состояние view в JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Одна страница списка постов.
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Пост по идентификатору.
    Show {
        #[arg(long)]
        id: String,
    },
    /// Интерактивное листание: `n`, `p`, номер страницы, `o <id>`, `q`.
    Browse,
}

#[derive(Debug, PartialEq, Eq)]
enum BrowseCommand {
    Next,
    Previous,
    Page(u32),
    Open(String),
    Quit,
    Unknown(String),
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let settings = Settings::from_env()?;
    init_logging(&settings.log_level)?;

    let config = settings.client_config(cli.api_url);
    debug!(api_url = %config.api_base_url, "using content api");
    let client = HttpClient::new(config).context("не удалось создать HTTP-клиент")?;

    match cli.command {
        Command::List { page } => list(client, page, cli.json).await,
        Command::Show { id } => show(client, &id, cli.json).await,
        Command::Browse => browse(Arc::new(client)).await,
    }
}

async fn list(client: HttpClient, page: u32, json: bool) -> Result<()> {
    let fetcher = PostListFetcher::new(client);
    fetcher.request_page(page).wait().await;
    let state = fetcher.snapshot();

    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        print!("{}", render_list(&state));
    }

    match state.error_message {
        Some(message) => Err(anyhow!(message)),
        None => Ok(()),
    }
}

async fn show(client: HttpClient, id: &str, json: bool) -> Result<()> {
    let fetcher = PostDetailFetcher::new(client);
    if let Some(pending) = fetcher.request_post(id) {
        pending.wait().await;
    }
    let state = fetcher.snapshot();

    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        print!("{}", render_detail(&state));
    }

    match state.error_message {
        Some(message) => Err(anyhow!(message)),
        None => Ok(()),
    }
}

async fn browse<S: PostSource + 'static>(source: Arc<S>) -> Result<()> {
    let list = PostListFetcher::new(Arc::clone(&source));
    let detail = PostDetailFetcher::new(source);

    list.request_page(1).wait().await;
    print!("{}", render_list(&list.snapshot()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("не удалось прочитать stdin")?
    {
        let Some(command) = parse_browse_command(&line) else {
            continue;
        };

        let pending = match command {
            BrowseCommand::Quit => break,
            BrowseCommand::Next => list.go_to_next_page(),
            BrowseCommand::Previous => list.go_to_previous_page(),
            BrowseCommand::Page(page) => Some(list.request_page(page)),
            BrowseCommand::Open(id) => {
                if let Some(pending) = detail.request_post(&id) {
                    pending.wait().await;
                }
                print!("{}", render_detail(&detail.snapshot()));
                continue;
            }
            BrowseCommand::Unknown(raw) => {
                println!("Неизвестная команда: {raw}");
                continue;
            }
        };

        match pending {
            Some(pending) => {
                pending.wait().await;
                print!("{}", render_list(&list.snapshot()));
            }
            None => println!("Переход недоступен."),
        }
    }

    Ok(())
}

fn parse_browse_command(line: &str) -> Option<BrowseCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let command = match line {
        "n" | "next" => BrowseCommand::Next,
        "p" | "prev" => BrowseCommand::Previous,
        "q" | "quit" => BrowseCommand::Quit,
        _ => {
            if let Some(id) = line.strip_prefix("o ") {
                BrowseCommand::Open(id.trim().to_string())
            } else if let Ok(page) = line.parse::<u32>() {
                BrowseCommand::Page(page)
            } else {
                BrowseCommand::Unknown(line.to_string())
            }
        }
    };
    Some(command)
}
