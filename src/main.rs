use clap::{Parser, Subcommand};
use dialoguer::{Confirm, Input};
use show_details::{
    ApiConfig, DEFAULT_BASE_URL, DetailsLoader, Episode, RowKind, ScreenEvent, ScreenInput,
    Session, SessionStore, ShowDetailsError, ShowsApi, open_show_details,
};
use std::process;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Browse a TV show's details and episodes from the TV Shows API
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Log API requests and state changes to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Remember an auth token for later runs
    Login {
        /// Token sent as the Authorization header
        #[arg(long)]
        token: String,

        /// API root the token belongs to
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Forget the remembered auth token
    Logout,

    /// Show a TV show's details and episode list
    Show {
        /// Identifier of the show to open
        show_id: String,

        /// Token to use instead of the remembered one
        #[arg(long)]
        token: Option<String>,

        /// API root to use instead of the remembered one
        #[arg(long)]
        base_url: Option<String>,

        /// Request timeout in seconds
        #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
        timeout: u64,

        /// Prompt for new episodes after the list is shown
        #[arg(long)]
        add: bool,
    },
}

/// Handles screen events and prints them to stderr
fn handle_screen_event(event: ScreenEvent) {
    match event {
        ScreenEvent::LoadingChanged(state) => {
            if state.is_loading() {
                eprintln!("Loading...");
            }
        }
        ScreenEvent::ListChanged { row_count } => {
            tracing::debug!(row_count, "list changed");
        }
        ScreenEvent::Alert { title, message } => {
            eprintln!("\n{}: {}", title, message);
        }
    }
}

/// Prints every row of the list to stdout
fn render<A: ShowsApi>(loader: &DetailsLoader<A>) {
    let rows = loader.rows();

    if rows.is_empty() {
        println!("\nThis show has no episodes yet.");
        return;
    }

    println!();
    for row in rows {
        match row {
            RowKind::Image(item) => {
                if item.url.is_empty() {
                    println!("[no image]");
                } else {
                    println!("[image: {}]", item.url);
                }
            }
            RowKind::Description(Some(item)) => {
                println!("\n=== {} ===", item.title);
                println!("{}", item.description);
                println!("\nEpisodes ({})", item.number_of_episodes);
            }
            RowKind::Description(None) => {
                println!("\n(show details unavailable)");
            }
            RowKind::Episode(item) => {
                println!("  {:<7} {}", item.details, item.title);
            }
        }
    }
}

/// Asks for new episodes until the user declines
fn add_episodes<A: ShowsApi>(loader: &mut DetailsLoader<A>) -> Result<(), dialoguer::Error> {
    while Confirm::new()
        .with_prompt("Add an episode?")
        .default(false)
        .interact()?
    {
        let title: String = Input::new()
            .with_prompt("Title")
            .allow_empty(true)
            .interact_text()?;
        let image_url: String = Input::new()
            .with_prompt("Image URL")
            .allow_empty(true)
            .interact_text()?;

        let episode = Episode {
            show_id: loader.input().show_id.clone(),
            title,
            image_url: (!image_url.is_empty()).then_some(image_url),
        };

        loader.add_episode(episode, handle_screen_event);
        render(loader);
    }

    Ok(())
}

fn open_session_store() -> SessionStore {
    SessionStore::open().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    })
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Login { token, base_url } => {
            let store = open_session_store();
            if let Err(e) = store.store(&Session { token, base_url }) {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
            println!("Session saved to {}", store.dir().display());
        }
        Command::Logout => {
            if let Err(e) = open_session_store().clear() {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
            println!("Logged out.");
        }
        Command::Show {
            show_id,
            token,
            base_url,
            timeout,
            add,
        } => {
            let session = SessionStore::open()
                .and_then(|store| store.load())
                .unwrap_or_else(|e| {
                    tracing::warn!("ignoring stored session: {}", e);
                    None
                });

            let Some(auth_token) = token.or_else(|| session.as_ref().map(|s| s.token.clone()))
            else {
                eprintln!("Error: No auth token. Pass --token or run `show-details login` first.");
                process::exit(2);
            };

            let base_url = base_url
                .or_else(|| session.and_then(|s| s.base_url))
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

            let input = ScreenInput {
                show_id,
                auth_token,
            };
            let config = ApiConfig {
                base_url,
                timeout: Duration::from_secs(timeout),
            };

            let mut loader = match open_show_details(input, config, handle_screen_event) {
                Ok(loader) => loader,
                // The alert event already told the user about a failed load
                Err(ShowDetailsError::Load(_)) => process::exit(1),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            };

            render(&loader);

            if add {
                if let Err(e) = add_episodes(&mut loader) {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_defaults() {
        let cli = Cli::try_parse_from(["show-details", "show", "42"]).unwrap();

        let Command::Show {
            show_id,
            token,
            timeout,
            add,
            ..
        } = cli.command
        else {
            panic!("expected the show command");
        };
        assert_eq!(show_id, "42");
        assert_eq!(token, None);
        assert_eq!(timeout, 30);
        assert!(!add);
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let result = Cli::try_parse_from(["show-details", "show", "42", "--timeout", "0"]);

        assert!(result.is_err());
    }

    #[test]
    fn test_positive_timeout_is_accepted() {
        let cli = Cli::try_parse_from(["show-details", "show", "42", "--timeout", "1"]).unwrap();

        assert!(matches!(cli.command, Command::Show { timeout: 1, .. }));
    }
}
