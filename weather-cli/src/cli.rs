use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{CustomType, InquireError, Select, Text};
use weather_now_core::{Config, Controller, OpenMeteoProvider, SearchState};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-now", version, about = "Search a city and show its current weather")]
pub struct Cli {
    /// Log requests and state changes to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search and pick places interactively (default).
    Interactive,

    /// List places matching a city name.
    Search {
        /// City name.
        city: String,
    },

    /// Show current weather for a city.
    Show {
        /// City name.
        city: String,

        /// Which search result to use, starting at 1.
        #[arg(long, default_value_t = 1)]
        pick: usize,
    },

    /// Edit settings (language, result count, timeout).
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;
        tracing::debug!(?config, "loaded configuration");

        match self.command.unwrap_or(Command::Interactive) {
            Command::Interactive => interactive(&config).await,
            Command::Search { city } => {
                let mut controller = controller(&config)?;
                controller.submit_search(&city).await;
                print!("{}", render::render(controller.state()));
                Ok(())
            }
            Command::Show { city, pick } => {
                let mut controller = controller(&config)?;
                controller.submit_search(&city).await;
                if !controller.state().places().is_empty() {
                    let index = pick.checked_sub(1).context("--pick starts at 1")?;
                    if !controller.pick_place(index).await {
                        anyhow::bail!(
                            "--pick {pick} is out of range: the search returned {} place(s)",
                            controller.state().places().len()
                        );
                    }
                }
                print!("{}", render::render(controller.state()));
                Ok(())
            }
            Command::Configure => configure(config),
        }
    }
}

fn controller(config: &Config) -> anyhow::Result<Controller<OpenMeteoProvider>> {
    let provider =
        OpenMeteoProvider::from_config(config).context("Failed to build HTTP client")?;
    Ok(Controller::new(provider))
}

async fn interactive(config: &Config) -> anyhow::Result<()> {
    let mut controller = controller(config)?;
    controller.subscribe(|state: &SearchState| {
        if state.is_loading() {
            println!("{}", render::submit_label(state));
        } else {
            print!("{}", render::render(state));
        }
    });

    println!("{}", render::TITLE);

    loop {
        let query = match Text::new(render::submit_label(controller.state()))
            .with_placeholder(render::SEARCH_PLACEHOLDER)
            .prompt()
        {
            Ok(query) => query,
            Err(e) if is_cancel(&e) => break,
            Err(e) => return Err(e).context("Failed to read search input"),
        };

        controller.submit_search(&query).await;

        let labels: Vec<String> = controller
            .state()
            .places()
            .iter()
            .map(|p| format!("{}  [{}]", p.label(), render::PICK_ACTION))
            .collect();
        if labels.is_empty() {
            continue;
        }

        match Select::new("Pick a place:", labels).raw_prompt() {
            Ok(choice) => {
                controller.pick_place(choice.index).await;
            }
            // Esc goes back to the search prompt.
            Err(InquireError::OperationCanceled) => continue,
            Err(InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read place selection"),
        }
    }

    Ok(())
}

fn is_cancel(e: &InquireError) -> bool {
    matches!(e, InquireError::OperationCanceled | InquireError::OperationInterrupted)
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    config.language = Text::new("Language code for place names:")
        .with_default(&config.language)
        .prompt()?
        .trim()
        .to_string();

    config.result_count = CustomType::<u8>::new("Places per search:")
        .with_default(config.result_count)
        .with_error_message("Please enter a number between 1 and 255")
        .prompt()?;

    config.timeout_secs = CustomType::<u64>::new("Request timeout in seconds (0 = none):")
        .with_default(config.timeout_secs)
        .prompt()?;

    config.validate()?;
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["weather-now"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn show_defaults_to_first_result() {
        let cli = Cli::try_parse_from(["weather-now", "show", "Paris"]).unwrap();
        match cli.command {
            Some(Command::Show { city, pick }) => {
                assert_eq!(city, "Paris");
                assert_eq!(pick, 1);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["weather-now", "search", "Lyon", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Some(Command::Search { .. })));
    }
}
