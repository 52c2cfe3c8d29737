use anyhow::Context;
use apicall_core::{
    ApiAdapter, Config, ReqwestTransport, Scripts,
    service::{github, watson},
};
use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;

use crate::configure;

/// Phrases translated when none are given on the command line.
const SAMPLE_PHRASES: [&str; 5] = [
    "hello",
    "goodbye",
    "we are learning",
    "what is for dinner?",
    "time for a coffee",
];

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "apicall", version, about = "Small console clients for a few public APIs")]
pub struct Cli {
    /// More log output on stderr (-v, -vv, -vvv). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List a GitHub user's repositories.
    Repos {
        /// GitHub user name.
        user: String,

        /// Sort order: created, updated, pushed or full_name.
        #[arg(long, default_value = github::DEFAULT_SORT)]
        sort: String,
    },

    /// Show a week of weather for this machine's location.
    Weather,

    /// Translate phrases with Watson.
    Translate {
        /// Phrases to translate; a few samples are used if none are given.
        texts: Vec<String>,

        /// Translation model id.
        #[arg(long, default_value = watson::DEFAULT_MODEL)]
        model: String,
    },

    /// Store credentials for a service in the config file.
    Configure {
        /// Service short name: github, ipstack, darksky or watson.
        service: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();

        match self.command {
            Command::Repos { user, sort } => {
                scripts()?.list_repos(&user, &sort, &mut out).await?;
            }
            Command::Weather => {
                scripts()?.weekly_forecast(&mut out).await?;
            }
            Command::Translate { texts, model } => {
                let scripts = scripts()?;
                if texts.is_empty() {
                    scripts.translate(SAMPLE_PHRASES.as_slice(), &model, &mut out).await?;
                } else {
                    scripts.translate(texts.as_slice(), &model, &mut out).await?;
                }
            }
            Command::Configure { service } => configure::run(&service)?,
        }

        Ok(())
    }
}

fn scripts() -> anyhow::Result<Scripts<ReqwestTransport>> {
    scripts_from(Config::load()?)
}

fn scripts_from(config: Config) -> anyhow::Result<Scripts<ReqwestTransport>> {
    debug!(timeout = ?config.timeout(), "configuration loaded");

    let transport =
        ReqwestTransport::from_config(&config).context("Failed to build HTTP client")?;

    Ok(Scripts::new(ApiAdapter::new(transport), config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repos_defaults_to_created_sort() {
        let cli = Cli::try_parse_from(["apicall", "repos", "jensen"]).unwrap();

        match cli.command {
            Command::Repos { user, sort } => {
                assert_eq!(user, "jensen");
                assert_eq!(sort, "created");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn translate_collects_texts_and_model() {
        let cli = Cli::try_parse_from(["apicall", "-vv", "translate", "hi", "bye", "--model", "en-fr"])
            .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Translate { texts, model } => {
                assert_eq!(texts, vec!["hi", "bye"]);
                assert_eq!(model, "en-fr");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn translate_without_texts_uses_default_model() {
        let cli = Cli::try_parse_from(["apicall", "translate"]).unwrap();

        match cli.command {
            Command::Translate { texts, model } => {
                assert!(texts.is_empty());
                assert_eq!(model, watson::DEFAULT_MODEL);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn repos_requires_user() {
        assert!(Cli::try_parse_from(["apicall", "repos"]).is_err());
    }

    #[test]
    fn timeout_env_reaches_the_transport() {
        use apicall_core::config::TIMEOUT_ENV_VAR;
        use std::time::Duration;

        let config = Config::default()
            .with_env([(TIMEOUT_ENV_VAR.to_string(), "3".to_string())])
            .unwrap();
        let scripts = scripts_from(config).unwrap();

        assert_eq!(scripts.adapter().transport().timeout(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn no_timeout_configured_means_none() {
        let scripts = scripts_from(Config::default()).unwrap();
        assert_eq!(scripts.adapter().transport().timeout(), None);
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
