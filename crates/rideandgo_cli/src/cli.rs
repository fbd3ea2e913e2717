use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rideandgo_i18n::Locale;
use rideandgo_theme::ColorScheme;

#[derive(Parser)]
#[command(name = "rideandgo")]
#[command(version)]
#[command(about = "Inspect and change RideAndGo preferences", long_about = None)]
pub struct Cli {
    /// Config file, or a directory containing rideandgo.toml
    #[arg(long, short, global = true, default_value = ".")]
    pub config: PathBuf,

    /// Preference file to use instead of the configured one
    #[arg(long, global = true)]
    pub storage: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show or change the color scheme
    Theme {
        #[command(subcommand)]
        command: ThemeCommands,
    },
    /// Show or change the interface language
    Locale {
        #[command(subcommand)]
        command: LocaleCommands,
    },
    /// Translate a catalog key
    Tr {
        /// Catalog key, e.g. `whereToGo`
        key: String,
        /// Translate in this locale instead of the stored one
        #[arg(long, short)]
        locale: Option<Locale>,
        /// Placeholder value as `name=value` (repeatable)
        #[arg(long = "arg", short = 'a', value_parser = parse_arg)]
        args: Vec<(String, String)>,
    },
    /// Quote a trip between two addresses
    Fare {
        /// Pickup address
        from: String,
        /// Destination address
        to: String,
    },
    /// Print the effective configuration
    Config,
}

#[derive(Subcommand)]
pub enum ThemeCommands {
    /// Print the current scheme
    Get,
    /// Choose a scheme explicitly
    Set {
        /// `light` or `dark`
        scheme: ColorScheme,
    },
    /// Switch between light and dark
    Toggle,
    /// Follow the system scheme
    System,
}

#[derive(Subcommand)]
pub enum LocaleCommands {
    /// Print the current locale
    Get,
    /// Change the locale; unsupported tags are ignored
    Set {
        /// Locale tag, e.g. `fr`
        tag: String,
    },
}

fn parse_arg(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected `name=value`, got `{s}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing placeholder name in `{s}`"));
    }
    Ok((name.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_theme_set() {
        let cli = Cli::try_parse_from(["rideandgo", "theme", "set", "dark"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Theme {
                command: ThemeCommands::Set {
                    scheme: ColorScheme::Dark
                }
            }
        ));
    }

    #[test]
    fn rejects_unknown_scheme() {
        assert!(Cli::try_parse_from(["rideandgo", "theme", "set", "blue"]).is_err());
    }

    #[test]
    fn parses_translation_args() {
        let cli = Cli::try_parse_from([
            "rideandgo",
            "tr",
            "fareSummary",
            "--locale",
            "fr",
            "-a",
            "fare=12.50",
        ])
        .unwrap();
        let Commands::Tr { key, locale, args } = cli.command else {
            panic!("expected tr");
        };
        assert_eq!(key, "fareSummary");
        assert_eq!(locale, Some(Locale::Fr));
        assert_eq!(args, vec![("fare".to_string(), "12.50".to_string())]);
    }

    #[test]
    fn arg_without_equals_is_rejected() {
        assert!(parse_arg("fare").is_err());
        assert!(parse_arg("=12").is_err());
        assert_eq!(parse_arg("x=a=b").unwrap(), ("x".into(), "a=b".into()));
    }
}
