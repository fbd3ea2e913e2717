use anyhow::{Context, Result};
use rideandgo_app::{open_storage, AppConfig, AppPreferences, HostEnvironment};
use rideandgo_geo::{quote_trip, HttpGeoService};
use rideandgo_i18n::{builtin_catalog, use_translation, Locale, Message};
use rideandgo_theme::use_theme;

use crate::cli::{Commands, LocaleCommands, ThemeCommands};

pub async fn run(command: Commands, config: AppConfig) -> Result<()> {
    let host = HostEnvironment::detect();
    let prefs = AppPreferences::initialize(open_storage(&config), &config, &host).await;
    let _scope = prefs.provide();

    match command {
        Commands::Theme { command } => theme(command),
        Commands::Locale { command } => locale(command),
        Commands::Tr { key, locale, args } => translate(&key, locale, args),
        Commands::Fare { from, to } => fare(&config, &from, &to).await?,
        Commands::Config => print!("{}", config.to_toml()?),
    }

    prefs.flush().await;
    Ok(())
}

fn theme(command: ThemeCommands) {
    let theme = use_theme();
    match command {
        ThemeCommands::Get => {}
        ThemeCommands::Set { scheme } => theme.set_scheme(scheme),
        ThemeCommands::Toggle => theme.toggle_scheme(),
        ThemeCommands::System => theme.use_system_theme(),
    }

    let t = use_translation();
    let scheme = theme.scheme().to_string();
    let mut line = format!("{}: {}", t.t("theme"), t.t(&scheme));
    if theme.is_system_theme() {
        line.push_str(&format!(" ({})", t.t("systemTheme")));
    }
    println!("{line}");
}

fn locale(command: LocaleCommands) {
    let locale = use_translation();
    if let LocaleCommands::Set { tag } = command {
        if !locale.set_tag(tag.trim()) {
            eprintln!("unsupported locale `{tag}`; keeping {}", locale.current());
        }
    }
    println!(
        "{}: {} ({})",
        locale.t("language"),
        locale.current().display_name(),
        locale.current()
    );
}

fn translate(key: &str, locale: Option<Locale>, args: Vec<(String, String)>) {
    let msg = args
        .into_iter()
        .fold(Message::new(key.to_string()), |msg, (name, value)| {
            msg.arg(name, value)
        });
    let text = match locale {
        Some(locale) => builtin_catalog(locale)
            .format_message(&msg)
            .unwrap_or_else(|| key.to_string()),
        None => use_translation().tr(&msg),
    };
    println!("{text}");
}

async fn fare(config: &AppConfig, from: &str, to: &str) -> Result<()> {
    let service =
        HttpGeoService::new(config.geo.clone()).context("Failed to create the HTTP client")?;
    let quote = quote_trip(&service, &config.fare, from, to)
        .await
        .with_context(|| format!("Failed to quote a trip from `{from}` to `{to}`"))?;

    let t = use_translation();
    if quote.route.approximate {
        eprintln!("{}", t.t("routeApproximate"));
    }
    println!(
        "{}",
        t.tr(&Message::new("routeSummary")
            .arg("distance", quote.route.distance_km)
            .arg("duration", quote.route.duration_min))
    );
    println!(
        "{}",
        t.tr(&Message::new("fareSummary").arg("fare", format!("{:.2}", quote.fare.fare)))
    );
    Ok(())
}
