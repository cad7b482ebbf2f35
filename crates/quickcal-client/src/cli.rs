//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use quickcal_core::ClockZone;

/// quickcal - Add the event on a Fullcast page to Google Calendar
#[derive(Debug, Parser)]
#[command(name = "quickcal")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, global = true, env = "QUICKCAL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Zone for timestamps without an offset: "local", "utc" or "+09:00"
    #[arg(long, global = true)]
    pub zone: Option<ClockZone>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the calendar link for a page, as the button click does
    Link(LinkArgs),

    /// Print the date found on a page
    Extract(ExtractArgs),

    /// Write the page back with the calendar button injected
    Inject(InjectArgs),

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Where the page comes from.
#[derive(Debug, Args)]
pub struct PageArgs {
    /// HTML file to read ("-" or nothing for stdin)
    pub file: Option<PathBuf>,

    /// Address the page was loaded from
    #[arg(long)]
    pub url: String,
}

/// Options for `quickcal link`.
#[derive(Debug, Args)]
pub struct LinkArgs {
    #[command(flatten)]
    pub page: PageArgs,

    /// Event location
    #[arg(long)]
    pub location: Option<String>,

    /// Event end (ISO-like timestamp); defaults to one hour after the start
    #[arg(long)]
    pub end: Option<String>,

    /// Open the link in the default browser
    #[arg(long)]
    pub open: bool,

    /// Copy the link to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// Print the event draft and link as JSON
    #[arg(long)]
    pub json: bool,
}

/// Options for `quickcal extract`.
#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// HTML file to read ("-" or nothing for stdin)
    pub file: Option<PathBuf>,

    /// Print the calendar form (20251101T093000Z) instead of the raw value
    #[arg(long)]
    pub compact: bool,
}

/// Options for `quickcal inject`.
#[derive(Debug, Args)]
pub struct InjectArgs {
    #[command(flatten)]
    pub page: PageArgs,

    /// Write the result here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn link_with_overrides() {
        let cli = parse(&[
            "quickcal",
            "link",
            "page.html",
            "--url",
            "https://fullcast.jp/event/1",
            "--location",
            "渋谷",
            "--end",
            "2025-11-01T12:00:00Z",
            "--copy",
        ]);

        let Command::Link(args) = cli.command else {
            panic!("expected link command");
        };
        assert_eq!(args.page.file, Some(PathBuf::from("page.html")));
        assert_eq!(args.page.url, "https://fullcast.jp/event/1");
        assert_eq!(args.location.as_deref(), Some("渋谷"));
        assert_eq!(args.end.as_deref(), Some("2025-11-01T12:00:00Z"));
        assert!(args.copy);
        assert!(!args.open);
        assert!(!args.json);
    }

    #[test]
    fn link_requires_url() {
        assert!(Cli::try_parse_from(["quickcal", "link", "page.html"]).is_err());
    }

    #[test]
    fn file_defaults_to_stdin() {
        let cli = parse(&["quickcal", "inject", "--url", "https://fullcast.jp/"]);
        let Command::Inject(args) = cli.command else {
            panic!("expected inject command");
        };
        assert!(args.page.file.is_none());
        assert!(args.output.is_none());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["quickcal", "extract", "page.html", "--zone", "+09:00", "--debug"]);
        assert!(cli.debug);
        assert_eq!(cli.zone, Some("+09:00".parse().unwrap()));
        assert!(matches!(cli.command, Command::Extract(ExtractArgs { compact: false, .. })));
    }

    #[test]
    fn invalid_zone_is_rejected() {
        assert!(Cli::try_parse_from(["quickcal", "--zone", "mars", "extract"]).is_err());
    }

    #[test]
    fn config_subcommands() {
        let cli = parse(&["quickcal", "config", "path"]);
        assert!(matches!(
            cli.command,
            Command::Config {
                action: ConfigAction::Path
            }
        ));
    }
}
