//! Command-line surface and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use clausewise_store::Latency;

#[derive(Debug, Parser)]
#[command(name = "clausewise", version, about = "Browse and inspect a contract portfolio")]
pub struct Cli {
    /// Path to the contracts JSON file.
    #[arg(long, env = "CLAUSEWISE_DATA", default_value = "data/contracts.json", global = true)]
    pub data: PathBuf,

    /// Fetch `<URL>/contracts.json` over HTTP instead of reading --data.
    #[arg(long, env = "CLAUSEWISE_URL", global = true)]
    pub url: Option<String>,

    /// Where the login session is kept between invocations.
    #[arg(
        long,
        env = "CLAUSEWISE_SESSION",
        default_value = ".clausewise/session.json",
        global = true
    )]
    pub session_file: PathBuf,

    /// Simulated source latency in milliseconds.
    #[arg(long, env = "CLAUSEWISE_LATENCY_MS", default_value_t = 0, global = true)]
    pub latency_ms: u64,

    /// Use the hosted demo's delays (500 ms list, 300 ms lookup).
    #[arg(long, global = true, conflicts_with = "latency_ms")]
    pub demo_latency: bool,

    /// Disable ANSI colours.
    #[arg(
        long,
        env = "NO_COLOR",
        global = true,
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in with the demo credentials.
    Login {
        #[arg(long, short)]
        username: String,
        #[arg(long, short, env = "CLAUSEWISE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the saved session.
    Logout,
    /// Show the logged-in user.
    Whoami,
    /// List contracts with optional search, facet filters and paging.
    List {
        /// Case-insensitive match against name and parties.
        #[arg(long, short)]
        search: Option<String>,
        /// Status to include (repeatable): active, renewal-due, expired.
        #[arg(long = "status", value_name = "STATUS")]
        statuses: Vec<String>,
        /// Risk to include (repeatable): low, medium, high.
        #[arg(long = "risk", value_name = "RISK")]
        risks: Vec<String>,
        /// Page to show; out-of-range pages are clamped.
        #[arg(long, short, default_value_t = 1)]
        page: usize,
        /// Print every page instead of one.
        #[arg(long, conflicts_with = "page")]
        all: bool,
    },
    /// Show one contract's clauses, insights and evidence.
    Show {
        id: String,
        /// Expand the Nth evidence item (1-based).
        #[arg(long, value_name = "N")]
        evidence: Option<usize>,
    },
    /// Count contracts per status and risk.
    Facets,
    /// Upload contract documents to the simulated sink.
    Upload {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Simulated transfer time per file.
        #[arg(long, default_value_t = 2000)]
        delay_ms: u64,
        /// Probability that a simulated upload succeeds.
        #[arg(long, default_value_t = 0.9)]
        success_rate: f64,
    },
}

impl Cli {
    pub fn latency(&self) -> Latency {
        if self.demo_latency {
            Latency::demo()
        } else if self.latency_ms == 0 {
            Latency::NONE
        } else {
            Latency::uniform(Duration::from_millis(self.latency_ms))
        }
    }
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
    fn list_collects_repeated_facets() {
        let cli = Cli::try_parse_from([
            "clausewise",
            "list",
            "--status",
            "expired",
            "--status",
            "active",
            "--risk",
            "high",
            "-s",
            "acme",
            "--page",
            "2",
        ])
        .unwrap();
        match cli.command {
            Command::List {
                search,
                statuses,
                risks,
                page,
                all,
            } => {
                assert_eq!(search.as_deref(), Some("acme"));
                assert_eq!(statuses, vec!["expired", "active"]);
                assert_eq!(risks, vec!["high"]);
                assert_eq!(page, 2);
                assert!(!all);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "clausewise",
            "show",
            "ctr-001",
            "--data",
            "/tmp/c.json",
            "--latency-ms",
            "250",
        ])
        .unwrap();
        assert_eq!(cli.data, PathBuf::from("/tmp/c.json"));
        assert_eq!(cli.latency(), Latency::uniform(Duration::from_millis(250)));
    }

    #[test]
    fn demo_latency_uses_hosted_delays() {
        let cli = Cli::try_parse_from(["clausewise", "facets", "--demo-latency"]).unwrap();
        assert_eq!(cli.latency(), Latency::demo());
        let plain = Cli::try_parse_from(["clausewise", "facets"]).unwrap();
        assert_eq!(plain.latency(), Latency::NONE);
    }

    #[test]
    fn no_color_env_accepts_conventional_values() {
        // SAFETY: no other test reads or writes NO_COLOR expecting a
        // particular value; any value it could see parses.
        unsafe { std::env::set_var("NO_COLOR", "1") };
        let cli = Cli::try_parse_from(["clausewise", "whoami"]);
        unsafe { std::env::remove_var("NO_COLOR") };
        assert!(cli.unwrap().no_color);
    }

    #[test]
    fn upload_requires_files() {
        assert!(Cli::try_parse_from(["clausewise", "upload"]).is_err());
    }
}
