//! `preflight`: validates deployment variables before a file-server rollout.
//!
//! Exit codes: `0` every selected rule passed, `1` at least one rule failed,
//! `2` the variables could not be loaded (or the command line is invalid).

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use preflight_config::{ConfigBuilder, MergeStrategy};
use preflight_log::{Config as LogConfig, LoggerBuilder};
use preflight_rules::{Plan, Role, catalogue, validate};
use preflight_validator::prelude::{Report, RuleKind, Selection, Tag, Validator};
use serde::Serialize;

const EXIT_LOAD_ERROR: u8 = 2;

/// Preflight: configuration contracts for a Kerberized Samba/NFS file server
///
/// Checks every role's variables before anything touches a host, and
/// explains each violation.
#[derive(Parser, Debug)]
#[command(name = "preflight")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate variables files and print the report
    #[command(alias = "validate")]
    Check {
        /// Variables file (YAML or JSON). Repeat to layer files; later ones win
        #[arg(long = "vars", value_name = "FILE", required = true)]
        vars: Vec<PathBuf>,

        /// How a later file combines with earlier ones: replace or merge
        #[arg(long, value_name = "STRATEGY", default_value = "replace")]
        merge: MergeStrategy,

        /// Report format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        #[command(flatten)]
        select: SelectArgs,
    },

    /// List the rules that would run, without evaluating them
    #[command(alias = "ls")]
    Rules {
        /// Listing format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        #[command(flatten)]
        select: SelectArgs,
    },
}

#[derive(Args, Debug)]
struct SelectArgs {
    /// Role being deployed (kerberos-client, shares, samba, nfs-server).
    /// Repeat for several; defaults to every role
    #[arg(long = "role", value_name = "ROLE")]
    roles: Vec<Role>,

    /// Only run rules carrying one of these tags
    #[arg(long, value_name = "TAG", value_delimiter = ',')]
    tags: Vec<String>,

    /// Skip rules carrying any of these tags
    #[arg(long = "skip-tags", value_name = "TAG", value_delimiter = ',')]
    skip_tags: Vec<String>,
}

impl SelectArgs {
    fn plan(&self) -> Plan {
        Plan::from_roles(self.roles.iter().copied())
    }

    fn validator(&self) -> Validator {
        let selection = self
            .tags
            .iter()
            .fold(Selection::all(), |selection, tag| selection.include(tag.clone()));
        let selection = self
            .skip_tags
            .iter()
            .fold(selection, |selection, tag| selection.exclude(tag.clone()));
        Validator::new().with_selection(selection)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// One line of `preflight rules`.
#[derive(Serialize)]
struct RuleListing<'a> {
    domain: &'a str,
    rule: &'a str,
    kind: RuleKind,
    tags: Vec<&'a str>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_config = LogConfig::from_env().with_verbosity(cli.verbose);
    let _guard = match LoggerBuilder::from_config(log_config).build() {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("warning: logging disabled: {e}");
            None
        }
    };

    let result = match cli.command {
        Commands::Check {
            vars,
            merge,
            format,
            select,
        } => check(&vars, merge, format, &select),
        Commands::Rules { format, select } => list_rules(format, &select).map(|()| ExitCode::SUCCESS),
    };

    result.unwrap_or_else(|err| {
        let err = preflight_log::log_error!(err, "preflight aborted");
        eprintln!("error: {err:#}");
        ExitCode::from(EXIT_LOAD_ERROR)
    })
}

/// Loads the variables, validates them and prints the report.
fn check(
    vars: &[PathBuf],
    merge: MergeStrategy,
    format: OutputFormat,
    select: &SelectArgs,
) -> anyhow::Result<ExitCode> {
    let config = ConfigBuilder::new()
        .with_strategy(merge)
        .with_sources(vars.iter().cloned())
        .build()
        .context("failed to load deployment variables")?;

    let report = validate(&config, &select.plan(), &select.validator());
    print_report(&report, format)?;

    Ok(ExitCode::from(u8::try_from(report.exit_code()).unwrap_or(1)))
}

fn print_report(report: &Report, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("{report}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}

/// Prints the selected catalogue: domain, kind, rule name and tags.
fn list_rules(format: OutputFormat, select: &SelectArgs) -> anyhow::Result<()> {
    let validator = select.validator();
    let sets = catalogue(&select.plan());
    let listing: Vec<RuleListing<'_>> = sets
        .iter()
        .flat_map(|set| {
            set.selected(validator.selection()).map(move |rule| RuleListing {
                domain: set.domain(),
                rule: rule.name(),
                kind: rule.kind(),
                tags: rule.tags().iter().map(Tag::as_str).collect(),
            })
        })
        .collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&listing)?),
        OutputFormat::Text => {
            let mut current: Option<&str> = None;
            for entry in &listing {
                if current != Some(entry.domain) {
                    if current.is_some() {
                        println!();
                    }
                    println!("{}", entry.domain);
                    current = Some(entry.domain);
                }
                println!(
                    "  {:<12} {}  TAGS: [{}]",
                    entry.kind.as_str(),
                    entry.rule,
                    entry.tags.join(", ")
                );
            }
        }
    }
    Ok(())
}
