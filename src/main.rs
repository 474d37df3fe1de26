//! Spinwheel CLI entry point.
//!
//! One-shot subcommands over the spintax engine and the risk model. Template
//! arguments may be omitted to read the template from stdin.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::io::Read;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use spinwheel::config::Config;
use spinwheel::risk::{self, LaunchPlan, RiskInput};
use spinwheel::spintax;

/// Exit code when the launch gate asks for confirmation.
const EXIT_NEEDS_CONFIRMATION: u8 = 2;

/// Spinwheel: spintax templates and sending-account risk.
#[derive(Parser)]
#[command(name = "spinwheel", version, about)]
struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Command {
    /// Print the number of distinct expansions of a template.
    Count {
        /// Template text; read from stdin when omitted.
        template: Option<String>,
    },
    /// Print the template's static and group blocks as JSON.
    Segment {
        /// Template text; read from stdin when omitted.
        template: Option<String>,
    },
    /// Print random expansions of a template, one per line.
    Sample {
        /// Template text; read from stdin when omitted.
        template: Option<String>,
        /// Seed for reproducible output.
        #[arg(long)]
        seed: Option<u64>,
        /// Number of expansions to print.
        #[arg(long, default_value_t = 1)]
        times: usize,
    },
    /// Print every expansion of a template, one per line.
    Expand {
        /// Template text; read from stdin when omitted.
        template: Option<String>,
        /// Stop after this many expansions.
        #[arg(long, default_value_t = 1000)]
        limit: usize,
    },
    /// Fold alternatives into a single spintax group.
    Fold {
        /// Alternatives, in order.
        #[arg(required = true)]
        alternatives: Vec<String>,
    },
    /// Split a spintax group into one alternative per line.
    Unfold {
        /// Template text; read from stdin when omitted.
        template: Option<String>,
    },
    /// Score a single account and print the breakdown as JSON.
    Risk {
        /// Messages planned for this account.
        #[arg(long)]
        planned: u64,
        /// Average delay between messages, in seconds.
        #[arg(long)]
        delay: f64,
        /// Content variation score.
        #[arg(long, default_value_t = 1)]
        variations: u64,
        /// Daily limit; 0 means unlimited.
        #[arg(long, default_value_t = 0)]
        limit: u64,
        /// Messages sent in the last 24 hours.
        #[arg(long, default_value_t = 0.0)]
        used: f64,
        /// Unix timestamp of the last activity.
        #[arg(long)]
        last_activity: Option<i64>,
    },
    /// Run the launch gate over the configured accounts.
    Fleet {
        /// Recipients not contacted before.
        #[arg(long)]
        recipients: u64,
        /// Message template; its variation count is the content score.
        #[arg(long, conflicts_with = "variations")]
        template: Option<String>,
        /// Content variation score, instead of a template.
        #[arg(long)]
        variations: Option<u64>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::load().context("failed to load configuration")?;

    let _logging_guard = match &config.logging.dir {
        Some(dir) => Some(spinwheel::logging::init_file(dir, &config.logging.level)?),
        None => {
            spinwheel::logging::init_cli(&config.logging.level);
            None
        }
    };

    match cli.command {
        Command::Count { template } => {
            let template = read_template(template)?;
            println!("{}", spintax::count_variations(&template));
        }
        Command::Segment { template } => {
            let template = read_template(template)?;
            let blocks = spintax::segment(&template);
            println!("{}", serde_json::to_string_pretty(&blocks)?);
        }
        Command::Sample {
            template,
            seed,
            times,
        } => {
            let template = read_template(template)?;
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            for _ in 0..times {
                println!("{}", spintax::sample_one(&template, &mut rng));
            }
        }
        Command::Expand { template, limit } => {
            let template = read_template(template)?;
            for expansion in spintax::expand_all(&template, limit) {
                println!("{expansion}");
            }
        }
        Command::Fold { alternatives } => {
            println!("{}", spintax::fold(&alternatives));
        }
        Command::Unfold { template } => {
            let template = read_template(template)?;
            for alternative in spintax::unfold(&template) {
                println!("{alternative}");
            }
        }
        Command::Risk {
            planned,
            delay,
            variations,
            limit,
            used,
            last_activity,
        } => {
            let breakdown = risk::evaluate(&RiskInput {
                planned_messages: planned,
                average_delay_secs: delay,
                content_variation_score: variations,
                daily_limit: limit,
                messages_used_last_24h: used,
                last_activity,
            });
            println!("{}", serde_json::to_string_pretty(&breakdown)?);
        }
        Command::Fleet {
            recipients,
            template,
            variations,
        } => {
            let content_variation_score = match (variations, template) {
                (Some(score), _) => score,
                (None, Some(template)) => spintax::count_variations(&template),
                (None, None) => {
                    anyhow::bail!("either --template or --variations is required")
                }
            };
            if config.accounts.is_empty() {
                anyhow::bail!("no accounts configured; add [[accounts]] to the config file");
            }

            let plan = LaunchPlan {
                risky_recipients: recipients,
                delay: config.fleet.delay_mode(),
                content_variation_score,
                confirm_below_health: config.fleet.confirm_below_health,
            };
            let now = chrono::Utc::now().timestamp();
            let assessment = risk::assess_fleet(&config.accounts, &plan, now);
            println!("{}", serde_json::to_string_pretty(&assessment)?);

            if assessment.requires_confirmation {
                return Ok(ExitCode::from(EXIT_NEEDS_CONFIRMATION));
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Use the argument if given, otherwise read the whole of stdin.
fn read_template(arg: Option<String>) -> anyhow::Result<String> {
    if let Some(text) = arg {
        return Ok(text);
    }
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("failed to read template from stdin")?;
    // A trailing newline comes from the shell, not the template.
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    debug!(bytes = text.len(), "template read from stdin");
    Ok(text)
}
