use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use dotenv::dotenv;
use std::path::PathBuf;

use adserve_rs::targeting::suite::{run_suite, SuiteLoader};
use adserve_rs::{Attributes, ConditionEvaluator, EvaluatorOptions};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decide whether a condition matches a set of attributes
    Eval {
        /// Attributes as a JSON object, e.g. '{"age": 25, "color": "dark"}'
        #[arg(short, long)]
        attrs: String,

        /// The targeting condition
        #[arg(short, long)]
        condition: String,

        #[command(flatten)]
        options: OptionFlags,
    },
    /// Parse a condition and print its canonical form
    Parse {
        /// The targeting condition
        condition: String,

        #[command(flatten)]
        options: OptionFlags,
    },
    /// Run a YAML scenario suite and report PASS/FAIL per scenario
    Check {
        /// Path to the suite file
        file: PathBuf,
    },
}

/// Overrides for the ADSERVE_* environment settings
#[derive(ClapArgs, Debug)]
struct OptionFlags {
    /// Treat `[low-high]` literals as plain text
    #[arg(long)]
    no_intervals: bool,

    /// Treat comma separated literals as plain text
    #[arg(long)]
    no_string_sets: bool,

    /// Maximum parenthesis nesting depth
    #[arg(long)]
    max_depth: Option<usize>,
}

impl OptionFlags {
    fn resolve(&self) -> anyhow::Result<EvaluatorOptions> {
        let mut options = EvaluatorOptions::from_env()?;
        if self.no_intervals {
            options.numeric_intervals = false;
        }
        if self.no_string_sets {
            options.string_sets = false;
        }
        if let Some(depth) = self.max_depth {
            options.max_depth = depth;
        }
        options.validate().context("invalid --max-depth")?;
        log::debug!("Evaluator options: {:?}", options);
        Ok(options)
    }
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Commands::Eval {
            attrs,
            condition,
            options,
        } => {
            let raw: serde_json::Value =
                serde_json::from_str(&attrs).context("--attrs must be valid JSON")?;
            let attributes = Attributes::from_json(&raw)?;
            let evaluator = ConditionEvaluator::with_options(options.resolve()?);

            log::info!(
                "Evaluating condition against {} attributes",
                attributes.len()
            );
            let served = evaluator.should_serve(&attributes, &condition)?;
            println!("{}", served);
        }
        Commands::Parse { condition, options } => {
            let evaluator = ConditionEvaluator::with_options(options.resolve()?);
            let compiled = evaluator.compile(&condition)?;
            println!("{}", compiled);
        }
        Commands::Check { file } => {
            let suite = SuiteLoader::new()
                .load_suite(&file)
                .with_context(|| format!("Failed to load suite {}", file.display()))?;

            let report = run_suite(&suite);
            for (i, result) in report.results.iter().enumerate() {
                let status = if result.passed { "PASS" } else { "FAIL" };
                println!("{:>3}. {} - {}", i, status, result.description);
                if !result.passed {
                    println!(
                        "       expected {}, got {}",
                        result.expected, result.outcome
                    );
                }
            }
            println!(
                "{}/{} scenarios passed",
                report.passed_count(),
                report.results.len()
            );

            if !report.all_passed() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
