//! CLI for building and inspecting verb-vector declarations.
//!
//! # Usage
//!
//! ```bash
//! # Summary of a declaration file
//! cargo run -p vv-generator --bin vv-generate -- declarations/latin.yaml
//!
//! # Distinct prefixes up to the tense aspect, as JSON
//! cargo run -p vv-generator --bin vv-generate -- declarations/latin.yaml --format json upto tense
//!
//! # Naming and property checks with strict config
//! cargo run -p vv-generator --bin vv-generate -- declarations/latin.yaml --strict check
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use vv_generator::{
    lint_declarations, load_declarations, BuilderDriver, GeneratorConfig, GeneratorError,
    VerbvectorGenerator,
};

/// Build a verb-vector name space from a declaration file.
#[derive(Debug, Parser)]
#[command(name = "vv-generate", version)]
struct Args {
    /// Declaration file (.json, .yaml or .yml)
    file: PathBuf,

    /// Every check on; naming warnings fail the build
    #[arg(long, conflicts_with = "lenient")]
    strict: bool,

    /// No ordering or naming checks
    #[arg(long)]
    lenient: bool,

    /// Log each declaration as it is applied
    #[arg(short, long)]
    verbose: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Language, counts and clusters (default)
    Summary,
    /// Every vector in set order
    Vectors,
    /// The sorted aspect list
    Aspects,
    /// Distinct vector prefixes ending at an aspect
    Upto { aspect: String },
    /// Every cluster and its snapshot
    Clusters,
    /// Member names of the capability extension
    Members,
    /// Naming lint and property checks
    Check,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<ExitCode, GeneratorError> {
    let config = if args.strict {
        GeneratorConfig::strict()
    } else if args.lenient {
        GeneratorConfig::lenient()
    } else {
        GeneratorConfig::default()
    };

    let declarations = load_declarations(&args.file)?;
    let lint = lint_declarations(&declarations);
    let generator = BuilderDriver::new(config).run(declarations)?;

    let json = args.format == OutputFormat::Json;

    match args.command.as_ref() {
        None | Some(Command::Summary) => {
            if json {
                print_json(&json!({
                    "language": generator.language(),
                    "vectors_count": generator.vector_set().len(),
                    "aspects": generator.aspect_list(),
                    "clusters": generator
                        .clusters()
                        .iter()
                        .map(|(name, snapshot)| (name.clone(), snapshot.len()))
                        .collect::<std::collections::BTreeMap<_, _>>(),
                }))?;
            } else {
                print!("{}", generator.format_summary());
            }
        }
        Some(Command::Vectors) => print_list(generator.vector_set(), json)?,
        Some(Command::Aspects) => print_list(generator.aspect_list(), json)?,
        Some(Command::Upto { aspect }) => print_list(&generator.vectors_up_to_aspect(aspect), json)?,
        Some(Command::Clusters) => {
            if json {
                print_json(&json!(generator.clusters()))?;
            } else {
                for (name, snapshot) in generator.clusters() {
                    println!("{} ({})", name, snapshot.len());
                    for vector in snapshot {
                        println!("  {}", vector);
                    }
                }
            }
        }
        Some(Command::Members) => {
            let extension = generator.build_extension()?;
            let names: Vec<&str> = extension.member_names().collect();
            if json {
                print_json(&json!(names))?;
            } else {
                for name in names {
                    println!("{}", name);
                }
            }
        }
        Some(Command::Check) => return check(&generator, &lint, json),
    }

    Ok(ExitCode::SUCCESS)
}

fn check(
    generator: &VerbvectorGenerator,
    lint: &vv_core::NamingReport,
    json: bool,
) -> Result<ExitCode, GeneratorError> {
    let properties = generator.check_properties();
    let passes = lint.passes && properties.failed == 0;

    if json {
        print_json(&json!({
            "passes": passes,
            "naming": lint
                .violations
                .iter()
                .map(|v| v.format())
                .collect::<Vec<_>>(),
            "properties": properties
                .results
                .iter()
                .map(|r| r.format_status())
                .collect::<Vec<_>>(),
        }))?;
    } else {
        print!("{}", lint.format_report());
        println!();
        print!("{}", properties.format_report());
    }

    Ok(if passes {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_list(items: &[String], json: bool) -> Result<(), GeneratorError> {
    if json {
        print_json(&json!(items))
    } else {
        for item in items {
            println!("{}", item);
        }
        Ok(())
    }
}

fn print_json(value: &serde_json::Value) -> Result<(), GeneratorError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
