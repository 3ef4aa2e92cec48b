use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use adcp_config::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Tracing level.
    #[arg(short, long, default_value_t=Level::INFO)]
    level: tracing::Level,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Decode a CSHOW dump and print it back as command lines.
    Decode {
        /// File holding the CSHOW output.
        file: PathBuf,

        /// Installed subsystem codes in serial number order, e.g. "23".
        #[arg(short, long)]
        subsystems: String,

        /// Command profile to print.
        #[arg(short, long, default_value = "full")]
        profile: Profile,

        /// Print skipped lines and values to stderr.
        #[arg(short, long)]
        report: bool,

        /// Exit with an error if anything was skipped.
        #[arg(long)]
        strict: bool,
    },

    /// Print the default commands for a set of subsystems.
    Defaults {
        /// Subsystem codes in CEPO order, e.g. "223".
        #[arg(short, long)]
        subsystems: String,

        /// Command profile to print.
        #[arg(short, long, default_value = "full")]
        profile: Profile,
    },

    /// List the per-subsystem commands and their valid ranges.
    Commands,
}

fn parse_subsystems(codes: &str) -> Result<Vec<Subsystem>> {
    Subsystem::list_from_codes(codes).with_context(|| format!("Bad subsystem list '{codes}'"))
}

fn print_lines(config: &AdcpConfiguration, profile: Profile) -> Result<()> {
    for line in serialize_configuration(config, profile)? {
        println!("{line}");
    }
    Ok(())
}

fn print_commands() {
    for spec in command::COMMANDS.iter() {
        println!("{:<8} {:?}: {}", spec.mnemonic, spec.category, spec.description);
        for field in spec.fields {
            println!(
                "         {} ({:?}) [{}, {}] {}",
                field.name, field.kind, field.min, field.max, field.unit
            );
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Setting default subscriber failed")?;

    match args.action {
        Action::Decode {
            file,
            subsystems,
            profile,
            report,
            strict,
        } => {
            let installed = parse_subsystems(&subsystems)?;
            let bytes = std::fs::read(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let (config, decode_report) = decode_bytes(&bytes, &installed);
            info!(
                configurations = config.len(),
                skipped = decode_report.issues.len(),
                "decoded {}",
                file.display()
            );
            if report {
                for issue in &decode_report.issues {
                    eprintln!("{issue}");
                }
            }
            print_lines(&config, profile)?;
            if strict && !decode_report.is_clean() {
                bail!("{} items skipped while decoding", decode_report.issues.len());
            }
        }
        Action::Defaults {
            subsystems,
            profile,
        } => {
            let config = AdcpConfiguration::from_subsystems(&parse_subsystems(&subsystems)?);
            print_lines(&config, profile)?;
        }
        Action::Commands => print_commands(),
    }
    Ok(())
}
