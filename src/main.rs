use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use rush_demo::assets::LineFileStrings;
use rush_demo::bytecode::{ArchiveError, DemoArchive, Decoder};
use rush_demo::{util, Config, DemoProgram, Operation};

#[derive(Parser, Debug)]
#[command(name = "rush-demo", about = "Decode and inspect recorded demo programs")]
struct Cli {
    /// Config file to use instead of ~/.rush-demo/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a demo chunk and list its programs
    Inspect {
        /// Raw demo chunk bytes
        archive: PathBuf,
        /// Localized string table, one string per line
        #[arg(long)]
        strings: Option<PathBuf>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the effective demo to stage bindings
    Bindings,
}

#[derive(Serialize)]
struct InspectReport<'a> {
    declared_programs: u16,
    programs: &'a [DemoProgram],
    errors: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging to file (~/.rush-demo/logs/rush-demo.log)
    fs::create_dir_all(util::logs_dir())?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(util::log_file_path())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load(),
    };

    match cli.command {
        Commands::Inspect {
            archive,
            strings,
            json,
        } => inspect(&config, &archive, strings, json).await,
        Commands::Bindings => bindings(&config),
    }
}

async fn inspect(config: &Config, archive: &Path, strings: Option<PathBuf>, json: bool) -> Result<()> {
    let bytes = tokio::fs::read(archive)
        .await
        .with_context(|| format!("Failed to read {}", archive.display()))?;

    let decoded = match strings {
        Some(path) => {
            let source = LineFileStrings::new(path);
            DemoArchive::load(&bytes, config.decode, &source, &config.localization_table).await
        }
        None => DemoArchive::decode(&bytes, &Decoder::new(config.decode)),
    }
    .with_context(|| format!("Failed to decode {}", archive.display()))?;

    if json {
        let report = InspectReport {
            declared_programs: decoded.declared_programs,
            programs: &decoded.programs,
            errors: decoded.errors.iter().map(ArchiveError::to_string).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} of {} demo programs decoded",
        decoded.programs.len(),
        decoded.declared_programs
    );
    for program in &decoded.programs {
        print_program(config, program);
    }
    for error in &decoded.errors {
        println!("error: {error}");
    }
    Ok(())
}

fn print_program(config: &Config, program: &DemoProgram) {
    let placement = match config.world_bindings.get(program.demo_id) {
        Some(b) => format!("world {} stage {} at ({}, {})", b.world, b.stage, b.x, b.y),
        None => "no stage binding".to_string(),
    };
    println!(
        "\ndemo {} [{}]: {} top-level of {} declared, {} total, sprites {:?}",
        program.demo_id,
        placement,
        program.operations.len(),
        program.declared_count,
        program.decoded_len(),
        program.sprite_ids
    );
    print_operations(&program.operations, 1);
    if let Some(stop) = &program.stopped_at {
        println!(
            "  stopped early at offset {:#x}: unknown opcode {}",
            stop.offset, stop.opcode
        );
    }
}

fn print_operations(operations: &[Operation], depth: usize) {
    for operation in operations {
        println!("{:indent$}{operation}", "", indent = depth * 2);
        print_operations(operation.children(), depth + 1);
    }
}

fn bindings(config: &Config) -> Result<()> {
    println!("demo  world  stage      x      y");
    for b in config.world_bindings.iter() {
        println!(
            "{:>4}  {:>5}  {:>5}  {:>5}  {:>5}",
            b.demo_id, b.world, b.stage, b.x, b.y
        );
    }
    Ok(())
}
