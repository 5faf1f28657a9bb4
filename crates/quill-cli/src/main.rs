use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use quill_ast::Program;
use quill_parse::parse_program;
use quill_scope::{address_program, rename_exprs_with, rewrite_all_let, VarGen};

/// Maximum source file size in bytes (1MB)
const MAX_SOURCE_SIZE: usize = 1_000_000;

#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(about = "Quill: a small Scheme with substitution-based evaluation and lexical addressing")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a program and print its value
    Run {
        /// Path to source file
        file: String,
    },

    /// Parse a source file and dump the AST
    Parse {
        /// Path to source file
        file: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
    },

    /// Print every top-level form with lexical addresses
    Address {
        /// Path to source file
        file: String,
    },

    /// Print the program with all bound variables renamed apart
    Rename {
        /// Path to source file
        file: String,

        /// First fresh-name suffix
        #[arg(long, default_value_t = 1)]
        start: usize,
    },
}

#[derive(ValueEnum, Clone, Debug)]
enum Format {
    Pretty,
    Json,
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Only initialize if RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { file } => cmd_run(&file),
        Commands::Parse { file, format } => cmd_parse(&file, format),
        Commands::Address { file } => cmd_address(&file),
        Commands::Rename { file, start } => cmd_rename(&file, start),
    }
}

fn load(path: &str) -> Result<Program> {
    let src = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read '{}': {}", path, e))?;

    if src.len() > MAX_SOURCE_SIZE {
        eprintln!(
            "Error: source file exceeds {}MB limit ({} bytes)",
            MAX_SOURCE_SIZE / 1_000_000,
            src.len()
        );
        std::process::exit(1);
    }

    let program = parse_program(&src)?;
    tracing::debug!(path, forms = program.exps.len(), "parsed");
    Ok(program)
}

fn cmd_run(file: &str) -> Result<()> {
    let program = rewrite_all_let(&load(file)?);
    match quill_cli::eval_program(&program) {
        Ok(value) => println!("{}", value),
        Err(e) => {
            eprintln!("Runtime error: {}", e);
            std::process::exit(1);
        }
    }
    Ok(())
}

fn cmd_parse(file: &str, format: Format) -> Result<()> {
    let program = load(file)?;
    match format {
        Format::Pretty => println!("{:#?}", program),
        Format::Json => println!("{}", serde_json::to_string_pretty(&program)?),
    }
    Ok(())
}

fn cmd_address(file: &str) -> Result<()> {
    let program = load(file)?;
    match address_program(&program) {
        Ok(forms) => {
            for form in forms {
                println!("{}", form);
            }
        }
        Err(e) => {
            eprintln!("Scope error: {}", e);
            std::process::exit(1);
        }
    }
    Ok(())
}

fn cmd_rename(file: &str, start: usize) -> Result<()> {
    let program = load(file)?;
    let mut gen = VarGen::starting_at(start);
    let renamed = Program {
        exps: rename_exprs_with(&program.exps, &mut gen),
    };
    println!("{}", renamed);
    Ok(())
}
