use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use jsonmock_core::{
    convert, generate_with, ConvertRequest, GenerateOptions, GenerateRequest, RandomSampler,
};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "jsonmock")]
#[command(about = "Convert between example JSON, interface declarations, and JSON Schema, and generate mock data")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an example JSON payload or interface declarations into a JSON Schema
    Convert {
        /// Input file. Dash (hyphen) indicates stdin
        input: PathBuf,

        /// Root type name for the generated schema
        #[arg(long, default_value = "RootObject")]
        root_name: String,

        /// Input kind (auto tries JSON first, then falls back to interface text)
        #[arg(long, value_enum, default_value_t = InputKind::Auto)]
        from: InputKind,

        /// Output file (defaults to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },

    /// Generate one mock value from a JSON Schema (or a raw example payload)
    Generate {
        /// Schema file. Dash (hyphen) indicates stdin
        input: PathBuf,

        /// Treat the input as a raw example payload instead of a schema
        #[arg(long)]
        raw_json: bool,

        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Output file (defaults to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum InputKind {
    Auto,
    Json,
    Ts,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormat {
    Pretty,
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for JSON.
    let log_level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Convert {
            input,
            root_name,
            from,
            output,
            format,
        } => {
            let text = read_input(&input)?;
            let request = build_convert_request(&text, from, root_name)?;
            let response = convert(&request)?;
            write_output(&response, output.as_deref(), format)
        }

        Commands::Generate {
            input,
            raw_json,
            seed,
            output,
            format,
        } => {
            let text = read_input(&input)?;
            let payload: serde_json::Value = serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse JSON from: {}", input.display()))?;

            let request = if raw_json {
                GenerateRequest {
                    raw_json: Some(payload),
                    ..GenerateRequest::default()
                }
            } else {
                GenerateRequest {
                    schema: Some(payload),
                    ..GenerateRequest::default()
                }
            };

            let sampler = match seed {
                Some(seed) => RandomSampler::with_seed(seed),
                None => RandomSampler::new(),
            };
            let response = generate_with(&request, &GenerateOptions::default(), &sampler)?;
            write_output(&response, output.as_deref(), format)
        }
    }
}

fn build_convert_request(
    text: &str,
    from: InputKind,
    root_name: String,
) -> Result<ConvertRequest> {
    let mut request = ConvertRequest {
        root_name: Some(root_name),
        ..ConvertRequest::default()
    };

    match from {
        InputKind::Json => {
            let value: serde_json::Value =
                serde_json::from_str(text).context("Failed to parse input as JSON")?;
            request.json_input = Some(value);
        }
        InputKind::Ts => {
            request.ts_input = Some(text.to_string());
        }
        InputKind::Auto => match serde_json::from_str::<serde_json::Value>(text) {
            Ok(value) => request.json_input = Some(value),
            Err(_) => request.ts_input = Some(text.to_string()),
        },
    }

    Ok(request)
}

fn read_input(path: &std::path::Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))
}

fn write_output<T: Serialize>(
    value: &T,
    output: Option<&std::path::Path>,
    format: OutputFormat,
) -> Result<()> {
    let mut writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    match format {
        OutputFormat::Pretty => serde_json::to_writer_pretty(&mut writer, value)?,
        OutputFormat::Compact => serde_json::to_writer(&mut writer, value)?,
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
