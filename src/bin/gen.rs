//! cep-gen: build and inspect range index files.

use brcep::{Delimiter, RangeIndexWriter, Resolver, ResolverConfig, TextEncoding};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cep-gen")]
#[command(version)]
#[command(about = "Build and inspect CEP range index files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a range index from a data file
    Index {
        /// Input data file
        #[arg(short, long)]
        data: PathBuf,

        /// Output index file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        format: FormatArgs,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// List every distinct city and state referenced by an index
    List {
        /// Data file
        #[arg(short, long)]
        data: PathBuf,

        /// Range index file
        #[arg(short, long)]
        index: PathBuf,

        #[command(flatten)]
        format: FormatArgs,

        /// Print the full listing as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct FormatArgs {
    /// Text encoding of the data file (utf-8 or latin-1)
    #[arg(short, long, default_value = "utf-8")]
    encoding: TextEncoding,

    /// Column delimiter of the data file
    #[arg(long, default_value = ",")]
    delimiter: Delimiter,
}

impl FormatArgs {
    fn config(&self) -> ResolverConfig {
        ResolverConfig::with_encoding(self.encoding).delimiter(self.delimiter.into())
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Index {
            data,
            output,
            format,
            verbose,
        } => build_index(&data, &output, format.config(), verbose),
        Commands::List {
            data,
            index,
            format,
            json,
        } => list_cities(&data, &index, format.config(), json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn build_index(
    data: &Path,
    output: &Path,
    config: ResolverConfig,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if verbose {
        println!("Reading data file: {:?} ({})", data, config.encoding);
    }

    let writer = RangeIndexWriter::from_data_file(data, config)?;

    if verbose {
        println!(
            "Parsed {} ranges, skipped {} rows",
            writer.len(),
            writer.skipped()
        );
    }

    let count = writer.write_to(output)?;

    println!("Successfully indexed {:?} -> {:?} ({} ranges)", data, output, count);
    Ok(())
}

fn list_cities(
    data: &Path,
    index: &Path,
    config: ResolverConfig,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut resolver = Resolver::open_with_config(data, index, config)?;
    let listing = resolver.list()?;

    if json {
        let cities: serde_json::Map<String, serde_json::Value> = listing
            .sorted()
            .into_iter()
            .map(|(key, city)| Ok((key.clone(), serde_json::to_value(city)?)))
            .collect::<Result<_, serde_json::Error>>()?;
        println!("{}", serde_json::to_string_pretty(&cities)?);
    } else {
        println!(
            "{} ranges, {} distinct cities, {} unreadable records",
            resolver.entry_count(),
            listing.len(),
            listing.malformed.len()
        );
    }

    Ok(())
}
