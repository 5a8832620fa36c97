//! cep: resolve Brazilian postal codes to cities.

use brcep::{CachedResolver, Delimiter, ResolvedCity, ResolverConfig, TextEncoding};
use clap::{CommandFactory, Parser};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cep")]
#[command(version)]
#[command(about = "Resolve Brazilian postal codes (CEP) to cities", long_about = None)]
struct Cli {
    /// Postal codes to resolve (punctuation is ignored)
    #[arg(allow_negative_numbers = true)]
    codes: Vec<String>,

    /// Data file with one city record per line
    #[arg(short, long, env = "BRCEP_DATA", default_value = "data/cities.csv")]
    data: PathBuf,

    /// Range index file for the data file
    #[arg(short, long, env = "BRCEP_INDEX", default_value = "data/cities.idx")]
    index: PathBuf,

    /// Text encoding of the data file (utf-8 or latin-1)
    #[arg(short, long, env = "BRCEP_ENCODING", default_value = "utf-8")]
    encoding: TextEncoding,

    /// Column delimiter of the data file
    #[arg(long, env = "BRCEP_DELIMITER", default_value = ",")]
    delimiter: Delimiter,

    /// Print one JSON object per resolved code
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if cli.codes.is_empty() {
        if let Err(e) = Cli::command().print_help() {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        println!();
        return;
    }

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ResolverConfig::with_encoding(cli.encoding).delimiter(cli.delimiter.into());
    let mut resolver = CachedResolver::open(&cli.data, &cli.index, config)?;

    let mut first = true;
    for code in &cli.codes {
        match resolver.find(code)? {
            Some(city) => {
                if cli.json {
                    println!("{}", serde_json::to_string(&city)?);
                } else {
                    if !first {
                        println!();
                    }
                    print_city(&city)?;
                }
                first = false;
            }
            None => eprintln!("{}: CEP not found", code),
        }
    }

    Ok(())
}

/// Print every field of a resolved city, sorted by field name.
fn print_city(city: &ResolvedCity) -> Result<(), Box<dyn std::error::Error>> {
    let fields = field_lines(city)?;
    let width = fields.keys().map(|k| k.len()).max().unwrap_or(0);

    for (name, value) in &fields {
        println!("{:<width$}\t{}", name, value, width = width);
    }
    Ok(())
}

fn field_lines(city: &ResolvedCity) -> Result<BTreeMap<String, String>, serde_json::Error> {
    let value = serde_json::to_value(city)?;
    let mut fields = BTreeMap::new();

    if let serde_json::Value::Object(map) = value {
        for (name, value) in map {
            let text = match value {
                serde_json::Value::Null => String::new(),
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            fields.insert(name, text);
        }
    }

    Ok(fields)
}
