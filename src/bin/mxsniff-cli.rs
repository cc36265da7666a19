use anyhow::{Context, Result};
use clap::CommandFactory;
use clap::Parser;
use mxsniff_lib::{ProviderRegistry, builtin_registry, get_domain, sniff_domain};

use std::io::{self, BufRead};

#[derive(Parser)]
#[command(name = "mxsniff-cli", version)]
struct Cli {
    /// email addresses, URLs or domains to look up
    inputs: Vec<String>,

    /// read inputs from stdin (one per line)
    #[arg(long)]
    stdin: bool,

    /// write report to file (JSON/NDJSON/CSV per --format)
    #[arg(long)]
    out: Option<String>,

    /// format: human|json|ndjson|csv
    #[arg(long, default_value = "human")]
    format: String,

    /// JSON provider registry file replacing the builtin table
    #[cfg(feature = "with-serde")]
    #[arg(long)]
    providers: Option<String>,
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[derive(Debug, Clone)]
struct SniffRow {
    input: String,
    domain: String,
    providers: Vec<String>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    error: Option<String>,
}

fn sniff_row(input: &str, registry: &ProviderRegistry) -> SniffRow {
    let domain = get_domain(input);
    match sniff_domain(&domain, registry) {
        Ok(providers) => SniffRow {
            input: input.to_string(),
            domain,
            providers,
            error: None,
        },
        Err(err) => SniffRow {
            input: input.to_string(),
            domain,
            providers: Vec::new(),
            error: Some(err.to_string()),
        },
    }
}

#[cfg(feature = "with-serde")]
fn load_custom_registry(cli: &Cli) -> Result<Option<ProviderRegistry>> {
    let Some(path) = cli.providers.as_deref() else {
        return Ok(None);
    };
    let data = std::fs::read_to_string(path).with_context(|| format!("read registry {path}"))?;
    let registry = ProviderRegistry::from_json_str(&data)
        .with_context(|| format!("parse registry {path}"))?;
    Ok(Some(registry))
}

#[cfg(not(feature = "with-serde"))]
fn load_custom_registry(_cli: &Cli) -> Result<Option<ProviderRegistry>> {
    Ok(None)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let custom_registry = load_custom_registry(&cli)?;
    let registry: &ProviderRegistry = match custom_registry.as_ref() {
        Some(registry) => registry,
        None => builtin_registry(),
    };

    let mut inputs = cli.inputs.clone();
    if cli.stdin {
        for line in io::stdin().lock().lines() {
            let line = line.context("read stdin")?;
            if !line.trim().is_empty() {
                inputs.push(line);
            }
        }
    }
    if inputs.is_empty() {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    }

    let rows: Vec<SniffRow> = inputs.iter().map(|input| sniff_row(input, registry)).collect();

    match cli.format.as_str() {
        "human" => {
            for r in &rows {
                if let Some(error) = &r.error {
                    println!("[ERROR] {} :: {}", r.input, error);
                } else if r.providers.is_empty() {
                    println!("[NONE]  {}", r.input);
                } else {
                    println!("[MATCH] {} :: {}", r.input, r.providers.join(", "));
                }
            }
        }
        "json" => {
            #[cfg(feature = "with-serde")]
            {
                let s = serde_json::to_string_pretty(&rows)?;
                if let Some(path) = &cli.out {
                    write_all_atomically(path, s.as_bytes())?;
                } else {
                    println!("{s}");
                }
            }
            #[cfg(not(feature = "with-serde"))]
            {
                eprintln!("format=json requires the 'with-serde' feature");
                std::process::exit(1);
            }
        }
        "ndjson" => {
            #[cfg(feature = "with-serde")]
            {
                if let Some(path) = &cli.out {
                    let mut buf = Vec::new();
                    for r in &rows {
                        let line = serde_json::to_string(r)?;
                        buf.extend_from_slice(line.as_bytes());
                        buf.push(b'\n');
                    }
                    write_all_atomically(path, &buf)?;
                } else {
                    for r in &rows {
                        println!("{}", serde_json::to_string(r)?);
                    }
                }
            }
            #[cfg(not(feature = "with-serde"))]
            {
                eprintln!("format=ndjson requires the 'with-serde' feature");
                std::process::exit(1);
            }
        }
        "csv" => {
            #[cfg(feature = "with-csv")]
            {
                if let Some(path) = &cli.out {
                    let mut wtr = csv::Writer::from_writer(Vec::new());
                    for r in &rows {
                        write_csv_row(&mut wtr, r)?;
                    }
                    let data = wtr.into_inner()?;
                    write_all_atomically(path, &data)?;
                } else {
                    let mut wtr = csv::Writer::from_writer(std::io::stdout());
                    for r in &rows {
                        write_csv_row(&mut wtr, r)?;
                    }
                    wtr.flush()?;
                }
            }
            #[cfg(not(feature = "with-csv"))]
            {
                eprintln!("format=csv requires the 'with-csv' feature");
                std::process::exit(1);
            }
        }
        other => {
            eprintln!("unknown --format '{}', use: human|json|ndjson|csv", other);
            std::process::exit(1);
        }
    }

    // exit codes: 0 OK, 2 some lookups failed, 1 fatal
    let any_failed = rows.iter().any(|r| r.error.is_some());
    if any_failed {
        std::process::exit(2);
    }
    Ok(())
}

#[cfg(feature = "with-csv")]
fn write_csv_row<W: std::io::Write>(wtr: &mut csv::Writer<W>, row: &SniffRow) -> Result<()> {
    let providers = row.providers.join("|");
    wtr.write_record([
        row.input.as_str(),
        row.domain.as_str(),
        providers.as_str(),
        row.error.as_deref().unwrap_or(""),
    ])?;
    Ok(())
}

#[cfg(any(feature = "with-serde", feature = "with-csv"))]
fn write_all_atomically(path: &str, bytes: &[u8]) -> Result<()> {
    use std::io::Write;
    let tmp = format!("{}.tmp", path);
    {
        let mut f = std::fs::File::create(&tmp)?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    std::fs::rename(&tmp, path)?;
    Ok(())
}
