//! CLI entry point for `sql2ddl`.

use std::io::Read;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use sql2ddl::api::{GenerateRequest, GenerateResponse};
use sql2ddl::generator::dialect::Dialect;
use sql2ddl::generator::syntax_check::check_syntax;
use sql2ddl::output::formatter;
use tracing::{debug, warn};

#[derive(Parser)]
#[command(
    name = "sql2ddl",
    about = "Generate CREATE TABLE statements from a SELECT query or field list"
)]
struct Cli {
    /// Input SQL files (reads stdin when none are given)
    input: Vec<PathBuf>,

    /// Target dialect; repeat for several (spark, mysql, postgresql, starrocks, clickhouse, hive, doris)
    #[arg(short, long = "dialect")]
    dialect: Vec<String>,

    /// JSON file of type rules keyed by dialect
    #[arg(long)]
    rules: Option<PathBuf>,

    /// JSON request file (`sql`, `databaseTypes`, `rulesByDatabase`)
    #[arg(long)]
    request: Option<PathBuf>,

    /// Table name written into the DDL
    #[arg(long)]
    table_name: Option<String>,

    /// Table comment written into the DDL
    #[arg(long)]
    table_comment: Option<String>,

    /// Write one `.sql` file per dialect here instead of printing
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Print the JSON response shape instead of plain DDL
    #[arg(long)]
    json: bool,

    /// Parse each generated statement with the matching SQL parser
    #[arg(long)]
    check: bool,

    /// Print verbose diagnostics
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .ok();

    let mut request = match &cli.request {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(content) => match GenerateRequest::from_json(&content) {
                Ok(request) => request,
                Err(e) => {
                    eprintln!("Error parsing request: {e}");
                    process::exit(2);
                }
            },
            Err(e) => {
                eprintln!("Error reading {}: {e}", path.display());
                process::exit(2);
            }
        },
        None => GenerateRequest::default(),
    };

    // SQL from positional inputs (or stdin) replaces any SQL in the request file.
    if !cli.input.is_empty() || cli.request.is_none() {
        request.sql = read_sql(&cli.input);
    }
    if !cli.dialect.is_empty() {
        request.database_types = cli.dialect.clone();
    }
    if let Some(name) = &cli.table_name {
        request.table_name = Some(name.clone());
    }
    if let Some(comment) = &cli.table_comment {
        request.table_comment = Some(comment.clone());
    }

    if let Some(rules_path) = &cli.rules {
        match std::fs::read_to_string(rules_path) {
            Ok(content) => {
                if let Err(e) = request.rules_by_database.load_from_json(&content) {
                    eprintln!("Error parsing rules: {e}");
                    process::exit(2);
                }
            }
            Err(e) => {
                eprintln!("Error reading rules: {e}");
                process::exit(2);
            }
        }
    }

    for id in request.dialects() {
        if Dialect::from_id(&id).is_none() {
            warn!(dialect = %id, "unknown dialect ignored");
        }
    }

    let ddls = match request.generate() {
        Ok(ddls) => ddls,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    };
    if ddls.is_empty() {
        eprintln!("No supported dialect requested");
        process::exit(2);
    }
    debug!(statements = ddls.len(), "generated DDL");

    if let Some(dir) = &cli.output_dir {
        let name = cli
            .input
            .first()
            .and_then(|p| p.file_stem())
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        if let Err(e) = formatter::write_output(dir, name, &ddls) {
            eprintln!("Error writing output: {e}");
            process::exit(2);
        }
    } else if cli.json {
        match serde_json::to_string_pretty(&GenerateResponse::from_ddls(ddls.clone())) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error encoding response: {e}");
                process::exit(2);
            }
        }
    } else {
        println!("{}", formatter::format_ddls(&ddls));
    }

    if cli.check {
        let mut failed = false;
        for ddl in &ddls {
            let Some(dialect) = Dialect::from_id(&ddl.dialect) else {
                continue;
            };
            match check_syntax(dialect, &ddl.ddl) {
                Ok(count) => debug!(dialect = %dialect, statements = count, "syntax check passed"),
                Err(e) => {
                    eprintln!("{e}");
                    failed = true;
                }
            }
        }
        if failed {
            process::exit(1);
        }
    }
}

fn read_sql(inputs: &[PathBuf]) -> String {
    if inputs.is_empty() {
        let mut sql = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut sql) {
            eprintln!("Error reading stdin: {e}");
            process::exit(2);
        }
        return sql;
    }

    let mut combined_sql = String::new();
    for path in inputs {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                combined_sql.push_str(&content);
                combined_sql.push('\n');
            }
            Err(e) => {
                eprintln!("Error reading {}: {e}", path.display());
                process::exit(2);
            }
        }
    }
    combined_sql
}
