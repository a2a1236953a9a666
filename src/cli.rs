use crate::log::ActivityLogger;
use crate::runtime::block_on;
use crate::tools::api::{api_call_with, api_calls_with, batch_requests, ApiRequest};
use crate::tools::path::path_source;
use crate::tools::table::{add_data, lst_tbl, List};
use crate::tools::web::web_page_with;
use crate::{ApiResponse, BatchInput, Config};
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Read};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "wibble", version, about = "API calls, path parsing and tables (JSON only)")]
pub struct Cli {
    #[command(flatten)]
    overrides: Overrides,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args)]
struct Overrides {
    /// Per-request timeout in milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,
    /// Requests in flight during a batch
    #[arg(long, global = true)]
    concurrency: Option<usize>,
}

#[derive(Subcommand)]
enum Command {
    /// Call one API endpoint and print the response text
    Call(CallArgs),
    /// Call many endpoints from a JSON file of aligned columns (url, query, value, path)
    Calls { input: String },
    /// Fetch a page and print its headline
    Web {
        url: String,
        /// Print the raw HTML along with the headline
        #[arg(long)]
        page: bool,
    },
    /// Split a filesystem path or URL into its parts
    Path { path: String },
    /// Build a table from a JSON list, optionally merging a second list into it
    Table(TableArgs),
    /// Show the activity log, newest first
    Log {
        #[arg(long)]
        errors: bool,
    },
}

#[derive(Args)]
struct CallArgs {
    url: String,
    /// Endpoint path appended to the URL
    #[arg(long, default_value = "")]
    path: String,
    /// Query parameter as name=value (repeatable)
    #[arg(long = "query", value_parser = parse_pair)]
    query: Vec<(String, String)>,
    /// Request body; sends a POST instead of a GET
    #[arg(long)]
    body: Option<String>,
}

#[derive(Args)]
struct TableArgs {
    /// JSON list: file path, URL, or `-` for stdin
    input: String,
    /// JSON list merged into the table
    #[arg(long)]
    add: Option<String>,
    /// Print one object per row instead of one array per column
    #[arg(long)]
    records: bool,
}

pub fn run() {
    init_tracing();
    let cli = Cli::parse();
    let cfg = load_config(&cli.overrides);

    let ok = match cli.cmd {
        Command::Call(args) => {
            let target = args.url.clone();
            timed("call", Some(&target), || call(&cfg, args))
        }
        Command::Calls { input } => timed("calls", Some(&input), || calls(&cfg, &input)),
        Command::Web { url, page } => timed("web", Some(&url), || {
            let fetched = block_on(web_page_with(&cfg, &url))?;
            Ok(if page {
                serde_json::to_value(fetched)?
            } else {
                serde_json::Value::String(fetched.title)
            })
        }),
        Command::Path { path } => timed("path", Some(&path), || Ok(path_source(&path)?)),
        Command::Table(args) => {
            let target = args.input.clone();
            timed("table", Some(&target), || table(&cfg, args))
        }
        Command::Log { errors } => {
            let lines = ActivityLogger::new().and_then(|logger| logger.read_logs(errors));
            print_json(&ApiResponse::from(lines))
        }
    };

    if !ok {
        std::process::exit(1);
    }
}

fn call(cfg: &Config, args: CallArgs) -> anyhow::Result<String> {
    let mut request = ApiRequest::new(args.url).path(args.path);
    request.query = args.query;
    request.body = args.body;
    Ok(block_on(api_call_with(cfg, &request))?)
}

fn calls(cfg: &Config, input: &str) -> anyhow::Result<Vec<ApiResponse<String>>> {
    let raw = read_input(cfg, input)?;
    let batch: BatchInput =
        serde_json::from_str(&raw).context("batch input must be a JSON object of columns")?;
    let (url, query, value, path) = batch.into_columns();
    let requests = batch_requests(&url, &query, &value, &path)?;
    let results = block_on(api_calls_with(cfg, requests));
    Ok(results.into_iter().map(ApiResponse::from).collect())
}

fn table(cfg: &Config, args: TableArgs) -> anyhow::Result<serde_json::Value> {
    let data = read_list(cfg, &args.input)?;
    let mut tbl = lst_tbl(data)?;
    if let Some(add) = &args.add {
        tbl = add_data(tbl, read_list(cfg, add)?)?;
    }

    let out = if args.records {
        serde_json::to_value(tbl.to_records())?
    } else {
        serde_json::to_value(&tbl)?
    };
    Ok(out)
}

fn read_list(cfg: &Config, input: &str) -> anyhow::Result<List> {
    let raw = read_input(cfg, input)?;
    let value = serde_json::from_str(&raw).with_context(|| format!("{input}: invalid JSON"))?;
    Ok(List::from_json(value)?)
}

/// Read `-` (stdin), an http(s) URL, or a file.
fn read_input(cfg: &Config, input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read from stdin")?;
        Ok(buffer)
    } else if input.starts_with("http://") || input.starts_with("https://") {
        Ok(block_on(api_call_with(cfg, &ApiRequest::new(input)))?)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to read file '{input}'"))
    }
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))
}

fn load_config(overrides: &Overrides) -> Config {
    let mut cfg = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring config file");
        Config::default()
    });
    if let Some(timeout_ms) = overrides.timeout_ms {
        cfg = cfg.with_timeout_ms(timeout_ms);
    }
    if let Some(concurrency) = overrides.concurrency {
        cfg = cfg.with_concurrency(concurrency);
    }
    cfg
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("WIBBLE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Run a command, record it in the activity log and print the envelope.
fn timed<T: Serialize>(
    command: &str,
    target: Option<&str>,
    op: impl FnOnce() -> anyhow::Result<T>,
) -> bool {
    let start = Instant::now();
    let result = op();
    let elapsed = start.elapsed().as_millis();

    // Logging failures never fail the command.
    if let Ok(logger) = ActivityLogger::new() {
        let _ = match &result {
            Ok(_) => logger.info(command, target, Some(&format!("succeeded in {elapsed}ms"))),
            Err(e) => logger.error(command, target, Some(&format!("failed in {elapsed}ms: {e}"))),
        };
    }

    match result {
        Ok(v) => print_json(&ApiResponse::ok(v)),
        Err(e) => print_json(&ApiResponse::<()>::err(format!("{e:#}"))),
    }
}

/// Pretty JSON on stdout; returns whether the envelope reports success.
fn print_json<T: Serialize>(response: &ApiResponse<T>) -> bool {
    match serde_json::to_string_pretty(response) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Error serializing to JSON: {e}"),
    }
    response.ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_pair_splits_on_first_equals() {
        assert_eq!(
            parse_pair("q=a=b").unwrap(),
            ("q".to_string(), "a=b".to_string())
        );
        assert!(parse_pair("novalue").is_err());
    }

    #[test]
    fn cli_parses_call_with_queries() {
        let cli = Cli::try_parse_from([
            "wibble",
            "call",
            "https://api.test",
            "--path",
            "users",
            "--query",
            "page=2",
            "--query",
            "q=x",
            "--timeout-ms",
            "500",
        ])
        .unwrap();
        assert_eq!(cli.overrides.timeout_ms, Some(500));
        match cli.cmd {
            Command::Call(args) => {
                assert_eq!(args.path, "users");
                assert_eq!(args.query.len(), 2);
                assert!(args.body.is_none());
            }
            _ => panic!("expected call"),
        }
    }

    #[test]
    fn table_reads_file_and_merges() {
        let dir = std::env::temp_dir();
        let data = dir.join(format!("wibble-cli-data-{}.json", std::process::id()));
        let extra = dir.join(format!("wibble-cli-extra-{}.json", std::process::id()));
        std::fs::write(&data, r#"{"a": [1, 2], "b": ["x", "y"]}"#).unwrap();
        std::fs::write(&extra, r#"{"b": ["X", "Y"], "c": [true, false]}"#).unwrap();

        let out = table(
            &Config::default(),
            TableArgs {
                input: data.to_string_lossy().into_owned(),
                add: Some(extra.to_string_lossy().into_owned()),
                records: true,
            },
        )
        .unwrap();

        assert_eq!(
            out,
            serde_json::json!([
                {"a": 1, "b": "X", "c": true},
                {"a": 2, "b": "Y", "c": false}
            ])
        );

        let _ = std::fs::remove_file(&data);
        let _ = std::fs::remove_file(&extra);
    }

    #[test]
    fn calls_runs_batch_file_in_row_order() {
        let base = block_on(crate::tools::testing::serve());
        let input =
            std::env::temp_dir().join(format!("wibble-cli-calls-{}.json", std::process::id()));
        let batch = serde_json::json!({
            "url": [base, base, base],
            "query": ["id", "", "id"],
            "value": ["1", "", "3"],
            "path": ["a", "status/404", "c"],
        });
        std::fs::write(&input, batch.to_string()).unwrap();

        let rows = calls(&Config::default(), &input.to_string_lossy()).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].data.as_deref(), Some("GET /a?id=1"));
        assert!(!rows[1].ok);
        assert!(rows[1].error.as_deref().unwrap().contains("404"));
        assert_eq!(rows[2].data.as_deref(), Some("GET /c?id=3"));

        let _ = std::fs::remove_file(&input);
    }

    #[test]
    fn calls_rejects_misaligned_columns() {
        let input =
            std::env::temp_dir().join(format!("wibble-cli-misaligned-{}.json", std::process::id()));
        std::fs::write(&input, r#"{"url": ["http://127.0.0.1:1"], "path": ["a", "b"]}"#).unwrap();

        let err = calls(&Config::default(), &input.to_string_lossy()).unwrap_err();
        assert!(format!("{err:#}").contains("length mismatch"));

        let _ = std::fs::remove_file(&input);
    }

    #[test]
    fn read_input_fetches_urls() {
        let base = block_on(crate::tools::testing::serve());
        let body = read_input(&Config::default(), &format!("{base}/lists/data.json")).unwrap();
        assert_eq!(body, "GET /lists/data.json");
    }

    #[test]
    fn read_input_missing_file_has_context() {
        let err = read_input(&Config::default(), "/definitely/not/here.json").unwrap_err();
        assert!(format!("{err:#}").contains("failed to read file"));
    }
}
