//! analyze: score assets against a rule configuration and print the results.
//!
//! Usage:
//!   cargo run -p analyze-cli -- --symbols BTC ETH DOGE
//!   cargo run -p analyze-cli -- --rules my-rules.json --json
//!   cargo run -p analyze-cli -- --signals market.json --symbols SOL

use analysis_core::{AnalysisResult, EngineConfig, RuleConfiguration, ServiceConfig, SignalProvider};
use analysis_orchestrator::{AnalysisService, RuleEvaluationEngine, StaticSignalProvider, DEFAULT_SYMBOL};
use std::sync::Arc;

const DEFAULT_SYMBOLS: &[&str] = &["BTC", "ETH"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "analyze=info,analysis_orchestrator=info".into()),
            )
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "analyze=info,analysis_orchestrator=info".into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    let json_output = args.iter().any(|a| a == "--json");
    let rules_path = flag_value(&args, "--rules");
    let signals_path = flag_value(&args, "--signals");

    let symbols: Vec<String> = match args.iter().position(|a| a == "--symbols") {
        Some(idx) => args[idx + 1..]
            .iter()
            .take_while(|a| !a.starts_with("--"))
            .cloned()
            .collect(),
        None => DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
    };
    if symbols.is_empty() {
        print_usage();
        std::process::exit(1);
    }

    let rules = match rules_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            let rules = RuleConfiguration::from_json(&raw)?;
            if let Err(e) = rules.validate() {
                tracing::warn!("Rule file {} has edit-time problems: {}", path, e);
            }
            rules
        }
        None => RuleConfiguration::default(),
    };

    let provider = match signals_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            StaticSignalProvider::from_json(DEFAULT_SYMBOL, &raw)?
        }
        None => StaticSignalProvider::default(),
    };

    let engine_config = EngineConfig::from_env()?;
    let service_config = ServiceConfig::from_env()?;
    tracing::info!(
        "analyze: {} symbols, provider default={}, timeout={}ms, cache_ttl={}s",
        symbols.len(),
        provider.default_symbol(),
        service_config.analysis_timeout_ms,
        service_config.cache_ttl_secs
    );

    let service = Arc::new(AnalysisService::new(
        Arc::new(RuleEvaluationEngine::new(engine_config)),
        Arc::new(provider),
        service_config,
    ));
    let rules = Arc::new(rules);

    let mut handles = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        let service = Arc::clone(&service);
        let rules = Arc::clone(&rules);
        handles.push(tokio::spawn(async move {
            let result = service.analyze(&symbol, &rules).await;
            (symbol, result)
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    let mut failed = 0usize;
    for handle in handles {
        let (symbol, result) = handle.await?;
        match result {
            Ok(result) => results.push(result),
            Err(e) => {
                failed += 1;
                tracing::error!("{}: {}", symbol, e);
            }
        }
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for result in &results {
            print_result(result);
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} analyses failed", failed, failed + results.len());
    }
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}

fn print_result(result: &AnalysisResult) {
    println!("{} ({})", result.symbol, result.name);
    println!(
        "  overall {:>3}  fundamental {:>3}  technical {:>3}  risk {:>3}",
        result.overall_score, result.fundamental_score, result.technical_score, result.risk_score
    );
    for violation in &result.violations {
        println!("  ! {}", violation);
    }
    for recommendation in &result.recommendations {
        println!("  > {}", recommendation);
    }
    for entry in &result.checklist {
        println!("  [{}] {}", entry.status, entry.item);
    }
    println!();
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  analyze                          Score BTC and ETH with the preset rules");
    eprintln!("  analyze --symbols BTC DOGE ...   Specific symbols");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --rules PATH      Rule configuration JSON (default: preset formulas)");
    eprintln!("  --signals PATH    JSON array of asset snapshots (default: built-in table)");
    eprintln!("  --json            Print results as JSON");
}
