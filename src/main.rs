use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use reality_check::config::AppConfig;
use reality_check::history::{FileKeyValueStore, HistoryRecord, IdeaInput};
use reality_check::services::validator::{HttpValidator, ValidationResult};
use reality_check::Coordinator;

type App = Coordinator<HttpValidator>;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Setup Logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber failed")?;

    // 2. Config + Services
    let root = std::env::current_dir().context("resolving working directory")?;
    let config = AppConfig::load(&root)?;
    tracing::info!("Evaluation endpoint: {}", config.service.endpoint);
    tracing::info!("History directory: {}", config.storage.data_dir.display());

    let storage = Arc::new(FileKeyValueStore::new(config.storage.data_dir.clone()));
    let app: Arc<App> = Arc::new(Coordinator::new(HttpValidator::new(config.service.endpoint.clone()), storage));

    // 3. View watcher: prints whatever the coordinator publishes
    let mut view_rx = app.subscribe();
    tokio::spawn(async move {
        while view_rx.changed().await.is_ok() {
            let view = view_rx.borrow_and_update().clone();
            if view.loading {
                println!("... analysing");
            } else if let Some(err) = &view.error {
                println!("! {}", err.user_message());
            } else if let Some(result) = &view.result {
                print_result(result);
            }
        }
    });

    println!("Commands: submit title | description | audience | revenue, cancel, reset, history, show <id>, clear, stats, quit");

    // 4. Console loop
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));

        match cmd {
            "submit" => match parse_input(rest) {
                Some(input) => {
                    let app = app.clone();
                    // outcome is reported through the view watcher
                    tokio::spawn(async move {
                        let _ = app.submit(input).await;
                    });
                }
                None => println!("usage: submit title | description | audience | revenue"),
            },
            "cancel" => app.cancel(),
            "reset" => app.reset(),
            "history" => {
                for record in app.recent() {
                    print_record_line(&record);
                }
            }
            "show" => {
                if app.recall(rest.trim()).is_none() {
                    println!("no record with id '{}'", rest.trim());
                }
            }
            "clear" => app.clear(),
            "stats" => println!("{:#?}", app.telemetry()),
            "quit" | "exit" => break,
            other => println!("unknown command '{}'", other),
        }
    }

    app.cancel();
    Ok(())
}

fn parse_input(rest: &str) -> Option<IdeaInput> {
    let parts: Vec<&str> = rest.split('|').map(str::trim).collect();
    match parts.as_slice() {
        [title, description, audience, revenue] if !description.is_empty() => {
            Some(IdeaInput::new(*title, *description, *audience, *revenue))
        }
        _ => None,
    }
}

fn print_record_line(record: &HistoryRecord<ValidationResult>) {
    let title = if record.input.title.is_empty() { "Untitled idea" } else { record.input.title.as_str() };
    let audience = if record.input.target_audience.is_empty() {
        "No audience specified"
    } else {
        record.input.target_audience.as_str()
    };
    let revenue = if record.input.revenue_model.is_empty() {
        "No revenue model specified"
    } else {
        record.input.revenue_model.as_str()
    };
    println!(
        "{}  {} ({} • {})  score {}",
        record.id,
        title,
        audience,
        revenue,
        record.result.brutal_honesty_score.round()
    );
}

fn print_result(result: &ValidationResult) {
    println!("== {} (score {})", result.overall_verdict, result.brutal_honesty_score.round());
    println!("{}", result.breakdown);
    for risk in &result.risks {
        println!("  risk [{}] {}/10: {}", risk.category, risk.severity, risk.description);
    }
    for step in &result.roadmap {
        println!("  {}: {} (survive if: {})", step.phase, step.actions.join("; "), step.survival_metric);
    }
}
