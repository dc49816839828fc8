use clap::Parser;

use proddash::config::{Cli, Command, ReportFormat, RunConfig};
use proddash::input::load_first_available;
use proddash::logging::init_logging;
use proddash::report::json::render_table_json;
use proddash::report::text::render_report_text;
use proddash::report::{summarize, write_reports};
use proddash::MetricsSchema;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let Command::Run(args) = cli.command;
    let config = RunConfig::from(args);
    init_logging(config.verbose);

    let schema = MetricsSchema::default();
    let assets: Vec<&str> = config.assets.iter().map(String::as_str).collect();
    let (location, table) = load_first_available(&config.base, &assets, &schema)
        .await
        .map_err(|e| e.to_string())?;

    let summary = summarize(&table, &location.to_string());

    if let Some(out_dir) = &config.out_dir {
        write_reports(&table, &summary, out_dir).map_err(|e| e.to_string())?;
        return Ok(());
    }

    let rendered = match config.format {
        ReportFormat::Text => render_report_text(&summary, &table),
        ReportFormat::Json => render_table_json(&summary, &table).map_err(|e| e.to_string())?,
    };
    println!("{rendered}");
    Ok(())
}
