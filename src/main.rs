use anyhow::Context;
use clap::Parser;
use label_validator::{cli, config, report, validator};
use cli::{Cli, OutputFormat};
use config::Config;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("設定ファイルの読み込みに失敗")?
    .merge_cli(&cli);

    let format = config.format;
    let summary = validator::validate_files(
        &cli.truth,
        &cli.predictions,
        &config.validator_options(),
        |diagnostic| match format {
            // JSON出力時は標準出力を汚さない
            OutputFormat::Json => eprintln!("{}", diagnostic),
            OutputFormat::Text => println!("{}", diagnostic),
        },
    )?;

    match format {
        OutputFormat::Text => print!("{}", report::render_text(&summary, config.per_label)),
        OutputFormat::Json => println!("{}", report::render_json(&summary)?),
    }

    summary.require_accuracy()?;
    Ok(())
}
