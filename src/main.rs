use anyhow::{Context, Result};
use std::time::Duration;
use toolchain_sync::cli::commands::{InfoCommand, PushCommand, SecretsCommand};
use toolchain_sync::cli::output::*;
use toolchain_sync::cli::{Cli, Command};
use toolchain_sync::config::{cloud_cli_from_env, PushConfig};
use toolchain_sync::repo::{list_files, push_listed_files, GitHubContentClient};
use toolchain_sync::{PipelineInfoFetcher, SecretSynchronizer, SubprocessRunner};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    match &cli.command {
        Command::Secrets(cmd) => sync_secrets(cmd, &cli).await?,
        Command::Push(cmd) => push_files(cmd).await?,
        Command::Info(cmd) => show_info(cmd, &cli).await?,
    }

    Ok(())
}

fn fetcher(cli: &Cli) -> PipelineInfoFetcher<SubprocessRunner> {
    let cloud_cli = cli.cloud_cli.clone().unwrap_or_else(cloud_cli_from_env);
    PipelineInfoFetcher::new(SubprocessRunner::new(), cloud_cli)
        .with_retry(cli.retries, Duration::from_secs(cli.retry_delay_secs))
}

async fn sync_secrets(cmd: &SecretsCommand, cli: &Cli) -> Result<()> {
    let synchronizer = SecretSynchronizer::new(fetcher(cli));

    if cmd.dry_run {
        let (report, rendered) = synchronizer
            .prepare(&cmd.pipeline_id, &cmd.file_name)
            .await?;
        println!("{}", format_sync_report(&report));
        println!("\n{}", rendered);
        return Ok(());
    }

    println!(
        "{}Synchronizing secret references into {}",
        INFO,
        style(cmd.file_name.display()).bold()
    );
    let report = synchronizer
        .sync_file(&cmd.pipeline_id, &cmd.file_name)
        .await?;
    println!("{}", format_sync_report(&report));

    Ok(())
}

async fn push_files(cmd: &PushCommand) -> Result<()> {
    let mut config = PushConfig::from_env().context("Incomplete push configuration")?;
    if let Some(branch) = &cmd.branch {
        config = config.with_branch(branch.clone());
    }
    if let Some(api_url) = &cmd.api_url {
        config = config.with_api_url(api_url.clone());
    }

    let client = GitHubContentClient::new(config.api_url.clone(), config.token.clone())?;
    let files = list_files(&cmd.dir)
        .await
        .with_context(|| format!("Failed to list {}", cmd.dir.display()))?;

    let progress = (!cmd.json).then(|| create_progress_bar(files.len()));
    let results = push_listed_files(
        &client,
        &config.repo,
        &cmd.dir,
        &files,
        &cmd.remote_dir(),
        cmd.message.as_deref(),
        |file, outcome| {
            if let Some(progress) = &progress {
                progress.println(format_push_result(file, outcome));
                progress.inc(1);
            }
        },
    )
    .await;
    if let Some(progress) = progress {
        progress.finish_and_clear();
    }

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }

    let failed = results.values().filter(|outcome| outcome.is_none()).count();
    if failed > 0 {
        println!(
            "\n{}{} of {} file(s) {}",
            CROSS,
            failed,
            results.len(),
            style("failed").red()
        );
        std::process::exit(1);
    }

    println!(
        "\n{}Pushed {} file(s) to {}",
        CHECK,
        results.len(),
        style(format!(
            "{}/{}@{}",
            config.repo.org, config.repo.repo, config.repo.branch
        ))
        .bold()
    );
    Ok(())
}

async fn show_info(cmd: &InfoCommand, cli: &Cli) -> Result<()> {
    let raw = fetcher(cli)
        .fetch_raw(&cmd.pipeline_id, cmd.kind.into())
        .await?;
    let value: serde_json::Value =
        serde_json::from_str(raw.trim()).context("Pipeline info is not valid JSON")?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
