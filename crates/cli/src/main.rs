//! Command line interface for the pool health monitor.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use pool_health_data::providers::DexScreenerProvider;
use pool_health_data::repositories::Database;
use pool_health_domain::enums::Dex;
use pool_health_domain::metrics::PoolMetrics;
use pool_health_monitoring::prelude::*;
use prettytable::{Table, row};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(name = "pool-health")]
#[command(about = "Liquidity pool health monitoring and alerting", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single pool from metrics given on the command line (offline)
    Evaluate {
        /// Total value locked in USD
        #[arg(long)]
        liquidity: f64,

        /// Slippage (%) for a trade sized at 1% of liquidity
        #[arg(long)]
        slippage: f64,

        /// Trailing 24h volume in USD
        #[arg(long)]
        volume: f64,

        /// Distinct liquidity provider count
        #[arg(long)]
        lps: u32,
    },
    /// Apply database migrations
    Migrate,
    /// Register a pool under a project
    RegisterPool {
        /// Project name (created if absent)
        #[arg(short, long)]
        project: String,

        /// On-chain pair address
        #[arg(short, long)]
        address: String,

        /// Venue (uniswap_v2, uniswap_v3, raydium, orca, pancakeswap)
        #[arg(short, long)]
        dex: String,

        /// Base token symbol (e.g. SOL)
        #[arg(long)]
        base: String,

        /// Quote token symbol (e.g. USDC)
        #[arg(long, default_value = "USDC")]
        quote: String,
    },
    /// List the pools registered under a project
    ListPools {
        /// Project name
        #[arg(short, long)]
        project: String,
    },
    /// Run one health check cycle for a project
    Check {
        /// Project name
        #[arg(short, long)]
        project: String,
    },
    /// Run health check cycles on an interval until interrupted
    Watch {
        /// Project name
        #[arg(short, long)]
        project: String,

        /// Seconds between cycles (overrides CHECK_INTERVAL_SECS)
        #[arg(short, long)]
        interval: Option<u64>,
    },
    /// Show recent health checks for a pool
    History {
        /// On-chain pair address
        #[arg(short, long)]
        address: String,

        /// Number of checks to show
        #[arg(short, long, default_value_t = 10)]
        limit: i64,
    },
    /// Show recent alerts
    Alerts {
        /// Number of alerts to show
        #[arg(short, long, default_value_t = 20)]
        limit: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate {
            liquidity,
            slippage,
            volume,
            lps,
        } => evaluate_offline(liquidity, slippage, volume, lps),
        Commands::Migrate => {
            let db = connect().await?;
            db.migrate().await?;
            println!("✅ Migrations applied");
            Ok(())
        }
        Commands::RegisterPool {
            project,
            address,
            dex,
            base,
            quote,
        } => register_pool(&project, &address, &dex, &base, &quote).await,
        Commands::ListPools { project } => list_pools(&project).await,
        Commands::Check { project } => run_check(&project).await,
        Commands::Watch { project, interval } => watch(&project, interval).await,
        Commands::History { address, limit } => history(&address, limit).await,
        Commands::Alerts { limit } => alerts(limit).await,
    }
}

fn evaluate_offline(liquidity: f64, slippage: f64, volume: f64, lps: u32) -> Result<()> {
    let metrics = PoolMetrics::new(liquidity, slippage, volume, lps)?;
    let result = HealthEvaluator::default().evaluate(&metrics)?;

    let mut table = Table::new();
    table.add_row(row!["Liquidity score", result.scores.liquidity_score]);
    table.add_row(row!["Slippage score", result.scores.slippage_score]);
    table.add_row(row!["Volume score", result.scores.volume_score]);
    table.add_row(row![
        "Overall",
        format!("{:.2}", result.scores.overall_score)
    ]);
    table.add_row(row!["Status", result.status.as_str().to_uppercase()]);
    table.printstd();

    if result.issues.is_empty() {
        println!("✅ No issues detected");
    } else {
        for (issue, recommendation) in result.issues.iter().zip(&result.recommendations) {
            println!("⚠️  {issue}");
            println!("   → {recommendation}");
        }
    }
    Ok(())
}

async fn register_pool(
    project: &str,
    address: &str,
    dex: &str,
    base: &str,
    quote: &str,
) -> Result<()> {
    let Some(dex) = Dex::from_str(dex) else {
        bail!("unknown dex venue: {dex}");
    };

    let db = connect().await?;
    let project = db
        .projects()
        .upsert(uuid::Uuid::new_v4(), project)
        .await?;
    let pool = db
        .pools()
        .upsert(
            uuid::Uuid::new_v4(),
            project.id,
            address,
            dex,
            base,
            quote,
        )
        .await?;

    println!("✅ Registered {} under project {}", pool.label(), project.name);
    Ok(())
}

async fn list_pools(project: &str) -> Result<()> {
    let db = connect().await?;
    let project = find_project(&db, project).await?;
    let pools = db.pools().find_by_project(project.id).await?;

    let mut table = Table::new();
    table.add_row(row!["Pair", "Dex", "Address", "Registered"]);
    for pool in &pools {
        table.add_row(row![
            format!("{}/{}", pool.base_symbol, pool.quote_symbol),
            pool.dex.as_str(),
            pool.address,
            pool.created_at.format("%Y-%m-%d %H:%M"),
        ]);
    }
    table.printstd();
    println!("{} pool(s)", pools.len());
    Ok(())
}

async fn run_check(project: &str) -> Result<()> {
    let config = MonitorConfig::from_env()?;
    let db = connect_with(&config).await?;
    let project = find_project(&db, project).await?;
    let pools = db.pools().find_by_project(project.id).await?;
    if pools.is_empty() {
        bail!("project {} has no registered pools", project.name);
    }

    let runner = build_runner(&config, &db);
    let report = runner.run_cycle(&project.name, &pools).await;
    print_report(&report);
    Ok(())
}

async fn watch(project: &str, interval: Option<u64>) -> Result<()> {
    let config = MonitorConfig::from_env()?;
    let db = connect_with(&config).await?;
    let project = find_project(&db, project).await?;
    let interval_secs = interval.unwrap_or(config.check_interval_secs);
    let runner = build_runner(&config, &db);

    let mut scheduler = Scheduler::new(Schedule::Interval(Duration::from_secs(interval_secs)));
    let mut ticks = scheduler
        .take_receiver()
        .context("scheduler receiver already taken")?;
    let scheduler = Arc::new(scheduler);
    {
        let scheduler = scheduler.clone();
        tokio::spawn(async move { scheduler.start().await });
    }

    println!(
        "📡 Watching project {} every {}s (Ctrl-C to stop)",
        project.name, interval_secs
    );

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                scheduler.stop();
                info!("Shutting down watch loop");
                break;
            }
            tick = ticks.recv() => {
                let Some(tick) = tick else { break };
                info!(cycle = tick.sequence, "Running scheduled health check cycle");
                // Pools are reloaded each cycle so registrations apply live.
                let pools = db.pools().find_by_project(project.id).await?;
                let report = runner.run_cycle(&project.name, &pools).await;
                print_report(&report);
            }
        }
    }
    Ok(())
}

async fn history(address: &str, limit: i64) -> Result<()> {
    let db = connect().await?;
    let pool = db
        .pools()
        .find_by_address(address)
        .await?
        .with_context(|| format!("no pool registered at {address}"))?;
    let checks = db.health_checks().recent_for_pool(pool.id, limit).await?;

    println!("🔍 {} — last {} check(s)", pool.label(), checks.len());
    let mut table = Table::new();
    table.add_row(row!["Checked", "Status", "Overall", "TVL (USD)", "Issues"]);
    for check in &checks {
        table.add_row(row![
            check.checked_at.format("%Y-%m-%d %H:%M:%S"),
            check.status.as_str(),
            format!("{:.2}", check.overall_score),
            format!("{:.2}", check.total_liquidity_usd),
            check.issues.len(),
        ]);
    }
    table.printstd();
    Ok(())
}

async fn alerts(limit: i64) -> Result<()> {
    let db = connect().await?;
    let alerts = db.alerts().recent(limit).await?;

    let mut table = Table::new();
    table.add_row(row!["Triggered", "Severity", "Message"]);
    for alert in &alerts {
        table.add_row(row![
            alert.triggered_at.format("%Y-%m-%d %H:%M:%S"),
            alert.severity,
            alert.message,
        ]);
    }
    table.printstd();
    println!("{} alert(s)", alerts.len());
    Ok(())
}

async fn connect() -> Result<Database> {
    let config = MonitorConfig::from_env()?;
    connect_with(&config).await
}

async fn connect_with(config: &MonitorConfig) -> Result<Database> {
    Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")
}

async fn find_project(db: &Database, name: &str) -> Result<pool_health_domain::entities::Project> {
    db.projects()
        .find_by_name(name)
        .await?
        .with_context(|| format!("unknown project: {name}"))
}

fn build_runner(config: &MonitorConfig, db: &Database) -> HealthCheckRunner {
    let client = reqwest::Client::new();

    let provider = match &config.market_data_base_url {
        Some(base_url) => DexScreenerProvider::new(client.clone(), base_url),
        None => DexScreenerProvider::with_default_endpoint(client.clone()),
    };

    let notifier: Arc<dyn Notifier> = match &config.alert_webhook_url {
        Some(url) => Arc::new(MultiNotifier::new(vec![
            Arc::new(ConsoleNotifier) as Arc<dyn Notifier>,
            Arc::new(WebhookNotifier::new(client, url)) as Arc<dyn Notifier>,
        ])),
        None => Arc::new(ConsoleNotifier),
    };

    HealthCheckRunner::new(
        Arc::new(provider),
        Arc::new(db.clone()),
        notifier,
        HealthEvaluator::default(),
        RunnerConfig {
            max_concurrency: config.max_concurrency,
        },
    )
}

fn print_report(report: &RunReport) {
    let mut table = Table::new();
    table.add_row(row!["Pool", "Status", "Overall", "Issues", "Alerted"]);
    for outcome in &report.outcomes {
        match outcome {
            PoolOutcome::Checked {
                pool,
                result,
                alerted,
            } => {
                table.add_row(row![
                    pool,
                    result.status.as_str(),
                    format!("{:.2}", result.scores.overall_score),
                    result.issues.len(),
                    if *alerted { "🚨" } else { "" },
                ]);
            }
            PoolOutcome::Failed { pool, stage, error } => {
                table.add_row(row![
                    pool,
                    "FAILED",
                    "-",
                    format!("{}: {}", stage.as_str(), error),
                    "",
                ]);
            }
        }
    }
    table.printstd();
    println!(
        "✅ {} checked ({} healthy, {} warning, {} critical), {} failed in {:.1}s",
        report.checked,
        report.healthy,
        report.warning,
        report.critical,
        report.failed,
        report.elapsed.as_secs_f64(),
    );
}
