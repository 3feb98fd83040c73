//! store_day — simulate a checkout area, compare it with M/M/c theory, and
//! ask the Q-learning advisor for layout changes.
//!
//! ```text
//! store_day [scenario.json] [transactions.csv]
//! ```
//!
//! Without a scenario file a built-in weekday layout is used.  A transaction
//! log, if given, recalibrates service times and the customer mix.  Output
//! goes to `metrics_history.csv` and `customers.csv` in the scenario's
//! output directory.  Set `RUST_LOG=debug` to see routing decisions.

mod scenario;

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cq_agent::{trainer, LearningConfig, LearningTask, QLearningAgent, QState};
use cq_core::load_profile_csv;
use cq_output::{write_customer_log, CsvWriter, MetricsObserver, OutputWriter};
use cq_sim::EngineBuilder;
use cq_theory::{cost_efficiency, optimal_servers};

use scenario::{Scenario, DEFAULT_SCENARIO};

// ── Constants ─────────────────────────────────────────────────────────────────

const TARGET_UTILIZATION:   f64 = 0.8;
const STAFF_COST_PER_HOUR:  f64 = 15.0;
const REVENUE_PER_CUSTOMER: f64 = 45.0;
const TRAINING_INTERVAL_MS: u64 = 2;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);

    // ── Scenario ──────────────────────────────────────────────────────────────
    let scenario: Scenario = match args.next() {
        Some(path) => {
            let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?
        }
        None => serde_json::from_str(DEFAULT_SCENARIO).context("parsing built-in scenario")?,
    };
    let stations = scenario.stations();
    let params = scenario.params.clone();
    let tuning = scenario.tuning.clone().unwrap_or_default();

    let mut builder = EngineBuilder::new(stations.clone(), params.clone()).tuning(tuning);
    if let Some(path) = args.next() {
        let profile = load_profile_csv(Path::new(&path), params.day_type)
            .with_context(|| format!("loading transactions from {path}"))?;
        info!(
            customers    = profile.total_customers,
            service_time = profile.avg_service_time,
            items        = profile.avg_items_per_customer,
            "calibrated from transaction log"
        );
        builder = builder.profile(profile);
    }
    let mut engine = builder.build()?;

    // ── Run ───────────────────────────────────────────────────────────────────
    std::fs::create_dir_all(&scenario.output_dir)
        .with_context(|| format!("creating {}", scenario.output_dir.display()))?;
    let writer = CsvWriter::new(&scenario.output_dir)?;
    let mut observer = MetricsObserver::new(writer, scenario.sample_interval_secs);

    let t0 = Instant::now();
    let metrics = engine.run(&mut observer);
    let elapsed = t0.elapsed();
    if let Some(e) = observer.take_error() {
        return Err(e).context("writing metrics history");
    }
    write_customer_log(observer.writer_mut(), engine.customers())?;
    observer.writer_mut().finish()?;

    println!("\n── Simulation ({:.0} min, {} stations) ──", params.simulation_duration, stations.len());
    println!("  arrivals        : {}", engine.arrivals_generated());
    println!("  served          : {}", metrics.total_customers_served);
    println!("  abandoned       : {}", metrics.total_customers_abandoned);
    println!("  avg wait        : {:.1} s", metrics.average_wait_time);
    println!("  avg queue       : {:.2}", metrics.average_queue_length);
    println!("  peak queue      : {}", metrics.peak_queue_length);
    println!("  utilization     : {:.1} %", metrics.utilization * 100.0);
    println!("  throughput      : {:.1} /h", metrics.throughput);
    println!("  satisfaction    : {:.1}", metrics.satisfaction);
    println!("  score           : {:.1}", metrics.score);
    println!("  history rows    : {}", observer.rows_written());
    println!("  wall time       : {:.1} ms", elapsed.as_secs_f64() * 1_000.0);

    // ── Theory ────────────────────────────────────────────────────────────────
    let theory = engine.theoretical_metrics();
    let comparison = engine.comparison();
    let lambda = params.arrival_rate_per_sec();
    let mu = 1.0 / params.service_time_regular;
    let open_registers = stations.iter().filter(|s| s.is_active && s.is_regular()).count() as u32;
    let economics = cost_efficiency(
        open_registers,
        STAFF_COST_PER_HOUR,
        metrics.satisfaction,
        REVENUE_PER_CUSTOMER,
        metrics.throughput,
    );

    println!("\n── M/M/{open_registers} prediction ──");
    if theory.stable {
        println!("  ρ               : {:.3}", theory.utilization);
        println!("  Wq / Ws         : {:.1} s / {:.1} s", theory.wq, theory.ws);
        println!("  Lq              : {:.2}", theory.lq);
        println!("  accuracy        : {:.1} %", comparison.accuracy * 100.0);
    } else {
        println!("  unstable (ρ = {:.2}); queues grow without bound", theory.utilization);
    }
    println!(
        "  registers for ρ ≤ {TARGET_UTILIZATION}: {}",
        optimal_servers(lambda, mu, TARGET_UTILIZATION)
    );
    println!(
        "  net benefit     : {:.0}/h (efficiency {:.2})",
        economics.net_benefit, economics.cost_efficiency
    );

    // ── Replications ──────────────────────────────────────────────────────────
    if scenario.replications > 0 {
        let summary = engine.replicate(scenario.replications);
        println!("\n── {} replications ──", summary.runs);
        println!(
            "  wait            : {:.1} s ± {:.1}",
            summary.mean_wait_time, summary.wait_time_std_dev
        );
        println!("  utilization     : {:.1} %", summary.mean_utilization * 100.0);
        println!("  served          : {:.1}", summary.mean_served);
        println!("  score           : {:.1}", summary.mean_score);
    }

    // ── Advisor ───────────────────────────────────────────────────────────────
    let config = LearningConfig {
        batch_interval: Duration::from_millis(TRAINING_INTERVAL_MS),
        seed: params.seed,
        ..LearningConfig::default()
    };
    let shared = Arc::new(Mutex::new(QLearningAgent::with_config(config)?));
    let state = QState::observe(engine.stations(), params.day_type, engine.current_time());

    LearningTask::start(Arc::clone(&shared), &state, engine.stations())?.join();

    let mut agent = trainer::lock(&shared);
    let stats = agent.q_table_stats();
    println!(
        "\n── Advisor ({} episodes, {} states, ε = {:.3}) ──",
        agent.episode_count(),
        stats.state_count,
        agent.exploration_rate()
    );
    println!("  state           : {}", state.key());
    let recommendations = agent.generate_recommendations(&state, engine.stations());
    if recommendations.is_empty() {
        println!("  no recommendation");
    }
    for rec in &recommendations {
        println!("  {rec}");
    }

    Ok(())
}
