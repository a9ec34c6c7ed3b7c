//! Slot session simulator
//!
//! Usage:
//!   slot-sim                               - 100 instant rounds, default game
//!   slot-sim --rounds 10000 --seed 42      - reproducible long session
//!   slot-sim --config game.yaml --bet 10   - custom game and wager
//!   slot-sim --profile turbo --rounds 5    - real-time pacing

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rh_round::{
    Clock, InstantClock, MemoryLedger, SlotConfig, SlotMachine, SystemClock, TimingConfig,
    TimingProfile,
};

#[derive(Parser)]
#[command(name = "slot-sim", about = "Run an auto-roll session against an in-memory ledger")]
struct Cli {
    /// Game config (.json, .yaml or .yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Opening balance
    #[arg(long, default_value_t = 1000.0)]
    balance: f64,

    /// Wager per round (clamped to the game's limits)
    #[arg(long)]
    bet: Option<f64>,

    /// Rounds to auto-roll
    #[arg(short, long, default_value_t = 100)]
    rounds: u32,

    /// RNG seed (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Pacing: normal, turbo, instant (custom keeps the config file's timing)
    #[arg(short, long, default_value = "instant")]
    profile: TimingProfile,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if cli.rounds == 0 {
        bail!("--rounds must be at least 1");
    }

    let mut config = match &cli.config {
        Some(path) => SlotConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SlotConfig::default(),
    };
    if cli.profile != TimingProfile::Custom {
        config.timing = TimingConfig::from_profile(cli.profile);
    }

    let clock: Arc<dyn Clock> = if cli.profile == TimingProfile::Instant {
        Arc::new(InstantClock::new())
    } else {
        Arc::new(SystemClock)
    };
    let rng = match cli.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_os_rng(),
    };

    let ledger = Arc::new(MemoryLedger::new(cli.balance));
    let machine = SlotMachine::new(config, ledger.clone())
        .context("Invalid game config")?
        .with_clock(clock)
        .with_rng(rng);

    if let Some(bet) = cli.bet {
        machine.set_bet(bet);
    }

    machine.toggle_auto_roll_multiplier(cli.rounds);
    machine.start_auto_roll();

    let stats = machine.stats();
    let report = serde_json::json!({
        "game": machine.config().name,
        "bet": machine.snapshot().current_bet,
        "opening_balance": cli.balance,
        "final_balance": machine.balance(),
        "transactions": ledger.journal().len(),
        "message": machine.snapshot().message.map(|m| m.to_string()),
        "stats": &stats,
        "rtp_percent": stats.rtp(),
        "hit_rate_percent": stats.hit_rate(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
