use crate::infra::{parse_rule, parse_strategy};
use chrono::SecondsFormat;
use clap::Args;
use parking_lottery::config::{AppConfig, LotteryConfig};
use parking_lottery::error::AppError;
use parking_lottery::workflows::lottery::{
    AllocationZone, DrawRequest, DrawStrategy, LotteryRound, LotteryService, LotterySession,
    NoopPublisher, Participants, PoolView, ResidentId, RuleSet, RuleToggle, SpaceSize,
};
use parking_lottery::workflows::roster::load_session;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DrawArgs {
    /// Number of residents to draw at random from the available pool
    #[arg(long, conflicts_with = "residents", required_unless_present = "residents")]
    pub(crate) participants: Option<usize>,
    /// Resident to include in the draw (repeatable)
    #[arg(long = "resident", value_name = "ID")]
    pub(crate) residents: Vec<String>,
    /// Rule toggle to apply (repeatable). Defaults to no restriction.
    #[arg(long = "rule", value_name = "NAME", value_parser = parse_rule)]
    pub(crate) rules: Vec<RuleToggle>,
    /// Pairing strategy: matched or direct (defaults to LOTTERY_DEFAULT_STRATEGY)
    #[arg(long, value_parser = parse_strategy)]
    pub(crate) strategy: Option<DrawStrategy>,
    /// Number of consecutive rounds to draw with the same request
    #[arg(long, default_value_t = 1)]
    pub(crate) rounds: u32,
    /// Seed for a reproducible draw (overrides LOTTERY_SEED)
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Resident roster CSV (id,label,area)
    #[arg(long)]
    pub(crate) residents_csv: Option<PathBuf>,
    /// Parking inventory CSV (number,size,zone,available)
    #[arg(long)]
    pub(crate) spaces_csv: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct InventoryArgs {
    /// Resident roster CSV (id,label,area)
    #[arg(long)]
    pub(crate) residents_csv: Option<PathBuf>,
    /// Parking inventory CSV (number,size,zone,available)
    #[arg(long)]
    pub(crate) spaces_csv: Option<PathBuf>,
}

fn lottery_config(
    residents_csv: Option<PathBuf>,
    spaces_csv: Option<PathBuf>,
) -> Result<LotteryConfig, AppError> {
    let mut config = AppConfig::load()?.lottery;
    if residents_csv.is_some() {
        config.residents_csv = residents_csv;
    }
    if spaces_csv.is_some() {
        config.spaces_csv = spaces_csv;
    }
    Ok(config)
}

pub(crate) fn build_request(args: &DrawArgs, default_strategy: DrawStrategy) -> DrawRequest {
    let rules = if args.rules.is_empty() {
        RuleSet::unrestricted()
    } else {
        RuleSet::from_toggles(args.rules.iter().copied())
    };

    let participants = match args.participants {
        Some(count) => Participants::Count(count),
        None => Participants::Residents(
            args.residents
                .iter()
                .map(|id| ResidentId::from(id.as_str()))
                .collect(),
        ),
    };

    DrawRequest {
        participants,
        rules,
        strategy: args.strategy.unwrap_or(default_strategy),
    }
}

pub(crate) fn run_draw(args: DrawArgs) -> Result<(), AppError> {
    let mut config = lottery_config(args.residents_csv.clone(), args.spaces_csv.clone())?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let session = load_session(&config)?;
    let service = LotteryService::new(session, Arc::new(NoopPublisher), &config);
    let request = build_request(&args, service.default_strategy());

    println!("Parking lottery draw");
    if let Some(seed) = config.seed {
        println!("Seed: {}", seed);
    }

    for _ in 0..args.rounds {
        let round = service.draw(request.clone())?;
        render_round(&round);
    }

    render_pool(&service.snapshot()?);
    Ok(())
}

pub(crate) fn run_inventory(args: InventoryArgs) -> Result<(), AppError> {
    let config = lottery_config(args.residents_csv, args.spaces_csv)?;
    let session = load_session(&config)?;
    render_inventory(&session);
    Ok(())
}

pub(crate) fn render_round(round: &LotteryRound) {
    let rules: Vec<&str> = round.rules.active().iter().map(|toggle| toggle.key()).collect();
    println!(
        "\nRound {} drawn {} ({} strategy, rules: {})",
        round.round,
        round.drawn_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        round.strategy.label(),
        if rules.is_empty() {
            "none".to_string()
        } else {
            rules.join(", ")
        }
    );

    for won in &round.winners {
        println!(
            "- {} ({}) -> space {} [{}, {}]",
            won.resident.label,
            won.resident.area.label(),
            won.space.id,
            won.space.size.label(),
            won.space.zone.label()
        );
    }

    if !round.unknown_residents.is_empty() {
        let unknown: Vec<&str> = round
            .unknown_residents
            .iter()
            .map(|id| id.0.as_str())
            .collect();
        println!("Skipped (not in the available pool): {}", unknown.join(", "));
    }
}

pub(crate) fn render_pool(pool: &PoolView) {
    let counts = &pool.available_residents;
    println!(
        "\nRemaining: {} spaces ({} unavailable) | residents S {} / A {} / B {} / C {} (total {})",
        pool.available_spaces,
        pool.unavailable_spaces,
        counts.s,
        counts.a,
        counts.b,
        counts.c,
        counts.total
    );
}

pub(crate) fn render_inventory(session: &LotterySession) {
    let counts = session.area_counts();
    println!("Resident roster");
    println!(
        "- S {} / A {} / B {} / C {} (total {})",
        counts.s, counts.a, counts.b, counts.c, counts.total
    );

    println!("\nParking inventory");
    let zones = [
        AllocationZone::Motorcycle,
        AllocationZone::A,
        AllocationZone::B,
        AllocationZone::C,
        AllocationZone::Store,
        AllocationZone::Reserved,
    ];
    for zone in zones {
        let in_zone: Vec<_> = session
            .spaces()
            .iter()
            .filter(|space| space.zone == zone)
            .collect();
        if in_zone.is_empty() {
            continue;
        }
        let count_size =
            |size: SpaceSize| in_zone.iter().filter(|space| space.size == size).count();
        let available = in_zone.iter().filter(|space| space.available).count();
        println!(
            "- {}: {} spaces ({} large, {} small, {} accessible), {} available",
            zone.label(),
            in_zone.len(),
            count_size(SpaceSize::Large),
            count_size(SpaceSize::Small),
            count_size(SpaceSize::Accessible),
            available
        );
    }

    println!(
        "Total: {} spaces, {} available",
        session.spaces().len(),
        session.available_spaces().len()
    );
}
