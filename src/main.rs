//! Score Keeper entry point
//!
//! The web build is driven by the host page through `WebScoreKeeper`. The
//! native binary plays a short scripted game against an in-memory store and
//! prints the resulting view model.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use score_keeper::{BoardConfig, DropPosition, MemoryStore, Palette, ScoreKeeper, TeamId};

    env_logger::init();
    log::info!("Score Keeper (native) starting...");
    log::info!("Native mode uses an in-memory store - run with `trunk serve` for the web version");

    println!("Stripe palette:");
    for (i, color) in Palette::stripe().colors().iter().enumerate() {
        println!("  {:2} {}", i, color);
    }

    let mut keeper = ScoreKeeper::load(MemoryStore::new(), BoardConfig::default());
    let third = keeper.add_team();
    keeper.increment_score(TeamId::A);
    keeper.increment_score(TeamId::A);
    keeper.increment_score(TeamId::B);
    keeper.rename_team(TeamId::B, "  Visitors ");
    if let Some(third) = third {
        keeper.reorder_team(third, TeamId::A, DropPosition::Before);
    }

    println!("\nTeams:");
    for team in keeper.teams() {
        println!(
            "  {}. {} ({}) {} - {}",
            team.position + 1,
            team.name,
            team.id,
            team.color,
            team.score
        );
    }

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    keeper.reset_to_new_game(&mut Pcg32::seed_from_u64(seed));

    match keeper.view().to_json() {
        Ok(json) => println!("\nAfter reset:\n{}", json),
        Err(e) => log::error!("Could not serialize view: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
