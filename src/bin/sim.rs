use midway::{
    AiPlayer, Board, Difficulty, Player, Team, BOARD_SIZE, FLEET, PLACEMENT_ATTEMPTS,
};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

/// Shots the AI needs to sink a randomly deployed standard fleet.
fn shots_to_win(difficulty: Difficulty, rng: &mut SmallRng) -> anyhow::Result<usize> {
    let mut target = Board::new(BOARD_SIZE).map_err(|e| anyhow::anyhow!(e))?;
    target
        .place_fleet_randomly(rng, &FLEET, Team::Usa, PLACEMENT_ATTEMPTS)
        .map_err(|e| anyhow::anyhow!(e))?;

    let mut ai = AiPlayer::new(difficulty);
    let mut shots = 0;
    while !target.all_ships_sunk() {
        let Some((x, y)) = ai.select_target(rng, &target.view(false)) else {
            anyhow::bail!("{} ai ran out of targets", difficulty);
        };
        let outcome = target.receive_attack(x, y);
        ai.handle_attack_result(&target.view(false), (x, y), &outcome);
        shots += 1;
    }
    Ok(shots)
}

fn main() -> anyhow::Result<()> {
    midway::init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <seed> [games]", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let games: usize = match args.get(2) {
        Some(n) => n.parse()?,
        None => 20,
    };
    if games == 0 {
        anyhow::bail!("games must be positive");
    }

    let mut results = serde_json::Map::new();
    for difficulty in Difficulty::ALL {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut shots = Vec::with_capacity(games);
        for _ in 0..games {
            shots.push(shots_to_win(difficulty, &mut rng)?);
        }
        let total: usize = shots.iter().sum();
        results.insert(
            difficulty.to_string(),
            json!({
                "games": games,
                "average_shots": total as f64 / games as f64,
                "best": shots.iter().min(),
                "worst": shots.iter().max(),
            }),
        );
    }

    let report = json!({ "seed": seed, "difficulties": results });
    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}
