use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand, ValueEnum};
use midway::notation::{self, Command};
use midway::{
    init_logging, AttackOutcome, BoardView, CellView, Difficulty, HumanAction, Match,
    MatchConfig, MatchError, Orientation, Phase, Side, Team, TurnReport,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about = "Battle of Midway: battleship against the computer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum TeamArg {
    Usa,
    Japan,
}

impl From<TeamArg> for Team {
    fn from(arg: TeamArg) -> Self {
        match arg {
            TeamArg::Usa => Team::Usa,
            TeamArg::Japan => Team::Japan,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the computer in the terminal.
    Play {
        #[arg(long, value_enum, default_value_t = DifficultyArg::Medium)]
        difficulty: DifficultyArg,
        #[arg(long, value_enum, default_value_t = TeamArg::Usa)]
        team: TeamArg,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "Skip manual deployment and place your fleet at random")]
        random_fleet: bool,
        #[arg(long, help = "Show the enemy fleet while playing")]
        reveal: bool,
    },
}

fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

fn print_board(title: &str, view: &BoardView) {
    println!("{}", title);
    print!("   ");
    for x in 0..view.size {
        print!(" {}", (b'A' + x as u8) as char);
    }
    println!();
    for (y, row) in view.rows().enumerate() {
        print!("{:>2} ", y);
        for cell in row {
            let ch = match cell {
                CellView::Untouched => '.',
                CellView::Ship => 'S',
                CellView::Miss => 'o',
                CellView::Hit => 'X',
            };
            print!(" {}", ch);
        }
        println!();
    }
}

fn print_state(game: &Match, reveal_enemy: bool) {
    print_board("Enemy waters:", &game.computer_view(reveal_enemy));
    println!();
    print_board("Your fleet:", &game.human_board().view(true));
    let intel = game.human_board().intel();
    println!(
        "Targets remaining: {}/{}",
        intel.remaining_targets, intel.total_targets
    );
    let mut weapons = Vec::new();
    if game.focused_strike_available() {
        weapons.push("focus <coord> (3x3)");
    }
    if game.wide_strike_available() {
        weapons.push("wide <coord> (7x7)");
    }
    if !weapons.is_empty() {
        println!("Special weapons: {}", weapons.join(", "));
    }
}

fn describe(outcome: &AttackOutcome) -> &'static str {
    match outcome {
        AttackOutcome::Miss => "miss",
        AttackOutcome::Hit { .. } => "hit!",
        AttackOutcome::Sunk { .. } => "ship sunk!",
        AttackOutcome::OutOfBounds => "out of bounds",
        AttackOutcome::AlreadyAttacked => "already attacked",
    }
}

fn report_turn(report: &TurnReport) {
    match &report.human {
        HumanAction::Attack { coord, outcome } => {
            println!("You fire at {}: {}", notation::format_coordinate(*coord), describe(outcome));
        }
        HumanAction::Special { weapon, report } => {
            println!(
                "{:?} at {}: {} cells struck, {}.",
                weapon,
                notation::format_coordinate(report.center),
                report.outcomes.len(),
                if report.any_hit() { "hits confirmed" } else { "no hits" }
            );
            for cells in report.sunk() {
                println!("  Enemy ship sunk at {:?}", cells);
            }
        }
    }
    if let Some(reply) = &report.computer {
        println!(
            "Enemy fires at {}: {}",
            notation::format_coordinate(reply.coord),
            describe(&reply.outcome)
        );
    }
}

fn read_line(input: &mut impl BufRead, prompt: &str) -> anyhow::Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn deploy(game: &mut Match, rng: &mut SmallRng, input: &mut impl BufRead) -> anyhow::Result<bool> {
    println!("Place your ships (e.g. A5 H or 3,4 V). Press enter for a random spot.");
    while let Some(&index) = game.unplaced_ships().first() {
        let def = game.fleet()[index];
        print_board("Your fleet:", &game.human_board().view(true));
        let prompt = format!("Place {} (length {}): ", def.class_name(), def.length());
        let Some(line) = read_line(input, &prompt)? else {
            return Ok(false);
        };
        if line.eq_ignore_ascii_case("q") {
            return Ok(false);
        }
        let (x, y, orient) = if line.is_empty() {
            let attempts = game.config().placement_attempts;
            game.human_board()
                .random_placement(rng, def.length(), attempts)
                .map_err(|e| anyhow::anyhow!(e))?
        } else {
            let (coord, orient) = match line.rsplit_once(char::is_whitespace) {
                Some((c, o)) if o.eq_ignore_ascii_case("v") => (c, Orientation::Vertical),
                Some((c, o)) if o.eq_ignore_ascii_case("h") => (c, Orientation::Horizontal),
                _ => (line.as_str(), Orientation::Horizontal),
            };
            match notation::parse_coordinate(coord) {
                Ok((x, y)) => (x, y, orient),
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            }
        };
        if let Err(e) = game.place_ship(index, x, y, orient) {
            println!("{}", e);
        }
    }
    Ok(true)
}

fn play(
    difficulty: Difficulty,
    team: Team,
    seed: Option<u64>,
    random_fleet: bool,
    reveal: bool,
) -> anyhow::Result<()> {
    let mut rng = make_rng(seed);
    let match_rng = SmallRng::from_rng(&mut rng);
    let mut game = Match::new(MatchConfig::default(), match_rng).map_err(|e| anyhow::anyhow!(e))?;
    game.start(team, difficulty).map_err(|e| anyhow::anyhow!(e))?;

    println!(
        "Battle of Midway: {} vs {} ({})",
        team.label(),
        team.opponent().label(),
        difficulty
    );

    let stdin = io::stdin();
    let mut input = stdin.lock();

    if random_fleet {
        game.randomize_human_fleet().map_err(|e| anyhow::anyhow!(e))?;
    } else if !deploy(&mut game, &mut rng, &mut input)? {
        println!("Goodbye.");
        return Ok(());
    }

    println!("Enter coordinates as 'x,y' (e.g. 3,4) or 'A5'. Type 'q' to quit.");
    while game.phase() == Phase::Playing {
        println!();
        print_state(&game, reveal);
        let Some(line) = read_line(&mut input, "\nAttack coordinate: ")? else {
            break;
        };
        let result = match notation::parse_command(&line) {
            Ok(Command::Quit) => {
                println!("Goodbye.");
                return Ok(());
            }
            Ok(Command::Attack((x, y))) => game.attack(x, y),
            Ok(Command::Special(weapon, (x, y))) => game.special_attack(weapon, x, y),
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        match result {
            Ok(report) => report_turn(&report),
            Err(e @ MatchError::Setup(_)) => return Err(anyhow::anyhow!(e)),
            Err(e) => println!("{}", e),
        }
    }

    if game.phase() == Phase::Over {
        print_state(&game, true);
        match game.winner() {
            Some(Side::Human) => println!(
                "\nVictory at Midway! {} forces have sunk the enemy fleet.",
                team.label()
            ),
            Some(Side::Computer) => println!(
                "\nDefeat at Midway. {} forces have sunk your fleet.",
                team.opponent().label()
            ),
            None => println!("\nGame over."),
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            difficulty,
            team,
            seed,
            random_fleet,
            reveal,
        } => play(difficulty.into(), team.into(), seed, random_fleet, reveal),
    }
}
