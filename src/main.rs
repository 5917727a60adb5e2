use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use ttt4d_engine::Difficulty;
use ttt4d_session::outcome::{DRAWS_METRIC, LOSSES_METRIC, WINS_METRIC};
use ttt4d_session::{GameController, Outcome, ScoreKeeper, SessionConfig, SessionError, Step};

/// Play 4D tic-tac-toe against the computer.
#[derive(Parser)]
#[command(name = "tic-tac-toe-4d", about = "Play 4D tic-tac-toe against the computer")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "ttt4d.toml")]
    config: PathBuf,

    /// Let the AI look one ply further
    #[arg(long)]
    smarter: bool,

    /// Override the board side length
    #[arg(long)]
    size: Option<usize>,
}

// In-memory score keeper for this run
#[derive(Debug, Default)]
struct Tally {
    wins: u32,
    losses: u32,
    draws: u32,
    achievements: Vec<String>,
}

#[derive(Clone, Default)]
struct SharedTally(Rc<RefCell<Tally>>);

impl ScoreKeeper for SharedTally {
    fn increment(&mut self, metric: &str) {
        let mut tally = self.0.borrow_mut();
        match metric {
            WINS_METRIC => tally.wins += 1,
            LOSSES_METRIC => tally.losses += 1,
            DRAWS_METRIC => tally.draws += 1,
            _ => {}
        }
    }

    fn unlock_achievement(&mut self, achievement: &str) {
        let mut tally = self.0.borrow_mut();
        if !tally.achievements.iter().any(|a| a == achievement) {
            println!("Achievement unlocked: {achievement}");
            tally.achievements.push(achievement.to_string());
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = SessionConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if cli.smarter {
        config.difficulty = Difficulty::SlightlySmarter;
    }
    if let Some(size) = cli.size {
        config.size = size;
    }

    let tally = SharedTally::default();
    let reporter = |outcome: Outcome| println!("Game over: {outcome}");
    let mut controller = GameController::initialize(&config, reporter)
        .context("starting the game")?
        .with_score_keeper(tally.clone());
    info!("playing on a {}^4 board at depth {}", config.size, config.depth());

    println!("You are X. Enter moves as `w x y z` (0-based), `new` to restart, `quit` to leave.");
    println!("{}", controller.session().state().board());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let line = line?;

        match line.trim() {
            "" => continue,
            "quit" | "q" => break,
            "new" => {
                controller.reset()?;
                println!("{}", controller.session().state().board());
                continue;
            }
            input => {
                let parsed = input
                    .split_whitespace()
                    .map(str::parse::<usize>)
                    .collect::<Result<Vec<_>, _>>();
                let components = match parsed {
                    Ok(components) => components,
                    Err(_) => {
                        println!("Expected four numbers, e.g. `0 1 2 3`");
                        continue;
                    }
                };
                if play_turn(&mut controller, &components)?.is_some() {
                    let t = tally.0.borrow();
                    println!("Record: {} won, {} lost, {} drawn", t.wins, t.losses, t.draws);
                    println!("Type `new` for another game or `quit` to leave.");
                }
            }
        }
    }

    Ok(())
}

// Returns the outcome once the game is decided
fn play_turn(controller: &mut GameController, components: &[usize]) -> Result<Option<Outcome>> {
    let step = match controller.submit_move(components) {
        Ok(step) => step,
        Err(SessionError::Game(err)) => {
            println!("{err}");
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };

    let step = match step {
        Step::DispatchAi(_) => {
            println!("Thinking...");
            controller.wait_for_ai()?
        }
        step => step,
    };
    println!("{}", controller.session().state().board());

    Ok(match step {
        Step::Finished(outcome) => Some(outcome),
        _ => None,
    })
}
