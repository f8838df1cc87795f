//! Gremlin Stars entry point
//!
//! Headless runner: plays a move string against a stage at a fixed timestep
//! and reports how it ended.
//!
//! ```text
//! gremlin-stars [PACK] [STAGE] [MOVES]
//! gremlin-stars assets/stages.json 2 UR
//! ```

use gremlin_stars::consts::SIM_DT;
use gremlin_stars::sim::{Direction, FrameInput};
use gremlin_stars::{AssetPack, Game, GamePhase, Settings};

/// Frames to wait for a push to settle before giving up
const SETTLE_FRAMES: usize = 60 * 30;

fn main() {
    env_logger::init();
    log::info!("Gremlin Stars (headless) starting...");

    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let mut settings = Settings::load(Settings::FILE_NAME);
    if let Some(pack) = args.next() {
        settings.level_pack = pack.into();
    }
    if let Some(stage) = args.next() {
        settings.start_stage = stage.parse()?;
    }
    let moves = args.next().unwrap_or_default();

    let assets = AssetPack::load(&settings.level_pack)?;
    let mut game = Game::new(assets, &settings)?;
    let stage = game.stage();
    println!(
        "Stage {} \"{}\" ({} moves)",
        stage.index(),
        stage.tilemap().name,
        stage.moves()
    );

    for c in moves.chars() {
        let Some(dir) = Direction::from_char(c) else {
            log::warn!("Skipping unknown move '{c}'");
            continue;
        };
        game.update(&FrameInput::push(dir), SIM_DT)?;
        settle(&mut game)?;
        if game.phase() != GamePhase::Playing {
            break;
        }
    }

    match game.phase() {
        GamePhase::Playing => println!("Unfinished, {} moves left", game.stage().moves()),
        GamePhase::ShowingOutcome(outcome) if outcome.won() => {
            println!("Cleared with {} moves left", game.stage().moves())
        }
        GamePhase::ShowingOutcome(_) => println!("Out of moves"),
        GamePhase::Complete => println!("All stages cleared"),
    }
    Ok(())
}

/// Step until the stage is idle again or reports an outcome
fn settle(game: &mut Game) -> Result<(), Box<dyn std::error::Error>> {
    let idle = FrameInput::default();
    for _ in 0..SETTLE_FRAMES {
        game.update(&idle, SIM_DT)?;
        let busy = game.stage().gremlins().iter().any(|g| g.active());
        if game.phase() != GamePhase::Playing || (!busy && !game.stage().is_moving()) {
            break;
        }
    }
    // Let the stage observe the stop (and any win it uncovers)
    if game.phase() == GamePhase::Playing {
        game.update(&idle, SIM_DT)?;
    }
    game.audio_mut().drain();
    Ok(())
}
