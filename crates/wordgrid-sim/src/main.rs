//! Wordgrid headless simulator.
//!
//! Seats 2-4 bots, plays one game to the end and logs every turn.

use anyhow::Context;
use std::fs;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wordgrid_core::{Bot, BotDifficulty, GameAction, GameConfig, Lexicon, PremiumLayout, TurnEngine};

mod settings;

use settings::Settings;

/// Upper bound on turns; a finished game never gets close
const MAX_TURNS: usize = 2_000;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env()?;

    let mut lexicon = Lexicon::new();
    if lexicon.load_from_path(&settings.dictionary)? == 0 {
        warn!(path = %settings.dictionary.display(), "Dictionary has no usable words");
    }

    let seed = settings.seed.unwrap_or_else(rand::random);
    let mut config = GameConfig::new(settings.players.clone()).with_seed(seed);
    if let Some(path) = &settings.layout {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading layout {}", path.display()))?;
        config = config.with_layout(PremiumLayout::parse(&text)?);
    }

    info!(seed, players = ?settings.players, "Starting simulation");
    let mut engine = TurnEngine::new(config, lexicon)?;

    let mut bots: Vec<Bot> = (0..engine.player_count())
        .map(|id| {
            let bot = Bot::with_seed(id as u8, BotDifficulty::Hard, seed.wrapping_add(id as u64 + 1));
            match settings.max_candidates {
                Some(n) => bot.with_max_candidates(n),
                None => bot,
            }
        })
        .collect();

    for _ in 0..MAX_TURNS {
        if engine.is_over() {
            break;
        }
        let player = engine.current_player();
        let action = bots[player as usize].propose(&engine);
        let label = match &action {
            GameAction::PlaceTiles(p) => format!("place {} tiles", p.len()),
            GameAction::Pass => "pass".to_string(),
            GameAction::Exchange(t) => format!("exchange {} tiles", t.len()),
        };

        match engine.apply_action(player, action) {
            Ok(events) => {
                for event in &events {
                    info!(player, action = %label, event = %serde_json::to_string(event)?, "Turn");
                }
            }
            Err(e) if e.is_rejection() => {
                warn!(player, error = %e, "Bot action rejected, passing");
                engine.pass()?;
            }
            Err(e) => return Err(e.into()),
        }
    }

    if !engine.is_over() {
        warn!(turns = MAX_TURNS, "Stopped before the game finished");
    }

    for player in &engine.state().players {
        info!(player = %player.name, score = player.score, "Running score");
    }
    if let Some(finals) = engine.state().final_scores() {
        info!(scores = ?finals, words = engine.word_history().len(), "Final scores");
    }
    println!("{}", engine.board());

    if let Some(path) = &settings.save {
        engine.save(path)?;
        info!(path = %path.display(), "Snapshot saved");
    }

    Ok(())
}
