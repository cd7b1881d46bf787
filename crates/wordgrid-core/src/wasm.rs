//! WebAssembly bindings for the rule engine.
//!
//! This module exposes the engine to JavaScript through wasm-bindgen. Every
//! structured value crosses the boundary as a JSON string.

use wasm_bindgen::prelude::*;

use crate::actions::GameAction;
use crate::bot::{Bot, BotDifficulty};
use crate::config::GameConfig;
use crate::game::TurnEngine;
use crate::lexicon::Lexicon;
use crate::validator::Placement;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed game wrapper
#[wasm_bindgen]
pub struct WasmGame {
    engine: TurnEngine,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a game from a JSON array of player names and a newline-delimited
    /// word list
    #[wasm_bindgen(constructor)]
    pub fn new(player_names_json: &str, dictionary: &str) -> Result<WasmGame, JsValue> {
        let player_names: Vec<String> = serde_json::from_str(player_names_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid player names: {}", e)))?;

        let mut lexicon = Lexicon::new();
        lexicon.load_from_str(dictionary);

        let engine = TurnEngine::new(GameConfig::new(player_names), lexicon)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmGame { engine })
    }

    /// Get the current game state as JSON
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        serde_json::to_string(self.engine.state()).unwrap_or_else(|_| "{}".to_string())
    }

    #[wasm_bindgen(js_name = getCurrentPlayer)]
    pub fn get_current_player(&self) -> u8 {
        self.engine.current_player()
    }

    /// Submit a JSON array of placements for the current player. Returns the
    /// move outcome as JSON, or the rejection reason.
    #[wasm_bindgen(js_name = submitMove)]
    pub fn submit_move(&mut self, placements_json: &str) -> Result<String, JsValue> {
        let placements: Vec<Placement> = serde_json::from_str(placements_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid placements JSON: {}", e)))?;

        match self.engine.submit_move(&placements) {
            Ok(outcome) => Ok(serde_json::to_string(&outcome).unwrap_or_else(|_| "{}".to_string())),
            Err(e) => Err(JsValue::from_str(&e.to_string())),
        }
    }

    pub fn pass(&mut self) -> Result<(), JsValue> {
        self.engine
            .pass()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Apply an action from JSON, returns events JSON or error
    #[wasm_bindgen(js_name = applyAction)]
    pub fn apply_action(&mut self, player: u8, action_json: &str) -> Result<String, JsValue> {
        let action: GameAction = serde_json::from_str(action_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid action JSON: {}", e)))?;

        match self.engine.apply_action(player, action) {
            Ok(events) => Ok(serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())),
            Err(e) => Err(JsValue::from_str(&format!("Action failed: {}", e))),
        }
    }

    /// Board letters as a 15x15 JSON array, `null` for empty cells
    #[wasm_bindgen(js_name = getBoard)]
    pub fn get_board(&self) -> String {
        serde_json::to_string(&self.engine.board_snapshot()).unwrap_or_else(|_| "[]".to_string())
    }

    /// A player's rack as a string of symbols, `?` for blanks
    #[wasm_bindgen(js_name = getRack)]
    pub fn get_rack(&self, player: u8) -> String {
        self.engine
            .rack_of(player)
            .map(|rack| rack.iter().map(|t| t.symbol()).collect())
            .unwrap_or_default()
    }

    #[wasm_bindgen(js_name = getScore)]
    pub fn get_score(&self, player: u8) -> u32 {
        self.engine.score_of(player).unwrap_or(0)
    }

    #[wasm_bindgen(js_name = getWordHistory)]
    pub fn get_word_history(&self) -> String {
        serde_json::to_string(self.engine.word_history()).unwrap_or_else(|_| "[]".to_string())
    }

    #[wasm_bindgen(js_name = isFinished)]
    pub fn is_finished(&self) -> bool {
        self.engine.is_over()
    }

    /// Get the current phase as JSON
    #[wasm_bindgen(js_name = getPhase)]
    pub fn get_phase(&self) -> String {
        serde_json::to_string(self.engine.phase()).unwrap_or_else(|_| "\"Unknown\"".to_string())
    }

    /// Get a bot's suggested action for a player
    /// difficulty: "Easy" or "Hard"
    #[wasm_bindgen(js_name = getBotAction)]
    pub fn get_bot_action(&self, player: u8, difficulty: &str) -> String {
        let diff = match difficulty {
            "Easy" => BotDifficulty::Easy,
            _ => BotDifficulty::Hard,
        };

        let mut bot = Bot::new(player, diff);
        let action = bot.propose(&self.engine);
        serde_json::to_string(&action).unwrap_or_else(|_| "null".to_string())
    }
}
