use wasm_bindgen::prelude::*;
use orrery_engine::*;

mod bodies;
mod game;
mod orbit;
mod picking;
mod ui;
use game::SolarSystem;

orrery_web::export_game!(SolarSystem, "solar-system");

// ---- Scene-specific exports ----

/// Raw value of the speed control; coerced like `Number()`.
#[wasm_bindgen]
pub fn set_speed_input(text: &str) {
    with_runner(|r| r.game_mut().set_speed_input(text));
}

#[wasm_bindgen]
pub fn close_panel() {
    with_runner(|r| r.game_mut().close_panel());
}

#[wasm_bindgen]
pub fn get_panel_visible() -> bool {
    with_runner(|r| r.game().panel().visible)
}

#[wasm_bindgen]
pub fn get_panel_title() -> String {
    with_runner(|r| r.game().panel().title.clone())
}

#[wasm_bindgen]
pub fn get_panel_text() -> String {
    with_runner(|r| r.game().panel().text.clone())
}
