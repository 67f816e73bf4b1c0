//! Terminal UI: renders engine snapshots and turns key presses into drops.

mod app;
mod game_view;

pub use app::App;
