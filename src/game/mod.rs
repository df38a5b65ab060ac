pub mod ai;
pub mod controller;
pub mod model;

pub use ai::RandomAi;
pub use controller::{GameController, DEFAULT_AI_DELAY_MS};
pub use model::{Player, Status};
