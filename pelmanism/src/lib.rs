pub use auto_player::*;
pub use board::*;
pub use cards::*;
pub use config::*;
pub use deck::*;
pub use engine::*;
pub use errors::*;
pub use memory::*;
pub use moves::*;
pub use player::*;
pub use turn::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod auto_player;
mod board;
mod cards;
mod config;
mod deck;
mod engine;
mod errors;
mod memory;
mod moves;
mod player;
mod turn;
mod visualization;
