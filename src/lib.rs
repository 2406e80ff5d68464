pub mod api;
pub mod board;
pub mod constants;
pub mod engine;
pub mod error;
pub mod evaluate;
pub mod movegen;
pub mod moves;
pub mod piece;
pub mod position;
pub mod self_test;
pub mod square;
pub mod types;
