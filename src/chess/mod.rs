//! Implementation of chess rules: board representation, move generation,
//! legality filtering and position (de)serialization.

pub mod attacks;
pub mod board;
pub mod core;
pub mod movegen;
pub mod position;
