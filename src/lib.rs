//! This crate solves single-player cribbage-style pegging: a shuffled
//! deck is cut into piles and cards are played from the pile tops onto
//! a shared stack, scoring for 15s, 31s, matched sets and runs. The
//! solver runs a step-bounded best-first search over pile choices and
//! reports the highest-scoring play line it found.

pub mod choice;
pub mod deal;
pub mod score;
pub mod solver;
