mod queue;

pub use queue::MaxQueue;

use crate::choice::Choice;
use crate::deal::{Card, Pile};
use crate::score::{STACK_MAX, score_card, stack_sum};

use ahash::AHasher;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use std::hash::Hasher;
use std::time::{Duration, Instant};

/// Default search budget; enough to drain most 4-pile deals.
pub const DEFAULT_MAX_STEPS: usize = 3_000_000;

type Stack = SmallVec<[Card; 16]>;

/// A search node: the piles as they remain, the cards on the shared
/// stack since the last reset, and the points earned so far. States
/// are created by `attempt_move` and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub piles: Vec<Pile>,
    pub stack: Stack,
    pub score: u32,
}

impl State {
    pub fn new(piles: Vec<Pile>) -> Self {
        Self {
            piles,
            stack: Stack::new(),
            score: 0,
        }
    }

    /// The game is over once every pile has been played out.
    pub fn is_done(&self) -> bool {
        self.piles.iter().all(|pile| pile.is_empty())
    }

    /// Plays the top card of `piles[pile_index]` onto the stack.
    /// Returns `None` when the pile is empty or the card would push
    /// the capped stack sum past `STACK_MAX`; the caller just skips
    /// such moves. The stack empties on the child when it hits
    /// `STACK_MAX` exactly or when no remaining top card fits under
    /// the remainder.
    pub fn attempt_move(&self, pile_index: usize) -> Option<State> {
        let pile = self.piles.get(pile_index)?;
        let card = *pile.last()?;
        let current_sum = stack_sum(&self.stack);
        if current_sum + card.capped_value() > STACK_MAX {
            return None;
        }

        let points = score_card(&self.stack, card);

        let mut piles = self.piles.clone();
        piles[pile_index].pop();

        let remainder = STACK_MAX - current_sum - card.capped_value();
        let end_stack = remainder == 0
            || match piles
                .iter()
                .filter_map(|p| p.last())
                .map(|c| c.capped_value())
                .min()
            {
                Some(min_top) => min_top > remainder,
                None => true,
            };

        let stack = if end_stack {
            Stack::new()
        } else {
            let mut stack = self.stack.clone();
            stack.push(card);
            stack
        };

        Some(State {
            piles,
            stack,
            score: self.score + points,
        })
    }

    /// Canonical order-sensitive hash of (piles, stack, score), used
    /// to visit each distinct position at most once.
    fn fingerprint(&self) -> u64 {
        let mut bytes: SmallVec<[u8; 64]> = SmallVec::new();
        for pile in &self.piles {
            bytes.push(pile.len() as u8);
            bytes.extend(pile.iter().map(|card| card.rank()));
        }
        bytes.extend(self.stack.iter().map(|card| card.rank()));
        bytes.extend_from_slice(&self.score.to_le_bytes());

        let mut hasher = AHasher::default();
        hasher.write(&bytes);
        hasher.finish()
    }
}

/// Arena entry; parent is an arena index, `None` only for the root.
#[derive(Debug, Clone)]
struct Node {
    state: State,
    parent: Option<u32>,
    choice: u8,
}

#[derive(Debug, Clone)]
pub struct SolveResult {
    /// Highest-scoring state found within the step budget.
    pub best: State,
    /// Pile choices replaying the root into `best`.
    pub choices: Vec<Choice>,
    /// States expanded before the search stopped.
    pub states: usize,
    /// True when the frontier drained before the budget ran out; a
    /// `false` here means best-effort, not proven optimal.
    pub complete: bool,
    pub elapsed: Duration,
}

/// Best-first search over pile choices, greedy on score and bounded
/// by `max_steps` dequeues. Children are deduplicated by fingerprint
/// and enqueued at their own score; the best state is tracked by
/// strict improvement, so among equal scores the first one dequeued
/// wins.
pub fn solve(initial: State, max_steps: usize) -> SolveResult {
    let timer = Instant::now();
    let pile_count = initial.piles.len();

    let mut queue = MaxQueue::with_capacity(1024);
    let mut seen = FxHashSet::default();
    seen.insert(initial.fingerprint());

    let mut arena: Vec<Node> = vec![Node {
        state: initial,
        parent: None,
        choice: 0,
    }];
    queue.push(0u32, 0);

    let mut best: u32 = 0;
    let mut steps = 0;

    while steps < max_steps {
        let Some(index) = queue.pop() else {
            break;
        };
        steps += 1;

        if arena[index as usize].state.score > arena[best as usize].state.score {
            best = index;
        }
        if arena[index as usize].state.is_done() {
            continue;
        }

        for pile_index in 0..pile_count {
            let Some(child) = arena[index as usize].state.attempt_move(pile_index) else {
                continue;
            };
            if !seen.insert(child.fingerprint()) {
                continue;
            }
            let child_index = arena.len() as u32;
            let priority = child.score;
            arena.push(Node {
                state: child,
                parent: Some(index),
                choice: pile_index as u8,
            });
            queue.push(child_index, priority);
        }
    }

    let complete = queue.is_empty();
    let choices = reconstruct(&arena, best);

    SolveResult {
        best: arena.swap_remove(best as usize).state,
        choices,
        states: steps,
        complete,
        elapsed: timer.elapsed(),
    }
}

/// Walks parent handles from `index` back to the root and reverses,
/// so the choices read in play order. The root contributes no entry.
fn reconstruct(arena: &[Node], mut index: u32) -> Vec<Choice> {
    let mut choices = Vec::new();
    while let Some(parent) = arena[index as usize].parent {
        let node = &arena[index as usize];
        let pile = node.choice as usize;
        let card = *arena[parent as usize].state.piles[pile]
            .last()
            .expect("Parent pile must hold the played card");
        choices.push(Choice {
            pile,
            score: node.state.score,
            card,
            stack_reset: node.state.stack.is_empty(),
        });
        index = parent;
    }
    choices.reverse();
    choices
}
