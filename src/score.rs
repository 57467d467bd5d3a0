use crate::deal::Card;

/// Maximum capped sum the stack may reach before it must reset.
pub const STACK_MAX: u8 = 31;

const TARGET_SUMS: [u8; 2] = [15, STACK_MAX];
const SET_POINTS: [u32; 3] = [2, 6, 12];
const MAX_RUN: usize = 7;

/// Sum of capped card values on the stack.
pub fn stack_sum(stack: &[Card]) -> u8 {
    stack.iter().map(|card| card.capped_value()).sum()
}

/// Points awarded for playing `card` onto `stack`. Pure; scores the
/// hypothetical stack with the card appended, before it is actually
/// placed (and before any reset).
pub fn score_card(stack: &[Card], card: Card) -> u32 {
    let mut points = 0;

    // His heels: a jack opening a fresh stack.
    if stack.is_empty() && card.rank() == 11 {
        points += 2;
    }

    let sum = stack_sum(stack) + card.capped_value();
    if TARGET_SUMS.contains(&sum) {
        points += 2;
    }

    let matched = stack
        .iter()
        .rev()
        .take_while(|c| c.rank() == card.rank())
        .count();
    if matched > 0 {
        points += SET_POINTS[(matched - 1).min(SET_POINTS.len() - 1)];
    }

    // Only the longest run counts, and a repeated rank anywhere in the
    // window disqualifies that length.
    let mut run_points = 0;
    for run_length in 3..=MAX_RUN {
        if stack.len() < run_length - 1 {
            break;
        }
        let mut ranks: Vec<u8> = stack[stack.len() - (run_length - 1)..]
            .iter()
            .map(|c| c.rank())
            .collect();
        ranks.push(card.rank());
        ranks.sort_unstable();
        if ranks.windows(2).all(|w| w[1] == w[0] + 1) {
            run_points = run_length as u32;
        }
    }
    points + run_points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(ranks: &[u8]) -> Vec<Card> {
        ranks.iter().map(|&r| Card::new(r)).collect()
    }

    #[test]
    fn test_stack_sum() {
        assert_eq!(stack_sum(&stack(&[])), 0);
        assert_eq!(stack_sum(&stack(&[1, 5, 13])), 16);
        assert_eq!(stack_sum(&stack(&[10, 11, 12])), 30);
    }

    #[test]
    fn test_opening_jack() {
        assert_eq!(score_card(&stack(&[]), Card::new(11)), 2);
        assert_eq!(score_card(&stack(&[]), Card::new(10)), 0);
        // Not an opener once the stack has a card.
        assert_eq!(score_card(&stack(&[2]), Card::new(11)), 0);
    }

    #[test]
    fn test_target_sums() {
        assert_eq!(score_card(&stack(&[5]), Card::new(10)), 2);
        assert_eq!(score_card(&stack(&[5]), Card::new(13)), 2);
        assert_eq!(score_card(&stack(&[10, 10, 8]), Card::new(3)), 2);
        assert_eq!(score_card(&stack(&[1]), Card::new(2)), 0);
    }

    #[test]
    fn test_matched_sets() {
        assert_eq!(score_card(&stack(&[7]), Card::new(7)), 2);
        assert_eq!(score_card(&stack(&[7, 7]), Card::new(7)), 6);
        assert_eq!(score_card(&stack(&[2, 7, 7, 7]), Card::new(7)), 12);
        // Suffix must be contiguous.
        assert_eq!(score_card(&stack(&[7, 2]), Card::new(7)), 0);
    }

    #[test]
    fn test_runs() {
        assert_eq!(score_card(&stack(&[2, 3]), Card::new(4)), 3);
        // 4-5-6 is a run of 3 that also lands on 15.
        assert_eq!(score_card(&stack(&[4, 5]), Card::new(6)), 5);
        // Out-of-order cards still form a run.
        assert_eq!(score_card(&stack(&[6, 4]), Card::new(5)), 5); // run of 3 + sum 15
        assert_eq!(score_card(&stack(&[2, 3, 4, 5]), Card::new(6)), 5);
        // A repeated rank in the window kills that length, shorter
        // windows may still count.
        assert_eq!(score_card(&stack(&[4, 4, 5]), Card::new(6)), 3);
        // Longest run wins; no double counting of the shorter one.
        assert_eq!(score_card(&stack(&[1, 2, 3, 4, 5, 6]), Card::new(7)), 7);
    }

    #[test]
    fn test_combined_bonuses() {
        // 7 7 gives a pair plus 15 on a 1+7+7 stack.
        assert_eq!(score_card(&stack(&[1, 7]), Card::new(7)), 4);
        // 31 exactly, nothing else lines up.
        assert_eq!(score_card(&stack(&[10, 10, 4, 5]), Card::new(2)), 2);
    }

    #[test]
    fn test_single_bonus_hands() {
        assert_eq!(score_card(&stack(&[]), Card::new(11)), 2);
        assert_eq!(score_card(&stack(&[5]), Card::new(10)), 2);
        assert_eq!(score_card(&stack(&[7, 7]), Card::new(7)), 6);
        assert_eq!(score_card(&stack(&[2, 3]), Card::new(4)), 3);
        assert_eq!(score_card(&stack(&[1]), Card::new(2)), 0);
    }
}
