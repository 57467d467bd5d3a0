use crate::deal::Card;

/// One entry of the reconstructed play line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    /// Zero-based pile the card was drawn from.
    pub pile: usize,
    /// Cumulative score after this play.
    pub score: u32,
    /// The card that was on top of the chosen pile.
    pub card: Card,
    /// Whether this play ended the stack.
    pub stack_reset: bool,
}

/// Formats the play line one choice per row, pile numbers one-based,
/// with a blank line after each stack reset.
pub fn format_choices(choices: &[Choice]) -> String {
    let mut output = String::new();
    for choice in choices {
        output.push_str(&format!(
            "{} ({}): {}\n",
            choice.pile + 1,
            choice.card.pretty_print(),
            choice.score
        ));
        if choice.stack_reset {
            output.push('\n');
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_choices() {
        let choices = [
            Choice {
                pile: 0,
                score: 0,
                card: Card::new(5),
                stack_reset: false,
            },
            Choice {
                pile: 3,
                score: 2,
                card: Card::new(10),
                stack_reset: true,
            },
            Choice {
                pile: 1,
                score: 4,
                card: Card::new(11),
                stack_reset: false,
            },
        ];
        assert_eq!(
            format_choices(&choices),
            "1 ( 5): 0\n4 (10): 2\n\n2 ( J): 4\n"
        );
    }

    #[test]
    fn test_format_no_choices() {
        assert_eq!(format_choices(&[]), "");
    }
}
