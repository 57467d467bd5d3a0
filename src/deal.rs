use anyhow::{Context, Result, bail};
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use smallvec::SmallVec;

pub const MAX_RANK: u8 = 13;
pub const SUIT_COUNT: usize = 4;
pub const DECK_SIZE: usize = MAX_RANK as usize * SUIT_COUNT;
pub const DEFAULT_PILE_COUNT: usize = 4;

/// A pile of cards; cards are drawn from the tail only.
pub type Pile = SmallVec<[Card; 18]>;

/// A playing card reduced to its rank (1 = ace, 11/12/13 = J/Q/K).
/// Suits never affect pegging legality or points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card(u8);

impl Card {
    pub fn new(rank: u8) -> Self {
        debug_assert!((1..=MAX_RANK).contains(&rank));
        Self(rank)
    }

    pub fn parse(token: &str) -> Result<Self> {
        let rank = match token.to_ascii_lowercase().as_str() {
            "a" => 1,
            "j" => 11,
            "q" => 12,
            "k" => 13,
            s => s
                .parse::<u8>()
                .ok()
                .filter(|r| (1..=MAX_RANK).contains(r))
                .with_context(|| format!("Invalid card token '{token}'"))?,
        };
        Ok(Self(rank))
    }

    pub fn rank(&self) -> u8 {
        self.0
    }

    /// The rank clamped to 10, used for all stack sum computations.
    pub fn capped_value(&self) -> u8 {
        self.0.min(10)
    }

    pub fn pretty_print(&self) -> String {
        match self.0 {
            1 => " A".into(),
            10 => "10".into(),
            11 => " J".into(),
            12 => " Q".into(),
            13 => " K".into(),
            r => format!(" {r}"),
        }
    }
}

/// A dealt game: the full deck cut into ordered piles.
#[derive(Debug, Clone)]
pub struct Deal {
    pub piles: Vec<Pile>,
}

impl Deal {
    /// Builds a reproducible deal by shuffling a fresh deck with the
    /// given seed and cutting it into `pile_count` piles.
    pub fn new_from_seed(seed: u64, pile_count: usize) -> Result<Self> {
        let mut deck = full_deck();
        let mut rng = StdRng::seed_from_u64(seed);
        deck.shuffle(&mut rng);
        Self::from_deck(deck, pile_count)
    }

    /// Parses an explicit deal from exactly `DECK_SIZE` rank tokens
    /// (`a j q k` or digits), given in deck order before the cut.
    pub fn parse<S: AsRef<str>>(tokens: &[S], pile_count: usize) -> Result<Self> {
        if tokens.len() != DECK_SIZE {
            bail!(
                "Expected {DECK_SIZE} card tokens, got {}.",
                tokens.len()
            );
        }
        let deck = tokens
            .iter()
            .map(|t| Card::parse(t.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::from_deck(deck, pile_count)
    }

    fn from_deck(deck: Vec<Card>, pile_count: usize) -> Result<Self> {
        if pile_count < 1 || pile_count > deck.len() {
            bail!("Pile count must be between 1 and {}.", deck.len());
        }
        Ok(Self {
            piles: cut(&deck, pile_count),
        })
    }

    pub fn pile_count(&self) -> usize {
        self.piles.len()
    }

    pub fn pretty_print(&self) -> String {
        let mut output = String::new();
        let rows = self.piles.iter().map(|p| p.len()).max().unwrap_or(0);
        for row in 0..rows {
            let line = self
                .piles
                .iter()
                .map(|pile| match pile.get(row) {
                    Some(card) => card.pretty_print(),
                    None => "  ".into(),
                })
                .collect::<Vec<_>>()
                .join(" ");
            output.push_str(line.trim_end());
            output.push('\n');
        }
        output.push_str(&format!("Piles: {}", self.pile_count()));
        output
    }
}

/// The 52-card deck in canonical order, four copies of each rank.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for _ in 0..SUIT_COUNT {
        for rank in 1..=MAX_RANK {
            deck.push(Card::new(rank));
        }
    }
    deck
}

/// Cuts the deck into `pile_count` piles: the first `pile_count - 1`
/// piles take `len / pile_count` cards each, the last takes the rest.
fn cut(deck: &[Card], pile_count: usize) -> Vec<Pile> {
    let pile_size = deck.len() / pile_count;
    let mut piles = Vec::with_capacity(pile_count);
    for i in 0..pile_count - 1 {
        piles.push(deck[pile_size * i..pile_size * (i + 1)].iter().copied().collect());
    }
    piles.push(deck[pile_size * (pile_count - 1)..].iter().copied().collect());
    piles
}
