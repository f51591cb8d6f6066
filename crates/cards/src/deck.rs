// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cards and deck definitions.
use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Primes used to encode a card rank.
const PRIMES: [u32; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

/// A playing card.
///
/// A card is represented using the encoding in the [Cactus Kev's][kevlink] Poker
/// hand evaluator with each card having the following format:
///
/// ```text
///   +--------+--------+--------+--------+
///   |xxxbbbbb|bbbbbbbb|cdhsrrrr|xxpppppp|
///   +--------+--------+--------+--------+
///   p = prime number of rank (deuce=2,trey=3,four=5,five=7,...,ace=41)
///   r = rank of card (deuce=0,trey=1,four=2,five=3,...,ace=12)
///   cdhs = suit of card
///   b = bit turned on depending on rank of card
/// ```
///
/// The canonical text form is the two characters code rank symbol followed by
/// suit symbol, for example `Ah` or `Tc`.
///
/// [kevlink]: http://suffe.cool/poker/evaluator.html
#[derive(Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card(u32);

impl Card {
    /// Create a card given a rank and suit.
    pub fn new(rank: Rank, suit: Suit) -> Card {
        let (rank, suit) = (rank as u32, suit as u32);
        Self(PRIMES[rank as usize] | (rank << 8) | (suit << 12) | (1 << (rank + 16)))
    }

    /// This card unique id.
    pub fn id(&self) -> u32 {
        self.0
    }

    /// Returns the card suit.
    pub fn suit(&self) -> Suit {
        match (self.0 >> 12) & 0xf {
            0x8 => Suit::Clubs,
            0x4 => Suit::Diamonds,
            0x2 => Suit::Hearts,
            0x1 => Suit::Spades,
            _ => unreachable!("Invalid suit value 0x{:x}", self.0),
        }
    }

    /// Returns the card rank.
    pub fn rank(&self) -> Rank {
        Rank::from_index(((self.0 >> 8) & 0xf) as usize)
            .unwrap_or_else(|| unreachable!("Invalid rank 0x{:x}", self.0))
    }

    /// Returns a mask with the bit `rank` set.
    #[inline]
    pub fn rank_mask(&self) -> u16 {
        (self.0 >> 16) as u16
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}{})", self.rank(), self.suit())
    }
}

/// Error returned when parsing a card code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid card code '{0}'")]
pub struct ParseCardError(String);

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(rank), Some(suit), None) => {
                let rank = Rank::from_symbol(rank);
                let suit = Suit::from_symbol(suit);
                rank.zip(suit)
                    .map(|(rank, suit)| Card::new(rank, suit))
                    .ok_or_else(|| ParseCardError(s.to_string()))
            }
            _ => Err(ParseCardError(s.to_string())),
        }
    }
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Deuce
    Deuce = 0,
    /// Trey
    Trey,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace
    Ace,
}

impl Rank {
    const ALL: [Rank; 13] = [
        Rank::Deuce,
        Rank::Trey,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Returns all ranks from deuce to ace.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> {
        Self::ALL.into_iter()
    }

    /// Returns the rank with the given index, deuce is 0 and ace is 12.
    pub fn from_index(idx: usize) -> Option<Rank> {
        Self::ALL.get(idx).copied()
    }

    /// The rank symbol used in card codes.
    pub fn symbol(&self) -> char {
        match self {
            Rank::Deuce => '2',
            Rank::Trey => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }

    fn from_symbol(c: char) -> Option<Rank> {
        let c = c.to_ascii_uppercase();
        Self::ranks().find(|r| r.symbol() == c)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Card suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit.
    Clubs = 8,
    /// Diamonds suit.
    Diamonds = 4,
    /// Hearts suit.
    Hearts = 2,
    /// Spades suit.
    Spades = 1,
}

impl Suit {
    /// Returns all suits in canonical order.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades].into_iter()
    }

    /// The suit symbol used in card codes.
    pub fn symbol(&self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }

    fn from_symbol(c: char) -> Option<Suit> {
        let c = c.to_ascii_lowercase();
        Self::suits().find(|s| s.symbol() == c)
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Deck errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeckError {
    /// Not enough cards left in the deck.
    #[error("deck exhausted: requested {requested} cards with {remaining} left")]
    Exhausted {
        /// Number of cards requested.
        requested: usize,
        /// Number of cards left in the deck.
        remaining: usize,
    },
}

/// A cards deck.
///
/// Cards are dealt from the front, dealt cards stay in the deck behind an
/// offset so that no card can be dealt twice.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    next: usize,
}

impl Deck {
    /// The number of cards in the deck.
    pub const SIZE: usize = 52;

    /// Creates a new shuffled deck.
    pub fn new_and_shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::default();
        deck.shuffle(rng);
        deck
    }

    /// Shuffles the cards left in the deck, dealt cards are not moved.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards[self.next..].shuffle(rng);
    }

    /// Deals the next `n` cards from the deck.
    pub fn deal(&mut self, n: usize) -> Result<&[Card], DeckError> {
        let remaining = self.remaining();
        if remaining < n {
            return Err(DeckError::Exhausted {
                requested: n,
                remaining,
            });
        }

        let start = self.next;
        self.next += n;
        Ok(&self.cards[start..self.next])
    }

    /// Picks a random card among the cards left without dealing it.
    pub fn draw_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Card, DeckError> {
        let cards = self.cards_left();
        if cards.is_empty() {
            return Err(DeckError::Exhausted {
                requested: 1,
                remaining: 0,
            });
        }

        Ok(cards[rng.random_range(0..cards.len())])
    }

    /// The cards that have not been dealt yet.
    pub fn cards_left(&self) -> &[Card] {
        &self.cards[self.next..]
    }

    /// Number of cards left in the deck.
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.next
    }

    /// Number of cards dealt from this deck.
    pub fn dealt(&self) -> usize {
        self.next
    }

    /// Checks if the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}

impl Default for Deck {
    /// A deck with all cards in rank-major suit-minor order.
    fn default() -> Self {
        let cards = Rank::ranks()
            .flat_map(|r| Suit::suits().map(move |s| Card::new(r, s)))
            .collect::<Vec<_>>();
        Self { cards, next: 0 }
    }
}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::iter::Skip<std::vec::IntoIter<Card>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter().skip(self.next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::HashSet;
    use rand::{SeedableRng, rngs::StdRng};

    fn codes(cards: &[Card]) -> Vec<String> {
        cards.iter().map(Card::to_string).collect()
    }

    #[test]
    fn card_encoding() {
        let mut cards = HashSet::default();
        let mut deck = Deck::new_and_shuffled(&mut rand::rng());

        while !deck.is_empty() {
            let card = deck.deal(1).unwrap()[0];
            assert_eq!(card.id() & 0xFF, PRIMES[card.rank() as usize]);
            assert_eq!((card.id() >> 8) & 0xF, card.rank() as u32);
            assert_eq!((card.id() >> 12) & 0xF, card.suit() as u32);
            assert_eq!(card.rank_mask(), 1 << (card.rank() as usize));
            cards.insert(card.id());
        }

        // Check uniquness.
        assert_eq!(cards.len(), Deck::SIZE);

        // From the Cactus Kev's website.
        let kd = Card::new(Rank::King, Suit::Diamonds);
        assert_eq!(kd.id(), 0x08004b25);

        let fs = Card::new(Rank::Five, Suit::Spades);
        assert_eq!(fs.id(), 0x00081307);
    }

    #[test]
    fn card_codes() {
        assert_eq!(Card::new(Rank::King, Suit::Diamonds).to_string(), "Kd");
        assert_eq!(Card::new(Rank::Ten, Suit::Hearts).to_string(), "Th");
        assert_eq!(Card::new(Rank::Deuce, Suit::Clubs).to_string(), "2c");

        assert_eq!("As".parse(), Ok(Card::new(Rank::Ace, Suit::Spades)));
        assert_eq!("tC".parse(), Ok(Card::new(Rank::Ten, Suit::Clubs)));
        assert!("1s".parse::<Card>().is_err());
        assert!("Ax".parse::<Card>().is_err());
        assert!("Asd".parse::<Card>().is_err());
        assert!("".parse::<Card>().is_err());
    }

    #[test]
    fn new_deck_is_canonical() {
        let deck = Deck::default();
        assert_eq!(deck.remaining(), Deck::SIZE);
        assert_eq!(deck.dealt(), 0);

        let cards = deck.cards_left();
        assert_eq!(codes(&cards[..6]), ["2c", "2d", "2h", "2s", "3c", "3d"]);
        assert_eq!(codes(&cards[48..]), ["Ac", "Ad", "Ah", "As"]);

        // Every rank and suit pair exactly once.
        let unique = cards.iter().map(|c| (c.rank(), c.suit())).collect::<HashSet<_>>();
        assert_eq!(unique.len(), Deck::SIZE);
        for rank in Rank::ranks() {
            for suit in Suit::suits() {
                assert!(unique.contains(&(rank, suit)));
            }
        }
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut deck = Deck::default();
        deck.shuffle(&mut StdRng::seed_from_u64(7));
        assert_ne!(deck.cards_left(), Deck::default().cards_left());

        let mut shuffled = deck.cards_left().iter().map(Card::id).collect::<Vec<_>>();
        let mut canonical = Deck::default().into_iter().map(|c| c.id()).collect::<Vec<_>>();
        shuffled.sort_unstable();
        canonical.sort_unstable();
        assert_eq!(shuffled, canonical);
    }

    #[test]
    fn shuffle_keeps_dealt_cards() {
        let mut deck = Deck::default();
        let dealt = deck.deal(10).unwrap().to_vec();
        deck.shuffle(&mut StdRng::seed_from_u64(11));

        assert_eq!(deck.dealt(), 10);
        assert_eq!(deck.remaining(), Deck::SIZE - 10);
        assert_eq!(&deck.cards[..10], &dealt[..]);
        assert!(deck.cards_left().iter().all(|c| !dealt.contains(c)));
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let d1 = Deck::new_and_shuffled(&mut StdRng::seed_from_u64(42));
        let d2 = Deck::new_and_shuffled(&mut StdRng::seed_from_u64(42));
        let d3 = Deck::new_and_shuffled(&mut StdRng::seed_from_u64(43));
        assert_eq!(d1.cards_left(), d2.cards_left());
        assert_ne!(d1.cards_left(), d3.cards_left());
    }

    #[test]
    fn shuffle_distribution() {
        // Each of the 6 orderings of a 3 cards deck should come up about 1/6
        // of the times.
        let mut rng = StdRng::seed_from_u64(1);
        let mut counts = ahash::AHashMap::new();
        let iterations = 60_000;

        for _ in 0..iterations {
            let mut deck = Deck::default();
            // Deal all but the last 3 cards so that only 3 cards get shuffled.
            deck.deal(Deck::SIZE - 3).unwrap();
            deck.shuffle(&mut rng);
            *counts.entry(codes(deck.cards_left())).or_insert(0) += 1;
        }

        assert_eq!(counts.len(), 6);
        for count in counts.values() {
            let freq = *count as f64 / iterations as f64;
            assert!((freq - 1.0 / 6.0).abs() < 0.01, "freq {freq}");
        }
    }

    #[test]
    fn deal_consumes_from_front() {
        let mut deck = Deck::default();
        assert_eq!(codes(deck.deal(2).unwrap()), ["2c", "2d"]);
        assert_eq!(codes(deck.deal(3).unwrap()), ["2h", "2s", "3c"]);
        assert_eq!(deck.dealt(), 5);
        assert_eq!(deck.remaining(), Deck::SIZE - 5);

        assert_eq!(
            deck.deal(48),
            Err(DeckError::Exhausted {
                requested: 48,
                remaining: 47
            })
        );

        // A failed deal doesn't consume cards.
        assert_eq!(deck.remaining(), 47);
        assert_eq!(deck.deal(47).unwrap().len(), 47);
        assert!(deck.is_empty());
        assert!(deck.deal(1).is_err());
    }

    #[test]
    fn draw_random_from_cards_left() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut deck = Deck::default();
        let dealt = deck.deal(50).unwrap().to_vec();

        for _ in 0..100 {
            let card = deck.draw_random(&mut rng).unwrap();
            assert!(!dealt.contains(&card));
        }

        // Drawing doesn't consume.
        assert_eq!(deck.remaining(), 2);

        deck.deal(2).unwrap();
        assert!(deck.draw_random(&mut rng).is_err());
    }
}
