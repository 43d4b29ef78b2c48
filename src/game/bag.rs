use rand::{seq::SliceRandom, Rng};

use crate::{
    game::error::BagEmpty,
    models::{Tile, HAND_SIZE},
    utils::letters::{normalize, TileSet},
};

/// Tiles not yet drawn, in shuffled order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileBag {
    tiles: Vec<Tile>,
}

impl TileBag {
    /// A full bag for `tile_set`, shuffled with `rng`
    pub fn shuffled<R: Rng + ?Sized>(tile_set: &TileSet, rng: &mut R) -> Self {
        Self::from_tiles(tile_set.full_bag(), rng)
    }

    pub fn from_tiles<R: Rng + ?Sized>(mut tiles: Vec<Tile>, rng: &mut R) -> Self {
        tiles.shuffle(rng);
        Self { tiles }
    }

    /// A bag holding `count` tiles picked at random from `tiles`
    pub fn sample<R: Rng + ?Sized>(mut tiles: Vec<Tile>, count: usize, rng: &mut R) -> Self {
        tiles.shuffle(rng);
        tiles.truncate(count);
        Self { tiles }
    }

    pub fn draw(&mut self) -> Result<Tile, BagEmpty> {
        self.tiles.pop().ok_or(BagEmpty)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Up to seven tiles held by one side
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    tiles: Vec<Tile>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        debug_assert!(tiles.len() <= HAND_SIZE);
        Self { tiles }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// How many copies of `letter` the hand holds
    pub fn count(&self, letter: char) -> usize {
        let letter = normalize(letter);
        self.tiles.iter().filter(|t| t.letter == letter).count()
    }

    /// Takes one tile showing `letter` out of the hand
    pub fn take(&mut self, letter: char) -> Option<Tile> {
        let letter = normalize(letter);
        let idx = self.tiles.iter().position(|t| t.letter == letter)?;
        Some(self.tiles.remove(idx))
    }

    /// Draws until the hand is full or the bag runs dry; returns how many were drawn
    pub fn replenish(&mut self, bag: &mut TileBag) -> usize {
        let before = self.tiles.len();
        while self.tiles.len() < HAND_SIZE {
            match bag.draw() {
                Ok(tile) => self.tiles.push(tile),
                Err(BagEmpty) => break,
            }
        }
        self.tiles.len() - before
    }

    /// Sum of face values still held
    pub fn value(&self) -> u32 {
        self.tiles.iter().map(|t| t.value).sum()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn letters(&self) -> Vec<String> {
        self.tiles.iter().map(|t| t.letter.to_string()).collect()
    }
}

/// Opening deal: the human's hand is filled first, then the opponent's
pub fn deal_initial_hands(bag: &mut TileBag, human: &mut Hand, ai: &mut Hand) {
    human.replenish(bag);
    ai.replenish(bag);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::letters::ENGLISH;
    use rand::{rngs::StdRng, SeedableRng};

    fn bag_of(letters: &str) -> TileBag {
        TileBag {
            tiles: letters.chars().map(|c| ENGLISH.tile(c)).collect(),
        }
    }

    #[test]
    fn test_same_seed_same_order() {
        let mut a = TileBag::shuffled(&ENGLISH, &mut StdRng::seed_from_u64(9));
        let mut b = TileBag::shuffled(&ENGLISH, &mut StdRng::seed_from_u64(9));
        for _ in 0..100 {
            assert_eq!(a.draw(), b.draw());
        }
        assert_eq!(a.draw(), Err(BagEmpty));
    }

    #[test]
    fn test_draw_shrinks_the_bag() {
        let mut bag = bag_of("AB");
        assert_eq!(bag.draw().map(|t| t.letter), Ok('B'));
        assert_eq!(bag.len(), 1);
        assert_eq!(bag.draw().map(|t| t.letter), Ok('A'));
        assert!(bag.is_empty());
        assert_eq!(bag.draw(), Err(BagEmpty));
    }

    #[test]
    fn test_initial_deal_order() {
        let mut bag = bag_of("ZZZZZZZZAAAAAAA");
        let mut human = Hand::new();
        let mut ai = Hand::new();
        deal_initial_hands(&mut bag, &mut human, &mut ai);

        assert_eq!(human.count('A'), 7);
        assert_eq!(ai.count('Z'), 7);
        assert_eq!(bag.len(), 1);
    }

    #[test]
    fn test_deal_from_a_short_bag() {
        let mut bag = bag_of("ABCDEFGHIJ");
        let mut human = Hand::new();
        let mut ai = Hand::new();
        deal_initial_hands(&mut bag, &mut human, &mut ai);

        assert_eq!(human.len(), 7);
        assert_eq!(ai.len(), 3);
        assert!(bag.is_empty());
    }

    #[test]
    fn test_replenish_stops_when_bag_is_dry() {
        let mut bag = bag_of("QR");
        let mut hand = Hand::from_tiles(vec![ENGLISH.tile('A'); 3]);
        assert_eq!(hand.replenish(&mut bag), 2);
        assert_eq!(hand.len(), 5);
        assert_eq!(hand.replenish(&mut bag), 0);
    }

    #[test]
    fn test_take_is_case_insensitive() {
        let mut hand = Hand::from_tiles(vec![ENGLISH.tile('C'), ENGLISH.tile('A')]);
        assert_eq!(hand.take('c').map(|t| t.letter), Some('C'));
        assert_eq!(hand.take('c'), None);
        assert_eq!(hand.value(), 1);
    }
}
