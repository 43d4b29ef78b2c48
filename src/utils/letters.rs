use std::collections::HashMap;
use once_cell::sync::Lazy;

use crate::models::Tile;

/// Placeholder letter carried by blank tiles
pub const WILDCARD: char = '*';

/// Letter values and bag composition for one alphabet
#[derive(Debug)]
pub struct TileSet {
    name: &'static str,
    values: HashMap<char, u32>,
    /// Ordered so that a freshly built bag is identical before shuffling
    counts: Vec<(char, u8)>,
}

impl TileSet {
    fn build(name: &'static str, values: HashMap<char, u32>, counts: Vec<(char, u8)>) -> Self {
        Self {
            name,
            values,
            counts,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Look up a tile set by its configuration name
    pub fn by_name(name: &str) -> Option<&'static TileSet> {
        match name.trim().to_ascii_lowercase().as_str() {
            "erudite" => Some(&*ERUDITE),
            "english" => Some(&*ENGLISH),
            _ => None,
        }
    }

    /// Face value of a letter; wildcards and foreign letters are worth nothing
    pub fn value(&self, letter: char) -> u32 {
        *self.values.get(&normalize(letter)).unwrap_or(&0)
    }

    pub fn tile(&self, letter: char) -> Tile {
        let letter = normalize(letter);
        Tile {
            letter,
            value: self.value(letter),
        }
    }

    /// Every tile of a complete, unshuffled bag
    pub fn full_bag(&self) -> Vec<Tile> {
        self.counts
            .iter()
            .flat_map(|&(letter, count)| std::iter::repeat(self.tile(letter)).take(count as usize))
            .collect()
    }

    pub fn total_tiles(&self) -> usize {
        self.counts.iter().map(|&(_, count)| count as usize).sum()
    }
}

/// Upper-case a letter; Cyrillic included
pub fn normalize(letter: char) -> char {
    letter.to_uppercase().next().unwrap_or(letter)
}

/// Russian "Erudite" set. Ё shares the Е tile.
pub static ERUDITE: Lazy<TileSet> = Lazy::new(|| {
    let mut values = HashMap::new();

    for ch in ['А', 'В', 'Е', 'И', 'Н', 'О', 'Р', 'С', 'Т'] {
        values.insert(ch, 1);
    }
    for ch in ['Д', 'К', 'Л', 'М', 'П', 'У'] {
        values.insert(ch, 2);
    }
    for ch in ['Б', 'Г', 'Ь', 'Я'] {
        values.insert(ch, 3);
    }
    for ch in ['Й', 'Ы'] {
        values.insert(ch, 4);
    }
    for ch in ['Ж', 'З', 'Х', 'Ц', 'Ч'] {
        values.insert(ch, 5);
    }
    for ch in ['Ш', 'Э', 'Ю'] {
        values.insert(ch, 8);
    }
    for ch in ['Ф', 'Щ', 'Ъ'] {
        values.insert(ch, 10);
    }
    values.insert(WILDCARD, 0);

    let counts = vec![
        ('А', 8),
        ('Б', 2),
        ('В', 4),
        ('Г', 2),
        ('Д', 4),
        ('Е', 8),
        ('Ж', 1),
        ('З', 2),
        ('И', 5),
        ('Й', 1),
        ('К', 4),
        ('Л', 4),
        ('М', 3),
        ('Н', 5),
        ('О', 10),
        ('П', 4),
        ('Р', 5),
        ('С', 5),
        ('Т', 5),
        ('У', 4),
        ('Ф', 1),
        ('Х', 1),
        ('Ц', 1),
        ('Ч', 1),
        ('Ш', 1),
        ('Щ', 1),
        ('Ъ', 1),
        ('Ы', 2),
        ('Ь', 2),
        ('Э', 1),
        ('Ю', 1),
        ('Я', 2),
        (WILDCARD, 3),
    ];

    TileSet::build("erudite", values, counts)
});

/// Standard English set
pub static ENGLISH: Lazy<TileSet> = Lazy::new(|| {
    let mut values = HashMap::new();

    // 1 point letters
    for ch in ['A', 'E', 'I', 'O', 'U', 'L', 'N', 'R', 'S', 'T'] {
        values.insert(ch, 1);
    }

    // 2 points
    for ch in ['D', 'G'] {
        values.insert(ch, 2);
    }

    // 3 points
    for ch in ['B', 'C', 'M', 'P'] {
        values.insert(ch, 3);
    }

    // 4 points
    for ch in ['F', 'H', 'V', 'W', 'Y'] {
        values.insert(ch, 4);
    }

    // 5 points
    values.insert('K', 5);

    // 8 points
    for ch in ['J', 'X'] {
        values.insert(ch, 8);
    }

    // 10 points
    for ch in ['Q', 'Z'] {
        values.insert(ch, 10);
    }

    values.insert(WILDCARD, 0);

    let counts = vec![
        ('A', 9),
        ('B', 2),
        ('C', 2),
        ('D', 4),
        ('E', 12),
        ('F', 2),
        ('G', 3),
        ('H', 2),
        ('I', 9),
        ('J', 1),
        ('K', 1),
        ('L', 4),
        ('M', 2),
        ('N', 6),
        ('O', 8),
        ('P', 2),
        ('Q', 1),
        ('R', 6),
        ('S', 4),
        ('T', 6),
        ('U', 4),
        ('V', 2),
        ('W', 2),
        ('X', 1),
        ('Y', 2),
        ('Z', 1),
        (WILDCARD, 2),
    ];

    TileSet::build("english", values, counts)
});
