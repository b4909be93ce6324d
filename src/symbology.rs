#![forbid(unsafe_code)]
//! Symbology pattern tables.
//!
//! This module maps characters to their wide/narrow element patterns for the two supported linear
//! symbologies: Code 39 (5 bars and 4 gaps per character) and NW-7, also known as Codabar (4 bars
//! and 3 gaps per character). The tables are built once and shared read-only for the lifetime of
//! the process.
use std::collections::HashMap;
use std::sync::LazyLock;

/// Code 39 patterns, 9 elements each. `1` is wide, `0` is narrow.
static CODE39_TABLE: [(char, &[u8; 9]); 44] = [
    ('0', b"000110100"), ('1', b"100100001"), ('2', b"001100001"),
    ('3', b"101100000"), ('4', b"000110001"), ('5', b"100110000"),
    ('6', b"001110000"), ('7', b"000100101"), ('8', b"100100100"),
    ('9', b"001100100"), ('A', b"100001001"), ('B', b"001001001"),
    ('C', b"101001000"), ('D', b"000011001"), ('E', b"100011000"),
    ('F', b"001011000"), ('G', b"000001101"), ('H', b"100001100"),
    ('I', b"001001100"), ('J', b"000011100"), ('K', b"100000011"),
    ('L', b"001000011"), ('M', b"101000010"), ('N', b"000010011"),
    ('O', b"100010010"), ('P', b"001010010"), ('Q', b"000000111"),
    ('R', b"100000110"), ('S', b"001000110"), ('T', b"000010110"),
    ('U', b"110000001"), ('V', b"011000001"), ('W', b"111000000"),
    ('X', b"010010001"), ('Y', b"110010000"), ('Z', b"011010000"),
    ('-', b"010000101"), ('.', b"110000100"), (' ', b"011000100"),
    ('$', b"010101000"), ('/', b"010100010"), ('+', b"010001010"),
    ('%', b"000101010"), (CODE39_FRAME, b"010010100"),
];

/// NW-7 patterns, 7 elements each. `A` to `D` double as start/stop letters.
static NW7_TABLE: [(char, &[u8; 7]); 20] = [
    ('0', b"0000011"), ('1', b"0000110"), ('2', b"0001001"),
    ('3', b"1100000"), ('4', b"0010010"), ('5', b"1000010"),
    ('6', b"0100001"), ('7', b"0100100"), ('8', b"0110000"),
    ('9', b"1001000"), ('-', b"0001100"), ('$', b"0011000"),
    (':', b"1000101"), ('/', b"1010001"), ('.', b"1010100"),
    ('+', b"0010101"),
    ('A', b"0011010"), ('B', b"0101001"), ('C', b"0001011"),
    ('D', b"0001110"),
];

/// The Code 39 start/stop character. Never accepted in data positions.
pub const CODE39_FRAME: char = '*';

/// Letters NW-7 accepts as start or stop characters.
pub const NW7_FRAMES: [char; 4] = ['A', 'B', 'C', 'D'];

static CODE39_PATTERNS: LazyLock<HashMap<char, Pattern>> =
    LazyLock::new(|| CODE39_TABLE.iter().map(|&(c, p)| (c, Pattern(p))).collect());

static NW7_PATTERNS: LazyLock<HashMap<char, Pattern>> =
    LazyLock::new(|| NW7_TABLE.iter().map(|&(c, p)| (c, Pattern(p))).collect());

/// Width class of a single bar or gap.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Element {
    Narrow,
    Wide,
}

/// The wide/narrow element sequence of one character.
///
/// Elements alternate between bars and gaps, starting and ending on a bar: the element at an even
/// index is a bar, the element at an odd index is a gap.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Pattern(&'static [u8]);

impl Pattern {
    /// Returns the number of elements (bars and gaps) in this pattern.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the element at `index`, or `None` past the end.
    pub fn element(&self, index: usize) -> Option<Element> {
        self.0.get(index).map(|&b| Self::decode(b))
    }

    /// Iterates the elements from left to right.
    pub fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        self.0.iter().map(|&b| Self::decode(b))
    }

    /// Whether the element at `index` is a drawn bar (as opposed to a gap).
    pub fn is_bar(index: usize) -> bool {
        index % 2 == 0
    }

    /// Returns the number of bars in this pattern.
    pub fn bar_count(&self) -> usize {
        (self.len() + 1) / 2
    }

    fn decode(b: u8) -> Element {
        if b == b'1' {
            Element::Wide
        } else {
            Element::Narrow
        }
    }
}

/// A supported linear symbology.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Symbology {
    /// 43 data characters, 5 bars and 4 gaps each, framed by `*`.
    Code39,
    /// Digits, `- $ : / . +` and `A`-`D`, 4 bars and 3 gaps each, framed by a chosen `A`-`D` pair.
    Nw7,
}

impl Symbology {
    /// Returns the number of elements in every pattern of this symbology.
    pub const fn element_count(self) -> usize {
        match self {
            Symbology::Code39 => 9,
            Symbology::Nw7 => 7,
        }
    }

    /// Returns a short human readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Symbology::Code39 => "Code 39",
            Symbology::Nw7 => "NW-7",
        }
    }

    /// Looks up the pattern for a character.
    ///
    /// Lowercase letters are upper-cased first. Returns `None` for characters outside the table.
    /// Framing characters (`*` for Code 39, `A`-`D` for NW-7) resolve like any other entry.
    ///
    /// # Example
    ///
    /// ```rust
    /// use barcos::symbology::{Element, Symbology};
    ///
    /// let pattern = Symbology::Code39.lookup('a').unwrap();
    /// assert_eq!(pattern.len(), 9);
    /// assert_eq!(pattern.element(0), Some(Element::Wide));
    /// assert!(Symbology::Code39.lookup(':').is_none());
    /// ```
    pub fn lookup(self, c: char) -> Option<Pattern> {
        let table = match self {
            Symbology::Code39 => &*CODE39_PATTERNS,
            Symbology::Nw7 => &*NW7_PATTERNS,
        };
        table.get(&c.to_ascii_uppercase()).copied()
    }

    /// Looks up a character for use in a data position.
    ///
    /// Same as [`lookup`](Self::lookup), except the Code 39 frame character is rejected.
    pub fn lookup_data(self, c: char) -> Option<Pattern> {
        match self {
            Symbology::Code39 if c == CODE39_FRAME => None,
            _ => self.lookup(c),
        }
    }

    /// Whether `c` may be used as a start or stop character (case-insensitive).
    pub fn is_framing(self, c: char) -> bool {
        let c = c.to_ascii_uppercase();
        match self {
            Symbology::Code39 => c == CODE39_FRAME,
            Symbology::Nw7 => NW7_FRAMES.contains(&c),
        }
    }

    /// Returns every character accepted in data positions, in table order.
    pub fn alphabet(self) -> Vec<char> {
        match self {
            Symbology::Code39 => CODE39_TABLE
                .iter()
                .map(|&(c, _)| c)
                .filter(|&c| c != CODE39_FRAME)
                .collect(),
            Symbology::Nw7 => NW7_TABLE.iter().map(|&(c, _)| c).collect(),
        }
    }
}

impl core::fmt::Display for Symbology {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_lengths() {
        for symbology in [Symbology::Code39, Symbology::Nw7] {
            for c in symbology.alphabet() {
                let pattern = symbology.lookup(c).unwrap();
                assert_eq!(pattern.len(), symbology.element_count(), "{symbology} {c:?}");
                assert!(Pattern::is_bar(0));
                assert!(Pattern::is_bar(pattern.len() - 1));
            }
        }
    }

    #[test]
    fn test_code39_three_wide_elements() {
        for c in Symbology::Code39.alphabet() {
            let pattern = Symbology::Code39.lookup(c).unwrap();
            let wide = pattern.elements().filter(|&e| e == Element::Wide).count();
            assert_eq!(wide, 3, "{c:?}");
        }
    }

    #[test]
    fn test_alphabet_sizes() {
        assert_eq!(Symbology::Code39.alphabet().len(), 43);
        assert_eq!(Symbology::Nw7.alphabet().len(), 20);
        assert!(!Symbology::Code39.alphabet().contains(&'*'));
    }

    #[test]
    fn test_lookup_case_insensitive() {
        assert_eq!(Symbology::Code39.lookup('q'), Symbology::Code39.lookup('Q'));
        assert_eq!(Symbology::Nw7.lookup('b'), Symbology::Nw7.lookup('B'));
        assert!(Symbology::Code39.lookup('q').is_some());
    }

    #[test]
    fn test_lookup_not_found() {
        assert_eq!(Symbology::Code39.lookup(':'), None);
        assert_eq!(Symbology::Nw7.lookup('E'), None);
        assert_eq!(Symbology::Nw7.lookup(' '), None);
        assert_eq!(Symbology::Code39.lookup('é'), None);
    }

    #[test]
    fn test_frame_character() {
        assert!(Symbology::Code39.lookup('*').is_some());
        assert_eq!(Symbology::Code39.lookup_data('*'), None);
        assert!(Symbology::Nw7.is_framing('d'));
        assert!(!Symbology::Nw7.is_framing('E'));
        assert!(!Symbology::Nw7.is_framing('1'));
    }

    #[test]
    fn test_bar_count() {
        assert_eq!(Symbology::Code39.lookup('0').unwrap().bar_count(), 5);
        assert_eq!(Symbology::Nw7.lookup('0').unwrap().bar_count(), 4);
    }
}
