#![forbid(unsafe_code)]
//! Barcode encoding.
//!
//! This module validates input text against a symbology, turns the validated characters into a
//! sequence of patterns and lays them out as absolute bar positions. The same layout engine serves
//! both symbologies; they differ only in their pattern tables and framing rules.
use crate::error::{BarcodeError, Result};
use crate::helper::{to_svg_string, SvgOptions};
use crate::symbology::{Element, Pattern, Symbology, CODE39_FRAME};

/// Narrow and wide element widths, in pixels. Wide is always three times narrow.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Scale {
    narrow: u64,
}

impl Scale {
    /// Creates a scale from the width of a narrow element.
    ///
    /// # Errors
    ///
    /// Returns [`BarcodeError::InvalidParameter`] if `scale` is not positive.
    pub fn new(scale: i32) -> Result<Self> {
        match u64::try_from(scale) {
            Ok(narrow) if narrow > 0 => Ok(Self { narrow }),
            _ => Err(BarcodeError::InvalidParameter {
                name: "scale",
                value: scale.to_string(),
            }),
        }
    }

    pub const fn narrow(self) -> u64 {
        self.narrow
    }

    pub const fn wide(self) -> u64 {
        self.narrow * 3
    }

    /// Returns the width of one element.
    pub const fn width(self, element: Element) -> u64 {
        match element {
            Element::Narrow => self.narrow(),
            Element::Wide => self.wide(),
        }
    }
}

/// A drawn bar: its left edge and width. Bars span the full symbol height.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Bar {
    pub x: u64,
    pub width: u64,
}

/// A start/stop character pair for NW-7.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Framing {
    pub start: char,
    pub stop: char,
}

impl Framing {
    pub const fn new(start: char, stop: char) -> Self {
        Self { start, stop }
    }
}

impl Default for Framing {
    fn default() -> Self {
        Self::new('A', 'A')
    }
}

/// Validates Code 39 text and returns the patterns to draw, framed by `*` on both ends.
///
/// Characters are matched case-insensitively. Every character is checked before anything is
/// returned.
///
/// # Errors
///
/// Returns [`BarcodeError::InvalidCharacter`] for the first character that has no pattern,
/// including a literal `*`.
pub fn validate_code39(text: &str) -> Result<Vec<Pattern>> {
    let frame = Symbology::Code39
        .lookup(CODE39_FRAME)
        .ok_or(BarcodeError::InvalidFraming { character: CODE39_FRAME })?;
    symbol_sequence(Symbology::Code39, text, frame, frame)
}

/// Validates NW-7 text and its start/stop letters, and returns the patterns to draw.
///
/// The framing pair is checked first, then every data character.
///
/// # Errors
///
/// Returns [`BarcodeError::InvalidFraming`] if either framing letter is not `A`, `B`, `C` or `D`
/// (case-insensitive), and [`BarcodeError::InvalidCharacter`] for the first data character that
/// has no pattern.
pub fn validate_nw7(text: &str, framing: Framing) -> Result<Vec<Pattern>> {
    let start = framing_pattern(Symbology::Nw7, framing.start)?;
    let stop = framing_pattern(Symbology::Nw7, framing.stop)?;
    symbol_sequence(Symbology::Nw7, text, start, stop)
}

fn framing_pattern(symbology: Symbology, c: char) -> Result<Pattern> {
    match symbology.lookup(c) {
        Some(pattern) if symbology.is_framing(c) => Ok(pattern),
        _ => {
            tracing::warn!(symbology = %symbology, character = ?c, "rejected framing character");
            Err(BarcodeError::InvalidFraming { character: c })
        }
    }
}

fn symbol_sequence(
    symbology: Symbology,
    text: &str,
    start: Pattern,
    stop: Pattern,
) -> Result<Vec<Pattern>> {
    let mut sequence = Vec::with_capacity(text.chars().count() + 2);
    sequence.push(start);
    for (position, character) in text.chars().enumerate() {
        match symbology.lookup_data(character) {
            Some(pattern) => sequence.push(pattern),
            None => {
                tracing::warn!(
                    symbology = %symbology,
                    position,
                    character = ?character,
                    "rejected data character"
                );
                return Err(BarcodeError::InvalidCharacter { position, character });
            }
        }
    }
    sequence.push(stop);
    Ok(sequence)
}

/// Returns the total width of a symbol sequence without placing any bars.
///
/// Sums every element width plus one narrow gap between adjacent patterns.
pub fn measure(sequence: &[Pattern], scale: Scale) -> u64 {
    let elements: u64 = sequence
        .iter()
        .flat_map(|pattern| pattern.elements())
        .map(|element| scale.width(element))
        .sum();
    let gaps = u64::try_from(sequence.len().saturating_sub(1)).unwrap_or(u64::MAX);
    elements + gaps * scale.narrow()
}

/// Lays out a symbol sequence as bars.
///
/// Walks each pattern left to right with a running cursor. Even elements are emitted as bars, odd
/// elements only advance the cursor. A single narrow gap is inserted between consecutive patterns,
/// never after the last one. Returns the bars and the final cursor position, which is the total
/// width.
pub fn layout(sequence: &[Pattern], scale: Scale) -> (Vec<Bar>, u64) {
    let bar_count = sequence.iter().map(Pattern::bar_count).sum();
    let mut bars = Vec::with_capacity(bar_count);
    let mut cursor: u64 = 0;
    for (i, pattern) in sequence.iter().enumerate() {
        if i > 0 {
            cursor += scale.narrow();
        }
        for (j, element) in pattern.elements().enumerate() {
            let width = scale.width(element);
            if Pattern::is_bar(j) {
                bars.push(Bar { x: cursor, width });
            }
            cursor += width;
        }
    }
    (bars, cursor)
}

/// An encoded linear barcode: its canvas size and the bars to draw on it.
///
/// Instances are immutable after creation.
///
/// # Example
///
/// ```rust
/// use barcos::barcode::{Barcode, Framing};
///
/// let barcode = Barcode::encode_nw7("123", Framing::new('A', 'A'), 2, 100).unwrap();
/// assert_eq!(barcode.width(), 126);
/// assert_eq!(barcode.bars().len(), 20);
///
/// let svg = barcode.to_svg_string().unwrap();
/// assert!(svg.starts_with("<svg"));
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Barcode {
    symbology: Symbology,
    width: u64,
    height: u32,
    bars: Vec<Bar>,
}

impl Barcode {
    /// Encodes text as Code 39.
    ///
    /// # Arguments
    ///
    /// * `text` - Digits, letters (either case), space and `- . $ / + %`.
    /// * `scale` - Width of a narrow element in pixels. Wide elements are three times as wide.
    /// * `height` - Height of the symbol in pixels.
    ///
    /// # Errors
    ///
    /// Returns [`BarcodeError::InvalidParameter`] for a non-positive `scale` or `height`, and
    /// [`BarcodeError::InvalidCharacter`] if `text` contains a character outside the alphabet.
    pub fn encode_code39(text: &str, scale: i32, height: i32) -> Result<Self> {
        let (scale, height) = check_dimensions(scale, height)?;
        let sequence = validate_code39(text)?;
        Ok(Self::from_sequence(Symbology::Code39, &sequence, scale, height))
    }

    /// Encodes text as NW-7 between the given start and stop letters.
    ///
    /// # Arguments
    ///
    /// * `text` - Digits, `- $ : / . +` and the letters `A`-`D` (either case).
    /// * `framing` - Start and stop letters, each one of `A`-`D`.
    /// * `scale` - Width of a narrow element in pixels. Wide elements are three times as wide.
    /// * `height` - Height of the symbol in pixels.
    ///
    /// # Errors
    ///
    /// Returns [`BarcodeError::InvalidParameter`] for a non-positive `scale` or `height`,
    /// [`BarcodeError::InvalidFraming`] for a bad start or stop letter, and
    /// [`BarcodeError::InvalidCharacter`] if `text` contains a character outside the alphabet.
    pub fn encode_nw7(text: &str, framing: Framing, scale: i32, height: i32) -> Result<Self> {
        let (scale, height) = check_dimensions(scale, height)?;
        let sequence = validate_nw7(text, framing)?;
        Ok(Self::from_sequence(Symbology::Nw7, &sequence, scale, height))
    }

    fn from_sequence(symbology: Symbology, sequence: &[Pattern], scale: Scale, height: u32) -> Self {
        let width = measure(sequence, scale);
        let (bars, total) = layout(sequence, scale);
        debug_assert_eq!(width, total);
        tracing::debug!(
            symbology = %symbology,
            characters = sequence.len() - 2,
            width,
            bars = bars.len(),
            "encoded barcode"
        );
        Self {
            symbology,
            width,
            height,
            bars,
        }
    }

    pub fn symbology(&self) -> Symbology {
        self.symbology
    }

    /// Returns the total width of the symbol in pixels.
    pub fn width(&self) -> u64 {
        self.width
    }

    /// Returns the height of the symbol in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the bars from left to right.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Renders this barcode as SVG with a white background and black bars.
    pub fn to_svg_string(&self) -> Result<String> {
        to_svg_string(self, &SvgOptions::default())
    }
}

fn check_dimensions(scale: i32, height: i32) -> Result<(Scale, u32)> {
    let scale = Scale::new(scale)?;
    let height = match u32::try_from(height) {
        Ok(h) if h > 0 => h,
        _ => {
            return Err(BarcodeError::InvalidParameter {
                name: "height",
                value: height.to_string(),
            })
        }
    };
    Ok((scale, height))
}

/// Generates a Code 39 barcode as an SVG string.
///
/// # Example
///
/// ```rust
/// use barcos::barcode::generate_code39_svg;
///
/// let svg = generate_code39_svg("HELLO-1", 2, 80).unwrap();
/// assert!(svg.ends_with("</svg>\n"));
///
/// assert!(generate_code39_svg("hello!", 2, 80).is_err());
/// ```
pub fn generate_code39_svg(text: &str, scale: i32, height: i32) -> Result<String> {
    Barcode::encode_code39(text, scale, height)?.to_svg_string()
}

/// Generates an NW-7 barcode as an SVG string.
///
/// # Example
///
/// ```rust
/// use barcos::barcode::generate_nw7_svg;
///
/// let svg = generate_nw7_svg("40156", 'A', 'B', 2, 100).unwrap();
/// assert!(svg.contains("height=\"100\""));
/// ```
pub fn generate_nw7_svg(text: &str, start: char, stop: char, scale: i32, height: i32) -> Result<String> {
    Barcode::encode_nw7(text, Framing::new(start, stop), scale, height)?.to_svg_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale(n: i32) -> Scale {
        Scale::new(n).unwrap()
    }

    #[test]
    fn test_scale() {
        assert_eq!(scale(2).narrow(), 2);
        assert_eq!(scale(2).wide(), 6);
        assert!(Scale::new(0).is_err());
        assert!(Scale::new(-3).is_err());
    }

    #[test]
    fn test_layout_single_pattern() {
        // '*' is 010010100
        let sequence = [Symbology::Code39.lookup('*').unwrap()];
        let (bars, width) = layout(&sequence, scale(1));
        assert_eq!(width, 15);
        let xs: Vec<(u64, u64)> = bars.iter().map(|b| (b.x, b.width)).collect();
        assert_eq!(xs, vec![(0, 1), (4, 1), (6, 3), (10, 3), (14, 1)]);
    }

    #[test]
    fn test_layout_inserts_gap_between_patterns() {
        let frame = Symbology::Code39.lookup('*').unwrap();
        let (bars, width) = layout(&[frame, frame], scale(1));
        assert_eq!(width, 31);
        assert_eq!(bars[5], Bar { x: 16, width: 1 });
        assert_eq!(bars.last(), Some(&Bar { x: 30, width: 1 }));
    }

    #[test]
    fn test_layout_empty_sequence() {
        let (bars, width) = layout(&[], scale(4));
        assert!(bars.is_empty());
        assert_eq!(width, 0);
        assert_eq!(measure(&[], scale(4)), 0);
    }

    #[test]
    fn test_measure_matches_layout() {
        let sequence = validate_code39("CODE 39 $/+%").unwrap();
        for n in 1..5 {
            assert_eq!(measure(&sequence, scale(n)), layout(&sequence, scale(n)).1);
        }
    }

    #[test]
    fn test_validate_code39() {
        let sequence = validate_code39("ab").unwrap();
        assert_eq!(sequence.len(), 4);
        assert_eq!(sequence[0], sequence[3]);
        assert_eq!(sequence[1], Symbology::Code39.lookup('A').unwrap());
    }

    #[test]
    fn test_validate_reports_first_bad_character() {
        match validate_code39("AB:C!") {
            Err(BarcodeError::InvalidCharacter { position, character }) => {
                assert_eq!(position, 2);
                assert_eq!(character, ':');
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_frame_in_data() {
        assert!(matches!(
            validate_code39("A*B"),
            Err(BarcodeError::InvalidCharacter { position: 1, character: '*' })
        ));
    }

    #[test]
    fn test_validate_nw7_framing() {
        assert!(validate_nw7("123", Framing::new('a', 'd')).is_ok());
        assert!(matches!(
            validate_nw7("123", Framing::new('E', 'A')),
            Err(BarcodeError::InvalidFraming { character: 'E' })
        ));
        assert!(matches!(
            validate_nw7("123", Framing::new('A', '1')),
            Err(BarcodeError::InvalidFraming { character: '1' })
        ));
        // framing is checked before data
        assert!(matches!(
            validate_nw7("x", Framing::new('Z', 'A')),
            Err(BarcodeError::InvalidFraming { .. })
        ));
    }

    #[test]
    fn test_encode_rejects_bad_dimensions() {
        assert!(matches!(
            Barcode::encode_code39("A", 0, 10),
            Err(BarcodeError::InvalidParameter { name: "scale", .. })
        ));
        assert!(matches!(
            Barcode::encode_nw7("1", Framing::default(), 1, -1),
            Err(BarcodeError::InvalidParameter { name: "height", .. })
        ));
    }

    #[test]
    fn test_encode_nw7_geometry() {
        let barcode = Barcode::encode_nw7("123", Framing::new('A', 'A'), 2, 100).unwrap();
        assert_eq!(barcode.symbology(), Symbology::Nw7);
        assert_eq!(barcode.height(), 100);
        // A = 13, 1 = 11, 2 = 11, 3 = 11, A = 13 narrow units, plus four gaps
        assert_eq!(barcode.width(), (13 + 11 + 11 + 11 + 13) * 2 + 4 * 2);
        assert_eq!(barcode.bars().len(), 5 * 4);
        // the first data character starts after the start frame and one gap
        assert_eq!(barcode.bars()[4], Bar { x: 28, width: 2 });
    }
}
