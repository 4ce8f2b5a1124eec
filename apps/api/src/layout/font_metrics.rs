//! Static font-metric tables for the two PDF base-14 faces a paper is set in.
//!
//! Widths are in em units (AFM advance / 1000). The PDF backend declares the same
//! base-14 fonts without embedding them, so these tables are the exact advances a
//! viewer will use when it draws the text.
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Faces and styles
// ────────────────────────────────────────────────────────────────────────────

/// The faces a paper can use. Both are base-14 fonts, so no embedding is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFace {
    Helvetica,
    HelveticaBold,
}

impl FontFace {
    /// The PDF `/BaseFont` name.
    pub fn base_font(&self) -> &'static str {
        match self {
            FontFace::Helvetica => "Helvetica",
            FontFace::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// The resource name the backend registers the face under.
    pub fn resource_name(&self) -> &'static str {
        match self {
            FontFace::Helvetica => "F1",
            FontFace::HelveticaBold => "F2",
        }
    }
}

/// RGB colour with components in 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    /// Answer-key header fill.
    pub const MIDNIGHT_BLUE: Rgb = Rgb(44, 62, 80);
    pub const GRID_GREY: Rgb = Rgb(200, 200, 200);
}

/// A text style. The same value must be used when measuring and when drawing a run,
/// otherwise wrapped lines and cursor advances drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub face: FontFace,
    pub size_pt: f32,
    /// Line box height as a multiple of the font size.
    pub line_height_factor: f32,
    pub color: Rgb,
}

impl TextStyle {
    pub const fn new(face: FontFace, size_pt: f32) -> Self {
        Self {
            face,
            size_pt,
            line_height_factor: 1.15,
            color: Rgb::BLACK,
        }
    }

    pub const fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    /// Height of one wrapped line, in points.
    pub fn line_height(&self) -> f32 {
        self.size_pt * self.line_height_factor
    }

    /// Distance from the top of a line box to the text baseline, in points.
    pub fn baseline_offset(&self) -> f32 {
        let metrics = get_metrics(&self.face);
        let half_leading = (self.line_height() - self.size_pt) / 2.0;
        half_leading + metrics.ascent * self.size_pt
    }
}

/// Every style a paper is drawn with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleSheet {
    pub title: TextStyle,
    pub question: TextStyle,
    pub option: TextStyle,
    pub caption: TextStyle,
    pub table_header: TextStyle,
    pub table_cell: TextStyle,
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            title: TextStyle::new(FontFace::HelveticaBold, 22.0),
            question: TextStyle::new(FontFace::HelveticaBold, 12.0),
            option: TextStyle::new(FontFace::Helvetica, 12.0),
            caption: TextStyle::new(FontFace::HelveticaBold, 20.0),
            table_header: TextStyle::new(FontFace::HelveticaBold, 10.0).with_color(Rgb::WHITE),
            table_cell: TextStyle::new(FontFace::Helvetica, 10.0),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// WinAnsi encoding
// ────────────────────────────────────────────────────────────────────────────

/// Maps a char to its WinAnsiEncoding byte, or `None` if the encoding cannot carry it.
///
/// Latin-1 maps to itself; 0x80..=0x9F hold the cp1252 punctuation LLMs like to emit
/// (curly quotes, dashes, ellipsis).
pub fn win_ansi_byte(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => match c {
            '€' => Some(0x80),
            '‚' => Some(0x82),
            'ƒ' => Some(0x83),
            '„' => Some(0x84),
            '…' => Some(0x85),
            '†' => Some(0x86),
            '‡' => Some(0x87),
            'ˆ' => Some(0x88),
            '‰' => Some(0x89),
            'Š' => Some(0x8A),
            '‹' => Some(0x8B),
            'Œ' => Some(0x8C),
            'Ž' => Some(0x8E),
            '‘' => Some(0x91),
            '’' => Some(0x92),
            '“' => Some(0x93),
            '”' => Some(0x94),
            '•' => Some(0x95),
            '–' => Some(0x96),
            '—' => Some(0x97),
            '˜' => Some(0x98),
            '™' => Some(0x99),
            'š' => Some(0x9A),
            '›' => Some(0x9B),
            'œ' => Some(0x9C),
            'ž' => Some(0x9E),
            'Ÿ' => Some(0x9F),
            _ => None,
        },
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a face.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    pub face: FontFace,
    widths: [f32; 95],
    /// Fallback width for encodable non-ASCII characters.
    pub average_char_width: f32,
    /// Ascender height in em units.
    pub ascent: f32,
}

impl FontMetricTable {
    /// Advance width of a single char in em units, or `None` if it cannot be encoded.
    pub fn advance(&self, c: char) -> Option<f32> {
        let code = c as usize;
        if (32..=126).contains(&code) {
            return Some(self.widths[code - 32]);
        }
        win_ansi_byte(c).map(|_| self.average_char_width)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    face: FontFace::Helvetica,
    #[rustfmt::skip]
    widths: [
        // sp    !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.556,
    ascent: 0.718,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    face: FontFace::HelveticaBold,
    #[rustfmt::skip]
    widths: [
        // sp    !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {      |      }      ~
        0.389, 0.280, 0.389, 0.584,
    ],
    average_char_width: 0.611,
    ascent: 0.718,
};

/// Returns the static metric table for a face.
pub fn get_metrics(face: &FontFace) -> &'static FontMetricTable {
    match face {
        FontFace::Helvetica => &HELVETICA_TABLE,
        FontFace::HelveticaBold => &HELVETICA_BOLD_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_ascii_lookup() {
        let metrics = get_metrics(&FontFace::Helvetica);
        assert_eq!(metrics.advance(' '), Some(0.278));
        assert_eq!(metrics.advance('W'), Some(0.944));
        assert_eq!(metrics.advance('i'), Some(0.222));
    }

    #[test]
    fn test_bold_is_never_narrower_for_lowercase() {
        let regular = get_metrics(&FontFace::Helvetica);
        let bold = get_metrics(&FontFace::HelveticaBold);
        for c in 'a'..='z' {
            assert!(
                bold.advance(c).unwrap() >= regular.advance(c).unwrap(),
                "bold '{c}' should be at least as wide as regular"
            );
        }
    }

    #[test]
    fn test_latin1_falls_back_to_average() {
        let metrics = get_metrics(&FontFace::Helvetica);
        assert_eq!(metrics.advance('é'), Some(metrics.average_char_width));
        assert_eq!(metrics.advance('“'), Some(metrics.average_char_width));
    }

    #[test]
    fn test_unencodable_char_has_no_advance() {
        let metrics = get_metrics(&FontFace::Helvetica);
        assert_eq!(metrics.advance('中'), None);
        assert_eq!(metrics.advance('\u{1F600}'), None);
        assert_eq!(metrics.advance('\t'), None);
    }

    #[test]
    fn test_win_ansi_byte_mapping() {
        assert_eq!(win_ansi_byte('A'), Some(b'A'));
        assert_eq!(win_ansi_byte('é'), Some(0xE9));
        assert_eq!(win_ansi_byte('’'), Some(0x92));
        assert_eq!(win_ansi_byte('—'), Some(0x97));
        assert_eq!(win_ansi_byte('\u{7F}'), None);
        assert_eq!(win_ansi_byte('λ'), None);
    }

    #[test]
    fn test_line_height_and_baseline() {
        let style = TextStyle::new(FontFace::Helvetica, 10.0);
        assert!((style.line_height() - 11.5).abs() < 1e-4);
        // half leading 0.75 + ascent 7.18
        assert!((style.baseline_offset() - 7.93).abs() < 1e-3);
    }

    #[test]
    fn test_default_stylesheet_sanity() {
        let sheet = StyleSheet::default();
        assert_eq!(sheet.title.face, FontFace::HelveticaBold);
        assert!(sheet.title.size_pt > sheet.question.size_pt);
        assert_eq!(sheet.table_header.color, Rgb::WHITE);
        assert_eq!(sheet.option.face, FontFace::Helvetica);
    }
}
