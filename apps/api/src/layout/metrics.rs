//! Static font metrics for estimating how many printed lines a paragraph takes.
//!
//! Widths are in em units (fraction of the font size) for Times New Roman regular,
//! covering ASCII 0x20..=0x7E. Index = (char as usize) - 32. This is an approximation:
//! bold runs and kerning are ignored, which keeps estimates within a line or so of Word.

use crate::layout::buffer::{PageMargins, Paragraph};

/// US Letter width in inches.
pub const PAGE_WIDTH_IN: f32 = 8.5;
const POINTS_PER_INCH: f32 = 72.0;

// ────────────────────────────────────────────────────────────────────────────
// Metric table
// ────────────────────────────────────────────────────────────────────────────

/// Width table for a single face.
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
    widths: [f32; 95],
    /// Fallback width for non-ASCII characters.
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    /// Lines this string occupies when greedily word-wrapped at `width_em`.
    /// Embedded newlines start a new line; an empty string takes no lines.
    pub fn estimated_lines(&self, s: &str, width_em: f32) -> u32 {
        s.split('\n')
            .map(|segment| self.wrapped_lines(segment, width_em))
            .sum::<u32>()
            .max(u32::from(!s.trim().is_empty()))
    }

    fn wrapped_lines(&self, segment: &str, width_em: f32) -> u32 {
        let mut words = segment.split_whitespace();
        let Some(first) = words.next() else {
            return 0;
        };

        let mut line_count = 1u32;
        let mut current_width = self.measure_str(first);
        for word in words {
            let word_w = self.measure_str(word);
            if current_width + self.space_width + word_w > width_em {
                line_count += 1;
                current_width = word_w;
            } else {
                current_width += self.space_width + word_w;
            }
        }
        line_count
    }
}

/// Times New Roman regular, from the standard Times-Roman AFM widths.
pub static TIMES_NEW_ROMAN: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp    !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.250, 0.333, 0.408, 0.500, 0.500, 0.833, 0.778, 0.180, 0.333, 0.333, 0.500, 0.564, 0.250, 0.333, 0.250, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.564, 0.564, 0.564, 0.444, 0.921,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.667, 0.667, 0.722, 0.611, 0.556, 0.722, 0.722, 0.333, 0.389, 0.722, 0.611, 0.889,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.722, 0.556, 0.722, 0.667, 0.556, 0.611, 0.722, 0.722, 0.944, 0.722, 0.722, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.469, 0.500, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.444, 0.500, 0.444, 0.500, 0.444, 0.333, 0.500, 0.500, 0.278, 0.278, 0.500, 0.278, 0.778,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.500, 0.500, 0.500, 0.500, 0.333, 0.389, 0.278, 0.500, 0.500, 0.722, 0.500, 0.500, 0.444,
        // {      |      }      ~
        0.480, 0.200, 0.480, 0.541,
    ],
    average_char_width: 0.47,
    space_width: 0.25,
};

// ────────────────────────────────────────────────────────────────────────────
// Paragraph estimates
// ────────────────────────────────────────────────────────────────────────────

/// Usable text column width in em units at `size_pt`, after margins and indent.
///
/// Resume margins leave a 7.5in column: 540pt, or 54em at 10pt.
pub fn column_width_em(margins: &PageMargins, size_pt: f32, left_indent_pt: f32) -> f32 {
    let column_in = PAGE_WIDTH_IN - margins.left_in - margins.right_in - margins.gutter_in;
    let column_pt = (column_in * POINTS_PER_INCH - left_indent_pt).max(POINTS_PER_INCH);
    column_pt / size_pt.max(1.0)
}

/// Printed lines for one paragraph. Every paragraph takes at least one line,
/// empty ones included.
pub fn paragraph_lines(paragraph: &Paragraph, margins: &PageMargins) -> u32 {
    let size_pt = paragraph
        .runs
        .iter()
        .map(|r| r.format.size_pt)
        .fold(0.0_f32, f32::max);
    let size_pt = if size_pt > 0.0 { size_pt } else { 10.0 };
    let width_em = column_width_em(margins, size_pt, paragraph.format.left_indent_pt);
    TIMES_NEW_ROMAN
        .estimated_lines(&paragraph.text(), width_em)
        .max(1)
}
