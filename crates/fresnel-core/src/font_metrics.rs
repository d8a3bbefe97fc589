//! Helvetica advance widths for centring annotation text.
//!
//! Widths are the standard Adobe core-font metrics in 1/1000 em, covering
//! ASCII 0x20..=0x7E. Index = (char as usize) - 32.

/// Font name written into every text run.
pub const HELVETICA: &str = "Helvetica";

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    // sp    !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :    ;    <    =    >    ?    @
    278, 278, 584, 584, 584, 556, 1015,
    // A-Z
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [    \    ]    ^    _    `
    278, 278, 278, 469, 556, 333,
    // a-z
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // {    |    }    ~
    334, 260, 334, 584,
];

/// Fallback for characters outside printable ASCII.
const AVERAGE_WIDTH: u16 = 556;

/// Width of `text` set in Helvetica at `size` (same unit as `size`).
pub fn text_width(text: &str, size: f64) -> f64 {
    let units: u32 = text
        .chars()
        .map(|c| {
            let code = c as usize;
            if (32..=126).contains(&code) {
                HELVETICA_WIDTHS[code - 32] as u32
            } else {
                AVERAGE_WIDTH as u32
            }
        })
        .sum();
    units as f64 * size / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_table_covers_printable_ascii() {
        assert_eq!(HELVETICA_WIDTHS.len(), 126 - 32 + 1);
    }

    #[test]
    fn test_known_widths() {
        // "0" = 556, "i" = 222, "W" = 944
        assert_abs_diff_eq!(text_width("0", 1000.0), 556.0, epsilon = 1e-9);
        assert_abs_diff_eq!(text_width("iW", 1.0), 1.166, epsilon = 1e-9);
        assert_abs_diff_eq!(text_width("~", 1.0), 0.584, epsilon = 1e-9);
    }

    #[test]
    fn test_width_scales_with_size() {
        let w = text_width("Focal Length: 210mm", 3.0);
        assert_abs_diff_eq!(text_width("Focal Length: 210mm", 6.0), 2.0 * w, epsilon = 1e-9);
    }

    #[test]
    fn test_empty_string_has_no_width() {
        assert_eq!(text_width("", 12.0), 0.0);
    }
}
