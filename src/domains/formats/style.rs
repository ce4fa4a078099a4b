//! Style name tables used by range formatting.
//!
//! Each table maps the names accepted by the `format_range` tool to the values
//! `umya-spreadsheet` expects. Name matching is ASCII case-insensitive.

use umya_spreadsheet::structs::{HorizontalAlignmentValues, PatternValues, VerticalAlignmentValues};

use super::error::FormatError;

/// A fill pattern name and the OOXML value it maps to.
#[derive(Debug, Clone)]
pub struct FillPattern {
    pub name: &'static str,
    pub value: PatternValues,
}

pub static BORDER_STYLES: &[&str] = &[
    "none",
    "thin",
    "medium",
    "dashed",
    "dotted",
    "thick",
    "double",
    "hair",
    "mediumDashed",
    "dashDot",
    "mediumDashDot",
    "dashDotDot",
    "mediumDashDotDot",
    "slantDashDot",
];

pub static FILL_PATTERNS: &[FillPattern] = &[
    FillPattern { name: "none", value: PatternValues::None },
    FillPattern { name: "solid", value: PatternValues::Solid },
    FillPattern { name: "darkGray", value: PatternValues::DarkGray },
    FillPattern { name: "mediumGray", value: PatternValues::MediumGray },
    FillPattern { name: "lightGray", value: PatternValues::LightGray },
    FillPattern { name: "gray125", value: PatternValues::Gray125 },
    FillPattern { name: "gray0625", value: PatternValues::Gray0625 },
];

pub static UNDERLINE_STYLES: &[&str] = &[
    "none",
    "single",
    "double",
    "singleAccounting",
    "doubleAccounting",
];

pub static HORIZONTAL_ALIGNMENTS: &[&str] = &[
    "general",
    "left",
    "center",
    "right",
    "fill",
    "justify",
    "centerContinuous",
    "distributed",
];

pub static VERTICAL_ALIGNMENTS: &[&str] = &["top", "center", "bottom", "justify", "distributed"];

/// Resolve a border style name to its OOXML spelling.
pub fn border_style(name: &str) -> Result<&'static str, FormatError> {
    BORDER_STYLES
        .iter()
        .find(|style| style.eq_ignore_ascii_case(name))
        .copied()
        .ok_or_else(|| FormatError::InvalidBorderStyle(name.to_string()))
}

/// Resolve a fill pattern name.
pub fn fill_pattern(name: &str) -> Result<&'static FillPattern, FormatError> {
    FILL_PATTERNS
        .iter()
        .find(|pattern| pattern.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| FormatError::InvalidFillPattern(name.to_string()))
}

/// Resolve an underline style name to its OOXML spelling.
pub fn underline_style(name: &str) -> Result<&'static str, FormatError> {
    UNDERLINE_STYLES
        .iter()
        .find(|style| style.eq_ignore_ascii_case(name))
        .copied()
        .ok_or_else(|| FormatError::InvalidUnderline(name.to_string()))
}

pub fn horizontal_alignment(name: &str) -> Result<HorizontalAlignmentValues, FormatError> {
    let value = match name.to_ascii_lowercase().as_str() {
        "general" => HorizontalAlignmentValues::General,
        "left" => HorizontalAlignmentValues::Left,
        "center" => HorizontalAlignmentValues::Center,
        "right" => HorizontalAlignmentValues::Right,
        "fill" => HorizontalAlignmentValues::Fill,
        "justify" => HorizontalAlignmentValues::Justify,
        "centercontinuous" => HorizontalAlignmentValues::CenterContinuous,
        "distributed" => HorizontalAlignmentValues::Distributed,
        _ => return Err(FormatError::invalid_alignment("horizontal", name)),
    };
    Ok(value)
}

pub fn vertical_alignment(name: &str) -> Result<VerticalAlignmentValues, FormatError> {
    let value = match name.to_ascii_lowercase().as_str() {
        "top" => VerticalAlignmentValues::Top,
        "center" => VerticalAlignmentValues::Center,
        "bottom" => VerticalAlignmentValues::Bottom,
        "justify" => VerticalAlignmentValues::Justify,
        "distributed" => VerticalAlignmentValues::Distributed,
        _ => return Err(FormatError::invalid_alignment("vertical", name)),
    };
    Ok(value)
}

/// Convert a rotation in degrees (-90..=90) to the OOXML encoding.
///
/// OOXML stores upward rotation as 0-90 and downward rotation as 91-180.
pub fn text_rotation(degrees: f64) -> Result<u32, FormatError> {
    if !degrees.is_finite() || !(-90.0..=90.0).contains(&degrees) {
        return Err(FormatError::InvalidRotation(degrees));
    }

    let degrees = degrees.trunc() as i32;
    if degrees >= 0 {
        Ok(degrees as u32)
    } else {
        Ok((90 - degrees) as u32)
    }
}

/// Normalize a hex color to ARGB.
///
/// Accepts `RRGGBB` or `AARRGGBB`, with or without a leading `#`.
pub fn argb_color(color: &str) -> Result<String, FormatError> {
    let hex = color.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(FormatError::InvalidColor(color.to_string()));
    }

    match hex.len() {
        6 => Ok(format!("FF{}", hex.to_ascii_uppercase())),
        8 => Ok(hex.to_ascii_uppercase()),
        _ => Err(FormatError::InvalidColor(color.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_style_lookup() {
        assert_eq!(border_style("thin").unwrap(), "thin");
        assert_eq!(border_style("MEDIUMDASHED").unwrap(), "mediumDashed");
        assert_eq!(
            border_style("wavy"),
            Err(FormatError::InvalidBorderStyle("wavy".to_string()))
        );
    }

    #[test]
    fn test_fill_pattern_lookup() {
        let pattern = fill_pattern("SOLID").unwrap();
        assert_eq!(pattern.name, "solid");
        assert!(matches!(pattern.value, PatternValues::Solid));
        assert_eq!(fill_pattern("gray0625").unwrap().name, "gray0625");
        assert!(fill_pattern("checkered").is_err());
    }

    #[test]
    fn test_underline_lookup() {
        assert_eq!(underline_style("singleaccounting").unwrap(), "singleAccounting");
        assert!(underline_style("wavy").is_err());
    }

    #[test]
    fn test_alignment_lookup() {
        assert!(matches!(
            horizontal_alignment("centerContinuous").unwrap(),
            HorizontalAlignmentValues::CenterContinuous
        ));
        assert!(matches!(
            vertical_alignment("TOP").unwrap(),
            VerticalAlignmentValues::Top
        ));
        assert!(horizontal_alignment("middle").is_err());
        assert!(vertical_alignment("left").is_err());
    }

    #[test]
    fn test_text_rotation_encoding() {
        assert_eq!(text_rotation(0.0).unwrap(), 0);
        assert_eq!(text_rotation(45.0).unwrap(), 45);
        assert_eq!(text_rotation(90.0).unwrap(), 90);
        assert_eq!(text_rotation(-45.0).unwrap(), 135);
        assert_eq!(text_rotation(-90.0).unwrap(), 180);
        assert!(text_rotation(91.0).is_err());
        assert!(text_rotation(f64::NAN).is_err());
    }

    #[test]
    fn test_argb_color() {
        assert_eq!(argb_color("ff0000").unwrap(), "FFFF0000");
        assert_eq!(argb_color("#00FF00").unwrap(), "FF00FF00");
        assert_eq!(argb_color("800000FF").unwrap(), "800000FF");
        assert!(argb_color("red").is_err());
        assert!(argb_color("FFF").is_err());
    }
}
