//! List view formatter for the stored confidence percentage

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeColor {
    Green,
    Red,
    Gray,
}

impl BadgeColor {
    pub fn as_css(&self) -> &'static str {
        match self {
            BadgeColor::Green => "green",
            BadgeColor::Red => "red",
            BadgeColor::Gray => "gray",
        }
    }
}

/// Confidence score cell: green from 90%, red above zero, gray otherwise
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceBadge {
    pub score: f64,
    pub color: BadgeColor,
}

impl ConfidenceBadge {
    pub const GREEN_THRESHOLD: f64 = 90.0;

    /// Empty cells (no value, or zero) produce no badge
    pub fn from_score(value: Option<f64>) -> Option<Self> {
        let score = value.filter(|v| *v != 0.0 && !v.is_nan())?;
        let color = if score >= Self::GREEN_THRESHOLD {
            BadgeColor::Green
        } else if score > 0.0 {
            BadgeColor::Red
        } else {
            BadgeColor::Gray
        };
        Some(Self { score, color })
    }

    pub fn to_html(&self) -> String {
        format!(
            r#"<span style="color: {}; font-weight: bold;">{}</span>"#,
            self.color.as_css(),
            self
        )
    }

    /// Formatter entry point: empty string for empty cells
    pub fn render(value: Option<f64>) -> String {
        Self::from_score(value)
            .map(|badge| badge.to_html())
            .unwrap_or_default()
    }
}

impl fmt::Display for ConfidenceBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.score)
    }
}
