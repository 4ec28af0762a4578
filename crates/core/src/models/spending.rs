use serde::{Deserialize, Serialize};

/// Total spending in one category. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpend {
    /// Category label
    pub category: String,

    /// Sum of absolute transaction amounts (never negative)
    pub amount: f64,

    /// Display color tag (e.g., "#4ECDC4")
    pub color: String,
}

/// One slice of the spending donut, ready for rendering.
///
/// The core generates these; the frontend just draws them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySegment {
    pub category: String,
    pub amount: f64,
    pub color: String,

    /// Share of total spending, 0–100
    pub percentage: f64,

    /// Cumulative rotation where this slice begins, in degrees
    pub start_angle: f64,

    /// Angular size of this slice, in degrees
    pub sweep_angle: f64,
}
