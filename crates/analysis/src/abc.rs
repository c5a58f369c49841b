//! ABC analysis: grade items by cumulative value contribution.

use serde::{Deserialize, Serialize};

use stocksense_core::ProductId;

/// ABC grade (value contribution).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbcGrade {
    A,
    B,
    C,
}

impl core::fmt::Display for AbcGrade {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            AbcGrade::A => "A",
            AbcGrade::B => "B",
            AbcGrade::C => "C",
        };
        f.write_str(s)
    }
}

/// Cumulative-contribution grade boundaries.
///
/// Defaults follow the classic 80/95 split: A up to 80% of total value,
/// B up to 95%, C for the tail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbcThresholds {
    pub a: f64,
    pub b: f64,
}

impl Default for AbcThresholds {
    fn default() -> Self {
        Self { a: 0.80, b: 0.95 }
    }
}

impl AbcThresholds {
    /// Grade for a cumulative contribution in `[0, 1]`.
    pub fn grade(&self, cumulative_percentage: f64) -> AbcGrade {
        if cumulative_percentage <= self.a {
            AbcGrade::A
        } else if cumulative_percentage <= self.b {
            AbcGrade::B
        } else {
            AbcGrade::C
        }
    }
}

/// One item to be graded, valued by revenue or usage amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbcItem {
    pub product_id: ProductId,
    pub name: String,
    pub value: f64,
}

/// Per-item ABC analysis output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbcResult {
    pub product_id: ProductId,
    pub name: String,
    pub value: f64,
    /// Cumulative contribution in `[0, 1]` at this item's rank.
    pub cumulative_percentage: f64,
    pub grade: AbcGrade,
    /// 1-based position in the value-descending ordering.
    pub rank: usize,
}

/// Perform ABC analysis over a catalog slice.
///
/// Items are ranked by value descending; grades follow the cumulative
/// contribution against `thresholds`. An all-zero catalog cannot define
/// contributions, so every item is graded C with an index-based cumulative
/// percentage (the tail past every threshold).
pub fn abc_analysis(items: &[AbcItem], thresholds: AbcThresholds) -> Vec<AbcResult> {
    if items.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<AbcItem> = items.to_vec();
    sorted.sort_by(|a, b| b.value.total_cmp(&a.value));

    let total: f64 = sorted.iter().map(|i| i.value).sum();

    if total == 0.0 {
        let n = sorted.len();
        return sorted
            .into_iter()
            .enumerate()
            .map(|(index, item)| AbcResult {
                product_id: item.product_id,
                name: item.name,
                value: item.value,
                cumulative_percentage: (index + 1) as f64 / n as f64,
                grade: AbcGrade::C,
                rank: index + 1,
            })
            .collect();
    }

    let mut cumulative = 0.0;
    sorted
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            cumulative += item.value;
            let cumulative_percentage = cumulative / total;
            AbcResult {
                product_id: item.product_id,
                name: item.name,
                value: item.value,
                cumulative_percentage,
                grade: thresholds.grade(cumulative_percentage),
                rank: index + 1,
            }
        })
        .collect()
}
