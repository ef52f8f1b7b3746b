use serde::{Deserialize, Serialize};

/// Number of periods in a match.
pub const PERIOD_COUNT: usize = 3;
/// Number of score buckets per period.
pub const BUCKET_COUNT: usize = 4;

/// Goals scored and conceded for one ~20-minute period, one value per
/// countdown bucket ("19-15", "14-10", "9-5", "4-0"), in declared UI order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Period {
    pub scored: [i64; BUCKET_COUNT],
    pub conceded: [i64; BUCKET_COUNT],
}

impl Period {
    pub fn is_zero(&self) -> bool {
        self.scored.iter().all(|v| *v == 0) && self.conceded.iter().all(|v| *v == 0)
    }
}

/// Which input source the reader resolved the periods from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Store,
    Panel,
    None,
}

/// One net-momentum window placed on the 0-60 minute timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowPoint {
    pub minute: u32,
    pub value: i64,
}

/// Structured page-content source: up to 3 period groups of numeric-text
/// controls. Mirrors the scoreboard panel the widget scrapes, so control
/// values stay strings and go through the same zero-default coercion.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PanelDoc {
    #[serde(default)]
    pub groups: Vec<PanelGroup>,
}

/// One period group: either two rows of controls (scored row then conceded
/// row) or a flat list of controls.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PanelGroup {
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
    #[serde(default)]
    pub controls: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PeriodsResponse {
    pub source: SourceKind,
    pub periods: Vec<Period>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WindowsResponse {
    pub source: SourceKind,
    pub windows: Vec<WindowPoint>,
    pub max_scale: i64,
}
