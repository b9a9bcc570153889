use serde::Deserialize;

const BUILTIN: &str = include_str!("../../assets/comparison.json");

/// Side-by-side comparison of the download strategies.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComparisonTable {
    pub columns: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComparisonRow {
    pub aspect: String,
    pub cells: Vec<String>,
}

impl ComparisonTable {
    pub fn builtin() -> Result<Self, serde_json::Error> {
        Self::from_json(BUILTIN)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Empty when the embedded table cannot be read; the rest of the window still works.
    pub fn load() -> Self {
        Self::builtin().unwrap_or_else(|e| {
            tracing::warn!("comparison table unavailable: {}", e);
            Self::default()
        })
    }
}
