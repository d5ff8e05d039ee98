use serde::{Deserialize, Serialize};

// ── Rewrite statistics ───────────────────────────────────────────────────

/// Counts of date rewrites by expression kind, for one normalization run.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RewriteStats {
    /// 令和五年三月末日-style era expressions
    pub era_dates: usize,
    /// 2023年3月31日 / 二〇二三年三月末日-style expressions
    pub gregorian_dates: usize,
    /// R5.3.2-style abbreviated era expressions
    pub abbreviated_dates: usize,
    /// 2023/3/31 and 2023.3.31 delimiter forms
    pub delimited_dates: usize,
}

impl RewriteStats {
    pub fn total(&self) -> usize {
        self.era_dates + self.gregorian_dates + self.abbreviated_dates + self.delimited_dates
    }

    pub fn merge(&mut self, other: &RewriteStats) {
        self.era_dates += other.era_dates;
        self.gregorian_dates += other.gregorian_dates;
        self.abbreviated_dates += other.abbreviated_dates;
        self.delimited_dates += other.delimited_dates;
    }
}

// ── Batch output format ──────────────────────────────────────────────────

/// Per-file outcome of a batch run.
#[derive(Debug, Serialize, Deserialize)]
pub struct FileReport {
    pub file: String,
    pub bytes_in: usize,
    pub bytes_out: usize,
    pub rewrites: RewriteStats,
}

/// Aggregated result of a batch run, written to output/report.json.
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchReport {
    pub total_files: usize,
    pub totals: RewriteStats,
    pub files: Vec<FileReport>,
}
