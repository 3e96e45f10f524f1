//! Stage to drop items neither source has an opinion on.
//!
//! Optional: by default every unrated catalog item is ranked, and items
//! with no signal simply sort last.

use crate::context::RequestContext;
use crate::traits::ScoreStage;
use anyhow::Result;
use sources::{ScoreEntry, Signal};

/// Removes entries whose CF and CB contributions are both zero.
pub struct ZeroSignalFilter;

impl ScoreStage for ZeroSignalFilter {
    fn name(&self) -> &str {
        "ZeroSignalFilter"
    }

    fn apply(&self, entries: Vec<ScoreEntry>, _context: &RequestContext) -> Result<Vec<ScoreEntry>> {
        let filtered: Vec<ScoreEntry> = entries
            .into_iter()
            .filter(|entry| entry.dominant_signal() != Signal::None)
            .collect();
        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_signal_filter() {
        let entries = vec![
            ScoreEntry::new(100, 0.0, 0.0, (0.0, 0.0)),
            ScoreEntry::new(101, 3.0, 0.0, (1.8, 0.0)),
            ScoreEntry::new(200, 0.0, 0.0, (0.0, 0.0)),
            ScoreEntry::new(300, 0.0, 0.2, (0.0, 0.4)),
        ];

        let filtered = ZeroSignalFilter
            .apply(entries, &RequestContext::default())
            .unwrap();

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].item_id, 101);
        assert_eq!(filtered[1].item_id, 300);
    }
}
