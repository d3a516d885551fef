pub const DEFAULT_PRECISION: u32 = 3;

/// A record paired with its competition rank.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry<T> {
    pub display_rank: u32,
    pub record: T,
}

/// Assigns competition ranks ("1, 1, 3") to records that are already ordered best first.
///
/// Consecutive records with equal tie-keys share a rank; the next distinct key skips ahead by
/// the size of the tie group. The input order is trusted as is: records are never re-sorted, so
/// an unordered input yields ranks in arrival order.
pub fn competition_rank<T, K, F>(records: impl IntoIterator<Item = T>, tie_key: F) -> Vec<RankedEntry<T>>
where
    F: Fn(&T) -> K,
    K: PartialEq,
{
    let mut rank = 0;
    let mut tie_run = 0;
    let mut last_key: Option<K> = None;

    records
        .into_iter()
        .map(|record| {
            let key = tie_key(&record);
            if last_key.as_ref() == Some(&key) {
                tie_run += 1;
            } else {
                rank += 1 + tie_run;
                tie_run = 0;
                last_key = Some(key);
            }
            RankedEntry {
                display_rank: rank,
                record,
            }
        })
        .collect()
}

/// Rounds rating values for display. Missing values render as `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueFormatter {
    digits: u32,
}

impl ValueFormatter {
    pub fn new(digits: u32) -> Self {
        Self { digits }
    }

    pub fn digits(&self) -> u32 {
        self.digits
    }

    pub fn round(&self, value: f64) -> f64 {
        let factor = 10f64.powi(self.digits as i32);
        let rounded = (value * factor).round() / factor;
        // no "-0" in reports
        if rounded == 0.0 { 0.0 } else { rounded }
    }

    pub fn format(&self, value: Option<f64>) -> String {
        match value {
            Some(value) if value.is_finite() => self.round(value).to_string(),
            _ => "0".to_string(),
        }
    }
}

impl Default for ValueFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION)
    }
}
