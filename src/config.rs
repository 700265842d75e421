use serde::{Deserialize, Serialize};

pub const DEFAULT_PAR: i32 = 71;
pub const DEFAULT_NUM_ROUNDS: i32 = 4;
pub const DEFAULT_BEST_N: usize = 3;
pub const DEFAULT_ROSTER_SIZE: usize = 4;
/// Cut baseline used when no competing player has a known total.
pub const DEFAULT_CUT_FALLBACK_TOTAL: i32 = 20;
pub const DEFAULT_MAX_AGE_MINUTES: i64 = 60;

/// Tournament-wide constants the caller supplies alongside a leaderboard.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringPolicy {
    pub par: i32,
    pub num_rounds: i32,
    pub best_n: usize,
    pub roster_size: usize,
    pub cut_fallback_total: i32,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            par: DEFAULT_PAR,
            num_rounds: DEFAULT_NUM_ROUNDS,
            best_n: DEFAULT_BEST_N,
            roster_size: DEFAULT_ROSTER_SIZE,
            cut_fallback_total: DEFAULT_CUT_FALLBACK_TOTAL,
        }
    }
}

impl ScoringPolicy {
    /// # Errors
    ///
    /// Returns a message naming the first out-of-range field.
    pub fn validate(&self) -> Result<(), String> {
        if self.num_rounds < 1 {
            return Err(format!("num_rounds must be at least 1, got {}", self.num_rounds));
        }
        if self.best_n == 0 {
            return Err("best_n must be at least 1".to_string());
        }
        if self.roster_size < self.best_n {
            return Err(format!(
                "roster_size ({}) cannot be smaller than best_n ({})",
                self.roster_size, self.best_n
            ));
        }
        if !(18..=90).contains(&self.par) {
            return Err(format!("par {} is not a plausible 18 hole par", self.par));
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct StalenessPolicy {
    pub max_age_minutes: i64,
}

impl Default for StalenessPolicy {
    fn default() -> Self {
        Self {
            max_age_minutes: DEFAULT_MAX_AGE_MINUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(ScoringPolicy::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_roster_smaller_than_best_n() {
        let policy = ScoringPolicy {
            roster_size: 2,
            ..ScoringPolicy::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let policy: ScoringPolicy =
            serde_json::from_str(r#"{"par": 72}"#).expect("partial policy parses");
        assert_eq!(policy.par, 72);
        assert_eq!(policy.num_rounds, DEFAULT_NUM_ROUNDS);
    }
}
