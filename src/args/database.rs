use super::types::{Args, CleanArgs};
use crate::config::{ScoringPolicy, StalenessPolicy};

impl Args {
    /// Checks cross-field constraints and turns the raw arguments into the
    /// policies the scoring service takes.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the scoring policy is out of range, the max age is
    /// negative, or the snapshot database's directory does not exist.
    pub fn validate(self) -> Result<CleanArgs, String> {
        let policy = ScoringPolicy {
            par: self.par,
            num_rounds: self.rounds,
            best_n: self.best_n,
            roster_size: self.roster_size,
            ..ScoringPolicy::default()
        };
        policy.validate()?;

        if self.max_age_minutes < 0 {
            return Err(format!(
                "max_age_minutes must not be negative, got {}",
                self.max_age_minutes
            ));
        }
        if self.tournament_id.trim().is_empty() {
            return Err("tournament_id must not be empty".to_string());
        }

        if let Some(store) = &self.store {
            let parent = store.parent().filter(|p| !p.as_os_str().is_empty());
            if let Some(parent) = parent {
                if !parent.is_dir() {
                    return Err(format!(
                        "The snapshot database directory '{}' does not exist.",
                        parent.display()
                    ));
                }
            }
        }

        Ok(CleanArgs {
            leaderboard: self.leaderboard,
            teams: self.teams,
            tournament_id: self.tournament_id.trim().to_string(),
            policy,
            staleness: StalenessPolicy {
                max_age_minutes: self.max_age_minutes,
            },
            store: self.store,
            standings: self.standings,
        })
    }
}
