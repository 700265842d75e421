use crate::model::LeaderboardRow;

/// What the field as a whole has done in one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundState {
    pub round_id: i32,
    /// Every competing (non-eliminated) player has strokes for the round.
    pub complete: bool,
    /// Highest real stroke count recorded by anyone, eliminated or not.
    pub max_strokes: Option<i32>,
    /// Score to par that came with `max_strokes`, if the provider sent one.
    pub max_strokes_score_to_par: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundCompleteness {
    rounds: Vec<RoundState>,
}

impl RoundCompleteness {
    #[must_use]
    pub fn state(&self, round_id: i32) -> Option<&RoundState> {
        self.rounds.iter().find(|s| s.round_id == round_id)
    }

    #[must_use]
    pub fn is_complete(&self, round_id: i32) -> bool {
        self.state(round_id).is_some_and(|s| s.complete)
    }

    /// Max strokes for a round, only reported once the round is complete.
    #[must_use]
    pub fn max_strokes(&self, round_id: i32) -> Option<i32> {
        self.state(round_id)
            .filter(|s| s.complete)
            .and_then(|s| s.max_strokes)
    }

    #[must_use]
    pub fn complete_rounds(&self) -> Vec<i32> {
        self.rounds
            .iter()
            .filter(|s| s.complete)
            .map(|s| s.round_id)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoundState> {
        self.rounds.iter()
    }
}

/// Works out, per round, whether the competing field has finished it and the
/// worst real score posted in it.
///
/// Completeness is judged only on players who are still in the tournament.
/// The stroke pool draws on everyone's real rounds; synthesized penalty rounds
/// are left out so a second pass over penalized rows sees the same maximum.
#[must_use]
pub fn analyze_rounds(rows: &[LeaderboardRow], num_rounds: i32) -> RoundCompleteness {
    let rounds = (1..=num_rounds)
        .map(|round_id| {
            let mut every_competitor_posted = true;
            let mut max: Option<(i32, Option<i32>)> = None;

            for row in rows {
                let entry = row.round(round_id);
                let strokes = entry.and_then(|e| e.strokes);

                if !row.is_eliminated() && strokes.is_none() {
                    every_competitor_posted = false;
                }

                let Some(entry) = entry.filter(|e| !e.is_penalty) else {
                    continue;
                };
                let Some(strokes) = strokes else {
                    continue;
                };
                max = match max {
                    None => Some((strokes, entry.score_to_par)),
                    Some((best, _)) if strokes > best => Some((strokes, entry.score_to_par)),
                    Some((best, None)) if strokes == best => Some((best, entry.score_to_par)),
                    keep => keep,
                };
            }

            RoundState {
                round_id,
                complete: every_competitor_posted && max.is_some(),
                max_strokes: max.map(|(strokes, _)| strokes),
                max_strokes_score_to_par: max.and_then(|(_, to_par)| to_par),
            }
        })
        .collect();

    RoundCompleteness { rounds }
}
