//! History-based trend analysis and play suggestions.

use crate::game::Choice;
use crate::stats::MatchHistory;
use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Rationale attached to the default suggestion when no history exists.
const OPENING_REASON: &str = "a balanced choice to open with";

/// Per-choice occurrence counts.
///
/// Remembers the order in which choices were first encountered so that
/// `most_common` breaks ties deterministically: a tie goes to the choice
/// seen earliest in the iteration that filled the tally. Suggestions stay
/// reproducible for identical histories because of this.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChoiceTally {
    counts: [u32; 3],
    first_seen: [Option<u32>; 3],
    next_rank: u32,
}

impl ChoiceTally {
    pub fn add(&mut self, choice: Choice) {
        let i = choice as usize;
        if self.first_seen[i].is_none() {
            self.first_seen[i] = Some(self.next_rank);
            self.next_rank += 1;
        }
        self.counts[i] += 1;
    }

    pub fn count(&self, choice: Choice) -> u32 {
        self.counts[choice as usize]
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// The choice with the highest count; ties go to the first-encountered.
    /// None when nothing has been tallied.
    pub fn most_common(&self) -> Option<Choice> {
        let mut best: Option<(Choice, u32, u32)> = None;
        for choice in Choice::ALL {
            let i = choice as usize;
            let rank = match self.first_seen[i] {
                Some(rank) => rank,
                None => continue,
            };
            let count = self.counts[i];
            best = match best {
                Some((_, best_count, best_rank))
                    if count < best_count || (count == best_count && rank > best_rank) =>
                {
                    best
                }
                _ => Some((choice, count, rank)),
            };
        }
        best.map(|(choice, _, _)| choice)
    }

    /// Tallied choices in first-encounter order.
    fn encountered(&self) -> Vec<Choice> {
        let mut seen: Vec<(u32, Choice)> = Choice::ALL
            .iter()
            .filter_map(|&choice| self.first_seen[choice as usize].map(|rank| (rank, choice)))
            .collect();
        seen.sort_by_key(|&(rank, _)| rank);
        seen.into_iter().map(|(_, choice)| choice).collect()
    }
}

// Rendered as a name -> count map in first-encounter order, mirroring how
// the tally was accumulated.
impl Serialize for ChoiceTally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let encountered = self.encountered();
        let mut map = serializer.serialize_map(Some(encountered.len()))?;
        for choice in encountered {
            map.serialize_entry(choice.as_str(), &self.counts[choice as usize])?;
        }
        map.end()
    }
}

/// Match counts per (user, opponent) pairing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PairingGrid {
    counts: [[u32; 3]; 3],
}

impl PairingGrid {
    pub fn add(&mut self, user: Choice, opponent: Choice) {
        self.counts[user as usize][opponent as usize] += 1;
    }

    pub fn count(&self, user: Choice, opponent: Choice) -> u32 {
        self.counts[user as usize][opponent as usize]
    }
}

// Rendered as a "rock_vs_paper" -> count map, non-zero pairings only.
impl Serialize for PairingGrid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries: Vec<(String, u32)> = Choice::ALL
            .iter()
            .flat_map(|&user| {
                Choice::ALL.iter().filter_map(move |&opponent| {
                    let count = self.counts[user as usize][opponent as usize];
                    (count > 0).then(|| (format!("{}_vs_{}", user, opponent), count))
                })
            })
            .collect();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, count) in entries {
            map.serialize_entry(&key, &count)?;
        }
        map.end()
    }
}

/// Trend analysis over a match history.
#[derive(Clone, Debug, Serialize)]
pub struct Analysis {
    pub user_choices: ChoiceTally,
    pub opponent_choices: ChoiceTally,
    pub outcome_by_pairing: PairingGrid,
    pub games_today: u32,
    pub favorite_choice: Option<Choice>,
}

/// Analyze a history. `now` is injected so the date boundary used by
/// `games_today` is under the caller's control.
pub fn analyze(history: &MatchHistory, now: DateTime<Utc>) -> Analysis {
    let mut user_choices = ChoiceTally::default();
    let mut opponent_choices = ChoiceTally::default();
    let mut outcome_by_pairing = PairingGrid::default();
    let mut games_today = 0;
    let today = now.date_naive();

    for record in history.iter() {
        user_choices.add(record.user);
        opponent_choices.add(record.opponent);
        outcome_by_pairing.add(record.user, record.opponent);
        if record.played_at.date_naive() == today {
            games_today += 1;
        }
    }

    let favorite_choice = user_choices.most_common();
    Analysis {
        user_choices,
        opponent_choices,
        outcome_by_pairing,
        games_today,
        favorite_choice,
    }
}

/// A play suggestion with its rationale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub suggestion: Choice,
    pub reason: String,
    /// The opponent habit the suggestion counters, when one exists.
    pub counters: Option<Choice>,
}

/// Suggest the choice that beats the opponent's most frequent historical
/// choice. An empty history yields Rock with a fixed rationale.
pub fn suggest(history: &MatchHistory) -> Suggestion {
    let mut opponent_choices = ChoiceTally::default();
    for record in history.iter() {
        opponent_choices.add(record.opponent);
    }

    match opponent_choices.most_common() {
        Some(frequent) => Suggestion {
            suggestion: frequent.counter(),
            reason: format!("the opponent frequently plays {}", frequent),
            counters: Some(frequent),
        },
        None => Suggestion {
            suggestion: Choice::Rock,
            reason: OPENING_REASON.to_string(),
            counters: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::resolve;
    use crate::stats::{MatchRecord, SERVER_HISTORY_CAP};
    use chrono::Duration;

    fn history_of(pairs: &[(Choice, Choice)], now: DateTime<Utc>) -> MatchHistory {
        let mut history = MatchHistory::new(SERVER_HISTORY_CAP);
        for &(user, opponent) in pairs {
            history.push(MatchRecord::new(now, user, opponent, resolve(user, opponent)));
        }
        history
    }

    #[test]
    fn test_frequencies_count_occurrences() {
        let now = Utc::now();
        let history = history_of(
            &[
                (Choice::Rock, Choice::Paper),
                (Choice::Rock, Choice::Scissors),
                (Choice::Paper, Choice::Paper),
            ],
            now,
        );
        let analysis = analyze(&history, now);

        assert_eq!(analysis.user_choices.count(Choice::Rock), 2);
        assert_eq!(analysis.user_choices.count(Choice::Paper), 1);
        assert_eq!(analysis.opponent_choices.count(Choice::Paper), 2);
        assert_eq!(analysis.outcome_by_pairing.count(Choice::Rock, Choice::Paper), 1);
        assert_eq!(analysis.games_today, 3);
        assert_eq!(analysis.favorite_choice, Some(Choice::Rock));
    }

    #[test]
    fn test_favorite_tie_breaks_to_first_encountered() {
        let now = Utc::now();
        // Newest first: scissors is encountered before rock when iterating.
        let history = history_of(
            &[
                (Choice::Rock, Choice::Rock),
                (Choice::Scissors, Choice::Rock),
            ],
            now,
        );
        let analysis = analyze(&history, now);
        assert_eq!(analysis.favorite_choice, Some(Choice::Scissors));
    }

    #[test]
    fn test_games_today_respects_date_boundary() {
        let now = Utc::now();
        let mut history = MatchHistory::new(SERVER_HISTORY_CAP);
        history.push(MatchRecord::new(
            now - Duration::days(2),
            Choice::Rock,
            Choice::Rock,
            resolve(Choice::Rock, Choice::Rock),
        ));
        history.push(MatchRecord::new(
            now,
            Choice::Paper,
            Choice::Rock,
            resolve(Choice::Paper, Choice::Rock),
        ));

        let analysis = analyze(&history, now);
        assert_eq!(analysis.games_today, 1);
    }

    #[test]
    fn test_empty_history_has_no_favorite() {
        let now = Utc::now();
        let analysis = analyze(&MatchHistory::new(SERVER_HISTORY_CAP), now);
        assert_eq!(analysis.favorite_choice, None);
        assert_eq!(analysis.games_today, 0);
        assert!(analysis.user_choices.is_empty());
    }

    #[test]
    fn test_suggest_counters_frequent_opponent_choice() {
        let now = Utc::now();
        let history = history_of(
            &[
                (Choice::Rock, Choice::Scissors),
                (Choice::Rock, Choice::Scissors),
                (Choice::Rock, Choice::Paper),
            ],
            now,
        );
        let suggestion = suggest(&history);

        // Scissors is the opponent habit; rock beats it.
        assert_eq!(suggestion.counters, Some(Choice::Scissors));
        assert_eq!(suggestion.suggestion, Choice::Rock);
        assert!(suggestion.suggestion.beats(&Choice::Scissors));
    }

    #[test]
    fn test_suggest_default_on_empty_history() {
        let suggestion = suggest(&MatchHistory::new(SERVER_HISTORY_CAP));
        assert_eq!(suggestion.suggestion, Choice::Rock);
        assert_eq!(suggestion.counters, None);
        assert_eq!(suggestion.reason, OPENING_REASON);
    }

    #[test]
    fn test_identical_histories_identical_suggestions() {
        let now = Utc::now();
        let pairs = [
            (Choice::Paper, Choice::Rock),
            (Choice::Rock, Choice::Paper),
            (Choice::Scissors, Choice::Rock),
            (Choice::Rock, Choice::Paper),
        ];
        let a = suggest(&history_of(&pairs, now));
        let b = suggest(&history_of(&pairs, now));
        assert_eq!(a, b);
    }

    #[test]
    fn test_tally_serializes_in_encounter_order() {
        let mut tally = ChoiceTally::default();
        tally.add(Choice::Scissors);
        tally.add(Choice::Rock);
        tally.add(Choice::Scissors);

        let json = serde_json::to_string(&tally).unwrap();
        assert_eq!(json, r#"{"scissors":2,"rock":1}"#);
    }
}
