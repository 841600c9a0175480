//! Player performance summary.

use super::{Analysis, StatsState};
use serde::Serialize;

/// Coarse skill bracket for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Expert,
}

/// Narrative summary of a player's record.
#[derive(Clone, Debug, Serialize)]
pub struct PerformanceSummary {
    pub level: SkillLevel,
    pub score: u32,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

/// Summarize a player's record. Score weighs wins over streaks; the level
/// brackets require both volume and win rate.
pub fn summarize(stats: &StatsState, analysis: &Analysis) -> PerformanceSummary {
    let percentages = stats.percentages();
    let score = stats.wins * 10 + stats.best_streak * 5;

    let level = if stats.total_games >= 50 && percentages.win_pct >= 60.0 {
        SkillLevel::Expert
    } else if stats.total_games >= 20 && percentages.win_pct >= 40.0 {
        SkillLevel::Intermediate
    } else {
        SkillLevel::Beginner
    };

    let mut strengths = Vec::new();
    if let Some(favorite) = analysis.favorite_choice {
        strengths.push(format!("most at home playing {}", favorite));
    }
    if stats.current_streak >= 3 {
        strengths.push(format!("riding a {}-win streak", stats.current_streak));
    }

    let mut weaknesses = Vec::new();
    if percentages.draw_pct > 30.0 {
        weaknesses.push("draws often; varying choices could help".to_string());
    }

    PerformanceSummary {
        level,
        score,
        strengths,
        weaknesses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Outcome;
    use crate::stats::{analyze, MatchHistory, SERVER_HISTORY_CAP};
    use chrono::Utc;

    fn empty_analysis() -> Analysis {
        analyze(&MatchHistory::new(SERVER_HISTORY_CAP), Utc::now())
    }

    fn stats_with(wins: u32, losses: u32, draws: u32) -> StatsState {
        let mut stats = StatsState::new();
        for _ in 0..wins {
            stats.record(Outcome::Win);
        }
        for _ in 0..losses {
            stats.record(Outcome::Lose);
        }
        for _ in 0..draws {
            stats.record(Outcome::Draw);
        }
        stats
    }

    #[test]
    fn test_fresh_player_is_beginner() {
        let summary = summarize(&StatsState::new(), &empty_analysis());
        assert_eq!(summary.level, SkillLevel::Beginner);
        assert_eq!(summary.score, 0);
        assert!(summary.strengths.is_empty());
        assert!(summary.weaknesses.is_empty());
    }

    #[test]
    fn test_expert_needs_volume_and_rate() {
        // 40 wins of 50 games: 80% over 50 games.
        let summary = summarize(&stats_with(40, 10, 0), &empty_analysis());
        assert_eq!(summary.level, SkillLevel::Expert);

        // Same rate but too few games.
        let summary = summarize(&stats_with(8, 2, 0), &empty_analysis());
        assert_eq!(summary.level, SkillLevel::Beginner);
    }

    #[test]
    fn test_intermediate_bracket() {
        let summary = summarize(&stats_with(10, 10, 0), &empty_analysis());
        assert_eq!(summary.level, SkillLevel::Intermediate);
    }

    #[test]
    fn test_score_weighs_wins_and_best_streak() {
        let stats = stats_with(3, 1, 0);
        let summary = summarize(&stats, &empty_analysis());
        // 3 wins in a row: best streak 3.
        assert_eq!(summary.score, 3 * 10 + 3 * 5);
    }

    #[test]
    fn test_draw_heavy_record_is_flagged() {
        let summary = summarize(&stats_with(2, 2, 6), &empty_analysis());
        assert_eq!(summary.weaknesses.len(), 1);
    }
}
