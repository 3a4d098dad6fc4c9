//! Leaderboard selection for the team view

use crate::api::Leaderboard;

/// Team-level leaderboards visible to students, in server order
pub fn visible_team_boards(boards: Vec<Leaderboard>) -> Vec<Leaderboard> {
    boards
        .into_iter()
        .filter(Leaderboard::is_visible_team_board)
        .collect()
}

/// First visible team leaderboard, if any
pub fn active_board(boards: &[Leaderboard]) -> Option<&Leaderboard> {
    boards.iter().find(|b| b.is_visible_team_board())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AssessmentLevel;

    fn board(id: i64, level: AssessmentLevel, visible: bool) -> Leaderboard {
        Leaderboard {
            id,
            name: Some(format!("board {}", id)),
            assessment_level: level,
            student_visible: visible,
            extra: Default::default(),
        }
    }

    #[test]
    fn test_filter_keeps_order() {
        let boards = vec![
            board(1, AssessmentLevel::Individual, true),
            board(2, AssessmentLevel::Team, false),
            board(3, AssessmentLevel::Team, true),
            board(4, AssessmentLevel::Unknown, true),
            board(5, AssessmentLevel::Team, true),
        ];

        assert_eq!(active_board(&boards).map(|b| b.id), Some(3));

        let ids: Vec<i64> = visible_team_boards(boards).iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![3, 5]);
    }

    #[test]
    fn test_no_match() {
        let boards = vec![
            board(1, AssessmentLevel::Individual, true),
            board(2, AssessmentLevel::Team, false),
        ];

        assert!(active_board(&boards).is_none());
        assert!(visible_team_boards(boards).is_empty());
        assert!(active_board(&[]).is_none());
    }
}
