//! Match statistics tracking.
//!
//! Counts wins per seat across a series of games. A game with several
//! winners credits each of them and also counts as shared; a game nobody
//! won (stalled before anyone reached the goal) counts separately.

use std::time::{Duration, Instant};
use tracing::info;

/// Aggregated results for a series of games.
#[derive(Debug)]
pub struct MatchStats {
    labels: Vec<String>,
    games: u32,
    wins: Vec<u32>,
    shared: u32,
    no_winner: u32,
    total_rounds: u64,
    start_time: Instant,
}

/// Point-in-time copy of the totals.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchStatsSnapshot {
    pub games: u32,
    pub wins: Vec<u32>,
    pub shared: u32,
    pub no_winner: u32,
    pub avg_rounds: f64,
    pub games_per_second: f64,
}

impl MatchStats {
    /// Create a tracker for seats labelled `labels`.
    pub fn new(labels: Vec<String>) -> Self {
        let seats = labels.len();
        Self {
            labels,
            games: 0,
            wins: vec![0; seats],
            shared: 0,
            no_winner: 0,
            total_rounds: 0,
            start_time: Instant::now(),
        }
    }

    /// Record a finished game.
    pub fn record_game(&mut self, winners: &[usize], rounds: u32) {
        self.games += 1;
        self.total_rounds += rounds as u64;
        match winners.len() {
            0 => self.no_winner += 1,
            1 => {}
            _ => self.shared += 1,
        }
        for &seat in winners {
            if let Some(w) = self.wins.get_mut(seat) {
                *w += 1;
            }
        }
    }

    pub fn games(&self) -> u32 {
        self.games
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn snapshot(&self) -> MatchStatsSnapshot {
        let runtime = self.elapsed().as_secs_f64();
        let avg_rounds = if self.games > 0 {
            self.total_rounds as f64 / self.games as f64
        } else {
            0.0
        };
        let games_per_second = if runtime > 0.0 {
            self.games as f64 / runtime
        } else {
            0.0
        };

        MatchStatsSnapshot {
            games: self.games,
            wins: self.wins.clone(),
            shared: self.shared,
            no_winner: self.no_winner,
            avg_rounds,
            games_per_second,
        }
    }

    /// Log the running totals, one line per seat.
    pub fn log_summary(&self) {
        let snapshot = self.snapshot();
        info!(
            games = snapshot.games,
            shared = snapshot.shared,
            no_winner = snapshot.no_winner,
            avg_rounds = format!("{:.1}", snapshot.avg_rounds),
            games_per_second = format!("{:.2}", snapshot.games_per_second),
            "Match totals"
        );
        for (seat, (label, wins)) in self.labels.iter().zip(&snapshot.wins).enumerate() {
            let rate = if snapshot.games > 0 {
                *wins as f64 / snapshot.games as f64 * 100.0
            } else {
                0.0
            };
            info!(
                seat,
                agent = %label,
                wins,
                win_rate = format!("{:.1}%", rate),
                "Seat totals"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_seats() -> MatchStats {
        MatchStats::new(vec!["mcts".into(), "default".into()])
    }

    #[test]
    fn test_record_game() {
        let mut stats = two_seats();

        stats.record_game(&[0], 30);
        stats.record_game(&[1], 28);
        stats.record_game(&[0, 1], 32);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.games, 3);
        assert_eq!(snapshot.wins, vec![2, 2]);
        assert_eq!(snapshot.shared, 1);
        assert_eq!(snapshot.no_winner, 0);
        assert!((snapshot.avg_rounds - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_game_without_winner() {
        let mut stats = two_seats();
        stats.record_game(&[], 90);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.no_winner, 1);
        assert_eq!(snapshot.wins, vec![0, 0]);
    }

    // ========================================
    // Edge case tests
    // ========================================

    #[test]
    fn test_average_with_zero_games() {
        let stats = two_seats();

        let snapshot = stats.snapshot();

        // Averages should be 0.0, not NaN or panic
        assert_eq!(snapshot.games, 0);
        assert_eq!(snapshot.avg_rounds, 0.0);
        assert!(!snapshot.avg_rounds.is_nan());
    }

    #[test]
    fn test_out_of_range_seat_is_ignored() {
        let mut stats = two_seats();
        stats.record_game(&[5], 10);
        assert_eq!(stats.snapshot().wins, vec![0, 0]);
        assert_eq!(stats.games(), 1);
    }
}
