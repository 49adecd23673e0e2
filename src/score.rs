//! Score and currency tracking
//!
//! Per-run score, session best, and the coin wallet. Saving bests and coin
//! totals is delegated to an external profile store; both types are seeded
//! with whatever that store loaded.

use serde::{Deserialize, Serialize};

/// Per-run score with best-so-far tracking.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScoreBoard {
    score: u32,
    best: u32,
    new_best: bool,
}

impl ScoreBoard {
    pub fn new(best: u32) -> Self {
        Self {
            score: 0,
            best,
            new_best: false,
        }
    }

    /// Add to the run score; updates the best as soon as it is passed.
    /// Returns the new score.
    pub fn add(&mut self, amount: u32) -> u32 {
        self.score = self.score.saturating_add(amount);
        if self.score > self.best {
            self.best = self.score;
            self.new_best = true;
        }
        self.score
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Whether this run has beaten the previous best.
    pub fn has_new_best(&self) -> bool {
        self.new_best
    }

    /// Start a fresh run; the best carries over.
    pub fn reset_run(&mut self) {
        self.score = 0;
        self.new_best = false;
    }
}

/// Total collectible currency across runs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CoinWallet {
    coins: u64,
}

impl CoinWallet {
    pub fn new(coins: u64) -> Self {
        Self { coins }
    }

    /// Returns the new total.
    pub fn add(&mut self, amount: u64) -> u64 {
        self.coins = self.coins.saturating_add(amount);
        self.coins
    }

    pub fn total(&self) -> u64 {
        self.coins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_tracks_best() {
        let mut board = ScoreBoard::new(2);
        board.add(1);
        assert!(!board.has_new_best());
        board.add(1);
        assert!(!board.has_new_best());
        board.add(1);
        assert!(board.has_new_best());
        assert_eq!(board.best(), 3);
    }

    #[test]
    fn test_reset_keeps_best() {
        let mut board = ScoreBoard::new(0);
        board.add(5);
        board.reset_run();
        assert_eq!(board.score(), 0);
        assert_eq!(board.best(), 5);
        assert!(!board.has_new_best());
    }

    #[test]
    fn test_wallet_accumulates() {
        let mut wallet = CoinWallet::new(10);
        assert_eq!(wallet.add(1), 11);
        assert_eq!(wallet.add(1), 12);
        assert_eq!(wallet.total(), 12);
    }
}
