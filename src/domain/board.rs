//! Ranked opportunity lists for one scan.

use super::opportunity::{Direction, Opportunity};
use crate::error::ValidationError;

/// Buy and sell opportunities from one scan, ranked by profit amount.
///
/// Ranking is a stable descending sort, so opportunities with equal
/// profit keep their arrival order.
#[derive(Debug, Clone, Default)]
pub struct OpportunityBoard {
    buy: Vec<Opportunity>,
    sell: Vec<Opportunity>,
}

impl OpportunityBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an opportunity to the list for its direction.
    ///
    /// Call [`rank`](Self::rank) once all opportunities are in.
    pub fn push(&mut self, opportunity: Opportunity) {
        match opportunity.direction() {
            Direction::Buy => self.buy.push(opportunity),
            Direction::Sell => self.sell.push(opportunity),
        }
    }

    /// Sort both lists by descending profit amount.
    pub fn rank(&mut self) {
        // sort_by is stable: ties keep arrival order.
        self.buy
            .sort_by(|a, b| b.profit_amount().cmp(&a.profit_amount()));
        self.sell
            .sort_by(|a, b| b.profit_amount().cmp(&a.profit_amount()));
    }

    pub fn buy(&self) -> &[Opportunity] {
        &self.buy
    }

    pub fn sell(&self) -> &[Opportunity] {
        &self.sell
    }

    pub fn list(&self, direction: Direction) -> &[Opportunity] {
        match direction {
            Direction::Buy => &self.buy,
            Direction::Sell => &self.sell,
        }
    }

    pub fn len(&self) -> usize {
        self.buy.len() + self.sell.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buy.is_empty() && self.sell.is_empty()
    }

    /// Look up an opportunity by its 1-based display rank.
    pub fn select(&self, direction: Direction, rank: usize) -> Result<&Opportunity, ValidationError> {
        let list = self.list(direction);
        rank.checked_sub(1)
            .and_then(|idx| list.get(idx))
            .ok_or_else(|| ValidationError::UnknownSelection {
                direction: direction.as_str().to_string(),
                rank,
                count: list.len(),
            })
    }

    /// Consume the board, returning the opportunity at the given rank.
    pub fn take(mut self, direction: Direction, rank: usize) -> Result<Opportunity, ValidationError> {
        self.select(direction, rank)?;
        let list = match direction {
            Direction::Buy => &mut self.buy,
            Direction::Sell => &mut self.sell,
        };
        Ok(list.swap_remove(rank - 1))
    }
}
