//! Classified arbitrage opportunities.
//!
//! An [`Opportunity`] is a [`RateQuote`] that cleared a threshold in one
//! direction. The profit figures are derived once, on construction, from
//! the quote's rate and available amount.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use super::money::{Amount, Rate};
use super::quote::RateQuote;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Which side of parity the opportunity sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Rate below parity: acquire the asset at a discount.
    Buy,
    /// Rate above parity: dispose of the asset at a premium.
    Sell,
}

impl Direction {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            other => Err(format!("unknown direction '{other}'")),
        }
    }
}

/// Distance from parity, labelled by direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spread {
    /// Percentage below parity.
    Discount(Decimal),
    /// Percentage above parity.
    Premium(Decimal),
}

impl fmt::Display for Spread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discount(pct) => write!(f, "{:.2}% discount", pct),
            Self::Premium(pct) => write!(f, "{:.2}% premium", pct),
        }
    }
}

/// A quote that cleared a profitability threshold in one direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Opportunity {
    quote: RateQuote,
    direction: Direction,
    profit_amount: Amount,
    profit_pct: Decimal,
}

impl Opportunity {
    /// Build an opportunity for `quote` in `direction`.
    ///
    /// Profit percentage is `(1 - rate) * 100` for buys and
    /// `(rate - 1) * 100` for sells. Profit amount is
    /// `available * |rate - 1|` in both directions.
    ///
    /// Returns `None` when a figure does not fit in a `Decimal`.
    pub fn new(quote: RateQuote, direction: Direction) -> Option<Self> {
        let rate = quote.rate();
        let deviation = rate.checked_sub(Decimal::ONE)?;
        let profit_pct = match direction {
            Direction::Buy => Decimal::ONE.checked_sub(rate)?.checked_mul(HUNDRED)?,
            Direction::Sell => deviation.checked_mul(HUNDRED)?,
        };
        let profit_amount = quote.available().checked_mul(deviation.abs())?;

        Some(Self {
            quote,
            direction,
            profit_amount,
            profit_pct,
        })
    }

    pub fn quote(&self) -> &RateQuote {
        &self.quote
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn rate(&self) -> Rate {
        self.quote.rate()
    }

    pub fn available(&self) -> Amount {
        self.quote.available()
    }

    /// Absolute profit in currency units if the full amount is taken.
    pub fn profit_amount(&self) -> Amount {
        self.profit_amount
    }

    pub fn profit_pct(&self) -> Decimal {
        self.profit_pct
    }

    /// Discount (buy) or premium (sell) relative to parity.
    pub fn spread(&self) -> Spread {
        match self.direction {
            Direction::Buy => Spread::Discount(self.profit_pct),
            Direction::Sell => Spread::Premium(self.profit_pct),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::listing::{MarketEntry, RawListing};
    use rust_decimal_macros::dec;

    fn quote(available: Decimal, rate: Decimal) -> RateQuote {
        let listing = RawListing::new("1", available, vec![]);
        RateQuote::from_entry(&listing, &MarketEntry::new("wise", "USD", rate)).unwrap()
    }

    #[test]
    fn buy_profit_is_discount_times_amount() {
        let opp = Opportunity::new(quote(dec!(500), dec!(0.95)), Direction::Buy).unwrap();

        assert_eq!(opp.profit_pct(), dec!(5));
        assert_eq!(opp.profit_amount(), dec!(25));
        assert_eq!(opp.spread(), Spread::Discount(dec!(5)));
    }

    #[test]
    fn sell_profit_is_premium_times_amount() {
        let opp = Opportunity::new(quote(dec!(200), dec!(1.02)), Direction::Sell).unwrap();

        assert_eq!(opp.profit_pct(), dec!(2));
        assert_eq!(opp.profit_amount(), dec!(4));
        assert_eq!(opp.spread(), Spread::Premium(dec!(2)));
    }

    #[test]
    fn overflowing_profit_is_rejected() {
        let huge = quote(Decimal::from(10u64.pow(15)), Decimal::from(10u64.pow(14)));
        assert!(Opportunity::new(huge, Direction::Sell).is_none());
        assert!(Opportunity::new(quote(Decimal::MAX, dec!(3)), Direction::Sell).is_none());
        assert!(Opportunity::new(quote(Decimal::MAX, dec!(0.5)), Direction::Buy).is_some());
    }

    #[test]
    fn direction_parses_case_insensitively() {
        assert_eq!("BUY".parse::<Direction>(), Ok(Direction::Buy));
        assert_eq!(" sell ".parse::<Direction>(), Ok(Direction::Sell));
        assert!("hold".parse::<Direction>().is_err());
    }

    #[test]
    fn spread_display() {
        assert_eq!(Spread::Discount(dec!(3)).to_string(), "3.00% discount");
        assert_eq!(Spread::Premium(dec!(1.5)).to_string(), "1.50% premium");
    }
}
