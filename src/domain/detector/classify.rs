//! Threshold classification of rate quotes.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::money::Rate;
use crate::domain::opportunity::{Direction, Opportunity};
use crate::domain::quote::RateQuote;
use crate::error::ValidationError;

/// Operator-set rate thresholds for each direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Thresholds {
    /// Quotes at or below this rate are buy opportunities.
    #[serde(default = "default_buy", rename = "buy_threshold")]
    pub buy: Rate,
    /// Quotes at or above this rate are sell opportunities.
    #[serde(default = "default_sell", rename = "sell_threshold")]
    pub sell: Rate,
}

fn default_buy() -> Rate {
    Decimal::new(97, 2) // 0.97
}

fn default_sell() -> Rate {
    Decimal::new(1015, 3) // 1.015
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            buy: default_buy(),
            sell: default_sell(),
        }
    }
}

impl Thresholds {
    pub fn new(buy: Rate, sell: Rate) -> Self {
        Self { buy, sell }
    }

    /// True when some rate satisfies both rules at once.
    pub fn overlap(&self) -> bool {
        self.sell <= self.buy
    }

    /// Discount implied by the buy threshold, in percent.
    pub fn buy_discount_pct(&self) -> Decimal {
        Decimal::ONE.saturating_sub(self.buy).saturating_mul(Decimal::ONE_HUNDRED)
    }

    /// Premium implied by the sell threshold, in percent.
    pub fn sell_premium_pct(&self) -> Decimal {
        self.sell.saturating_sub(Decimal::ONE).saturating_mul(Decimal::ONE_HUNDRED)
    }
}

fn qualifies_buy(rate: Rate, thresholds: &Thresholds) -> bool {
    rate > Decimal::ZERO && rate <= thresholds.buy
}

fn qualifies_sell(rate: Rate, thresholds: &Thresholds) -> bool {
    rate >= thresholds.sell
}

/// Classify a quote into zero, one, or two opportunities.
///
/// Each direction is evaluated independently. With overlapping thresholds
/// a single quote produces both a buy and a sell opportunity. A quote whose
/// profit cannot be represented is rejected as a whole.
pub fn classify(quote: &RateQuote, thresholds: &Thresholds) -> Result<Vec<Opportunity>, ValidationError> {
    let rate = quote.rate();
    let mut out = Vec::with_capacity(2);

    let directions = [
        (Direction::Buy, qualifies_buy(rate, thresholds)),
        (Direction::Sell, qualifies_sell(rate, thresholds)),
    ];
    for (direction, qualifies) in directions {
        if !qualifies {
            continue;
        }
        let opportunity =
            Opportunity::new(quote.clone(), direction).ok_or_else(|| ValidationError::OutOfRange {
                listing: quote.listing_id().to_string(),
            })?;
        out.push(opportunity);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::listing::{MarketEntry, RawListing};
    use rust_decimal_macros::dec;

    fn quote(available: Decimal, rate: Decimal) -> RateQuote {
        let listing = RawListing::new("9", available, vec![]);
        RateQuote::from_entry(&listing, &MarketEntry::new("zelle", "USD", rate)).unwrap()
    }

    fn defaults() -> Thresholds {
        Thresholds::new(dec!(0.97), dec!(1.015))
    }

    #[test]
    fn discounted_quote_is_buy() {
        let opps = classify(&quote(dec!(500), dec!(0.95)), &defaults()).unwrap();

        assert_eq!(opps.len(), 1);
        assert_eq!(opps[0].direction(), Direction::Buy);
        assert_eq!(opps[0].profit_pct(), dec!(5.0));
        assert_eq!(opps[0].profit_amount(), dec!(25.0));
    }

    #[test]
    fn premium_quote_is_sell() {
        let opps = classify(&quote(dec!(200), dec!(1.02)), &defaults()).unwrap();

        assert_eq!(opps.len(), 1);
        assert_eq!(opps[0].direction(), Direction::Sell);
        assert_eq!(opps[0].profit_pct(), dec!(2.0));
        assert_eq!(opps[0].profit_amount(), dec!(4.0));
    }

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(classify(&quote(dec!(100), dec!(0.97)), &defaults()).unwrap().len(), 1);
        assert_eq!(classify(&quote(dec!(100), dec!(1.015)), &defaults()).unwrap().len(), 1);
    }

    #[test]
    fn quote_between_thresholds_is_ignored() {
        assert!(classify(&quote(dec!(100), dec!(1.0)), &defaults()).unwrap().is_empty());
        assert!(classify(&quote(dec!(100), dec!(0.9701)), &defaults()).unwrap().is_empty());
    }

    #[test]
    fn overlapping_thresholds_yield_both_directions() {
        let thresholds = Thresholds::new(dec!(1.05), dec!(0.99));
        assert!(thresholds.overlap());

        let opps = classify(&quote(dec!(100), dec!(1.0)), &thresholds).unwrap();
        let directions: Vec<_> = opps.iter().map(|o| o.direction()).collect();
        assert_eq!(directions, vec![Direction::Buy, Direction::Sell]);
    }

    #[test]
    fn profit_pct_is_exact_for_many_rates() {
        let t = Thresholds::new(dec!(0.999), dec!(1.001));
        for rate in [dec!(0.5), dec!(0.9123), dec!(0.987654)] {
            let opps = classify(&quote(dec!(100), rate), &t).unwrap();
            assert_eq!(opps[0].profit_pct(), (Decimal::ONE - rate) * Decimal::ONE_HUNDRED);
        }
        for rate in [dec!(1.5), dec!(1.0123), dec!(1.987654)] {
            let opps = classify(&quote(dec!(100), rate), &t).unwrap();
            assert_eq!(opps[0].profit_pct(), (rate - Decimal::ONE) * Decimal::ONE_HUNDRED);
        }
    }

    #[test]
    fn implied_percentages() {
        let t = defaults();
        assert_eq!(t.buy_discount_pct(), dec!(3));
        assert_eq!(t.sell_premium_pct(), dec!(1.5));
        assert!(!t.overlap());
    }

    #[test]
    fn unrepresentable_profit_rejects_quote() {
        let huge = quote(Decimal::from(10u64.pow(15)), Decimal::from(10u64.pow(14)));

        assert_eq!(
            classify(&huge, &defaults()),
            Err(ValidationError::OutOfRange { listing: "9".into() })
        );
    }

    #[test]
    fn implied_percentages_saturate() {
        let t = Thresholds::new(dec!(0.97), Decimal::MAX);
        assert_eq!(t.sell_premium_pct(), Decimal::MAX);
    }
}
