use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Expiration date to per-expiration value, iterated earliest date first.
pub type ExpirationSet<T> = BTreeMap<NaiveDate, T>;

/// Provider-side key for one expiration (unix seconds, as Yahoo reports them).
pub type ExpirationHandle = i64;

/// One entry of an options chain
#[derive(Debug, Clone, PartialEq)]
pub struct OptionContract {
    pub strike: f64,
    pub ask: Option<f64>, // None when the contract has no ask quote
    pub open_interest: u64,
    pub in_the_money: bool,
}

impl OptionContract {
    /// Out-of-the-money and quoted on the ask side.
    pub fn is_eligible(&self) -> bool {
        !self.in_the_money && self.ask.is_some()
    }
}

/// Calls and puts of one underlying for a single expiration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionChain {
    pub calls: Vec<OptionContract>,
    pub puts: Vec<OptionContract>,
}

impl OptionChain {
    pub fn eligible_calls(&self) -> Vec<OptionContract> {
        self.calls.iter().filter(|c| c.is_eligible()).cloned().collect()
    }
}

/// Snapshot of one underlying as returned by a market data provider
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateQuote {
    pub price: f64,
    pub beta: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub expirations: ExpirationSet<ExpirationHandle>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract(strike: f64, ask: Option<f64>, in_the_money: bool) -> OptionContract {
        OptionContract { strike, ask, open_interest: 10, in_the_money }
    }

    #[test]
    fn eligible_calls_drop_itm_and_unquoted() {
        let chain = OptionChain {
            calls: vec![
                contract(90.0, Some(12.0), true),
                contract(110.0, None, false),
                contract(120.0, Some(1.5), false),
            ],
            puts: vec![contract(80.0, Some(0.5), false)],
        };
        let eligible = chain.eligible_calls();
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].strike, 120.0);
    }
}
