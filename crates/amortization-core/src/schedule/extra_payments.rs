use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{Money, Period};

/// Sparse map of period -> extra principal requested for that period.
///
/// Absent periods default to zero. Serialises as a JSON object keyed by period
/// number, e.g. `{"1": "1200", "12": "500"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtraPayments(BTreeMap<Period, Money>);

impl ExtraPayments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the extra amount for `period`, replacing any previous value.
    pub fn insert(&mut self, period: Period, amount: Money) -> Option<Money> {
        self.0.insert(period, amount)
    }

    /// Requested extra for `period`, zero when none was scheduled.
    pub fn get(&self, period: Period) -> Money {
        self.0.get(&period).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in ascending period order.
    pub fn iter(&self) -> impl Iterator<Item = (Period, Money)> + '_ {
        self.0.iter().map(|(p, a)| (*p, *a))
    }

    /// Sum of every requested amount, applied or not.
    pub fn total_requested(&self) -> Money {
        self.0.values().copied().sum()
    }
}

impl FromIterator<(Period, Money)> for ExtraPayments {
    fn from_iter<I: IntoIterator<Item = (Period, Money)>>(iter: I) -> Self {
        ExtraPayments(iter.into_iter().collect())
    }
}

impl From<BTreeMap<Period, Money>> for ExtraPayments {
    fn from(map: BTreeMap<Period, Money>) -> Self {
        ExtraPayments(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_absent_period_is_zero() {
        let extras: ExtraPayments = [(3, dec!(500))].into_iter().collect();
        assert_eq!(extras.get(3), dec!(500));
        assert_eq!(extras.get(1), Decimal::ZERO);
        assert_eq!(extras.get(4), Decimal::ZERO);
    }

    #[test]
    fn test_insert_replaces() {
        let mut extras = ExtraPayments::new();
        assert!(extras.insert(2, dec!(100)).is_none());
        assert_eq!(extras.insert(2, dec!(250)), Some(dec!(100)));
        assert_eq!(extras.len(), 1);
        assert_eq!(extras.get(2), dec!(250));
    }

    #[test]
    fn test_iter_is_period_ordered() {
        let extras: ExtraPayments = [(12, dec!(1)), (1, dec!(2)), (6, dec!(3))]
            .into_iter()
            .collect();
        let periods: Vec<Period> = extras.iter().map(|(p, _)| p).collect();
        assert_eq!(periods, vec![1, 6, 12]);
        assert_eq!(extras.total_requested(), dec!(6));
    }

    #[test]
    fn test_json_object_keyed_by_period() {
        let extras: ExtraPayments =
            serde_json::from_str(r#"{"1": "1200", "12": 500.5}"#).unwrap();
        assert_eq!(extras.get(1), dec!(1200));
        assert_eq!(extras.get(12), dec!(500.5));

        let json = serde_json::to_value(&extras).unwrap();
        assert_eq!(json["1"], "1200");
    }
}
