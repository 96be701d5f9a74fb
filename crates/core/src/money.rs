//! Profit arithmetic over decimal money values.
//!
//! `cost` is what the advertiser pays for a placement, `blogger_fee` is what
//! the blogger takes; profit is the difference. All sums over empty sets are
//! zero, never an error.

use rust_decimal::Decimal;

/// Profit of a single order: `cost - blogger_fee`.
#[must_use]
pub fn order_profit(cost: Decimal, blogger_fee: Decimal) -> Decimal {
    cost - blogger_fee
}

/// Profit of a project: the sum of `cost - blogger_fee` over its orders.
///
/// A project with zero orders has profit zero.
#[must_use]
pub fn project_profit<I>(orders: I) -> Decimal
where
    I: IntoIterator<Item = (Decimal, Decimal)>,
{
    orders
        .into_iter()
        .map(|(cost, fee)| order_profit(cost, fee))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_order_profit() {
        assert_eq!(order_profit(dec!(100), dec!(20)), dec!(80));
        assert_eq!(order_profit(dec!(50), dec!(50)), dec!(0));
        assert_eq!(order_profit(dec!(0), dec!(0)), dec!(0));
    }

    #[test]
    fn test_project_profit_is_additive() {
        let orders = vec![(dec!(100), dec!(20)), (dec!(50), dec!(50))];
        assert_eq!(project_profit(orders), dec!(80));
    }

    #[test]
    fn test_project_profit_order_independent() {
        let forward = vec![(dec!(100), dec!(20)), (dec!(50), dec!(50))];
        let reversed = vec![(dec!(50), dec!(50)), (dec!(100), dec!(20))];
        assert_eq!(project_profit(forward), project_profit(reversed));
    }

    #[test]
    fn test_project_with_no_orders_has_zero_profit() {
        assert_eq!(project_profit(std::iter::empty()), dec!(0));
    }
}
