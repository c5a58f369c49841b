//! Economic order quantity: the order size minimizing combined
//! ordering and holding cost.

use serde::{Deserialize, Serialize};

use stocksense_core::stats;

/// Inputs for the classical EOQ formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EoqInput {
    pub annual_demand: f64,
    /// Cost of placing one order.
    pub ordering_cost: f64,
    /// Annual holding cost per unit (unit price × holding rate).
    pub holding_cost_per_unit: f64,
}

/// EOQ with its derived cadence and cost breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EoqResult {
    /// Whole units, rounded up.
    pub eoq: i64,
    pub orders_per_year: f64,
    pub order_cycle_days: i64,
    pub annual_ordering_cost: f64,
    pub annual_holding_cost: f64,
    pub total_annual_cost: f64,
}

impl EoqResult {
    fn zero() -> Self {
        Self {
            eoq: 0,
            orders_per_year: 0.0,
            order_cycle_days: 0,
            annual_ordering_cost: 0.0,
            annual_holding_cost: 0.0,
            total_annual_cost: 0.0,
        }
    }
}

/// `EOQ = ceil(√(2·D·S / H))`.
///
/// Any non-positive input zeroes the whole result instead of propagating a
/// division error; missing cost data is a normal condition for new
/// products. At the optimum the ordering and holding components are
/// approximately equal, which makes a convenient test invariant.
pub fn calculate_eoq(input: EoqInput) -> EoqResult {
    let EoqInput {
        annual_demand,
        ordering_cost,
        holding_cost_per_unit,
    } = input;

    if annual_demand <= 0.0 || ordering_cost <= 0.0 || holding_cost_per_unit <= 0.0 {
        return EoqResult::zero();
    }

    let eoq = ((2.0 * annual_demand * ordering_cost) / holding_cost_per_unit)
        .sqrt()
        .ceil();

    let orders_per_year = annual_demand / eoq;
    let order_cycle_days = (365.0 / orders_per_year).round() as i64;
    let annual_ordering_cost = orders_per_year * ordering_cost;
    let annual_holding_cost = (eoq / 2.0) * holding_cost_per_unit;
    let total_annual_cost = annual_ordering_cost + annual_holding_cost;

    EoqResult {
        eoq: eoq as i64,
        orders_per_year: stats::round2(orders_per_year),
        order_cycle_days,
        annual_ordering_cost: annual_ordering_cost.round(),
        annual_holding_cost: annual_holding_cost.round(),
        total_annual_cost: total_annual_cost.round(),
    }
}

/// Inputs for the annual holding cost per unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoldingCostInput {
    pub unit_price: f64,
    /// Annual capital/obsolescence rate; defaults to 0.25.
    pub holding_rate: Option<f64>,
    /// Warehouse cost per unit per month.
    pub monthly_storage_cost: Option<f64>,
    /// Insurance per unit per year.
    pub annual_insurance_cost: Option<f64>,
    pub other_annual_cost: Option<f64>,
}

/// `holding = price × rate + storage + insurance + other`.
pub fn holding_cost(input: HoldingCostInput) -> f64 {
    let capital = input.unit_price * input.holding_rate.unwrap_or(0.25);
    let storage = input.monthly_storage_cost.unwrap_or(0.0) * 12.0;
    capital
        + storage
        + input.annual_insurance_cost.unwrap_or(0.0)
        + input.other_annual_cost.unwrap_or(0.0)
}

/// Cost penalty of ordering a quantity other than the EOQ.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderQuantityCostComparison {
    pub actual_annual_cost: f64,
    pub cost_difference: f64,
    pub cost_increase_percent: f64,
}

/// Compare the annual cost of an actual order quantity against the optimum.
pub fn compare_order_quantity_cost(
    optimum: &EoqResult,
    actual_quantity: i64,
    annual_demand: f64,
    ordering_cost: f64,
    holding_cost_per_unit: f64,
) -> OrderQuantityCostComparison {
    if actual_quantity <= 0 {
        return OrderQuantityCostComparison {
            actual_annual_cost: 0.0,
            cost_difference: 0.0,
            cost_increase_percent: 0.0,
        };
    }

    let orders_per_year = annual_demand / actual_quantity as f64;
    let actual_annual_cost =
        orders_per_year * ordering_cost + (actual_quantity as f64 / 2.0) * holding_cost_per_unit;
    let cost_difference = actual_annual_cost - optimum.total_annual_cost;
    let cost_increase_percent = if optimum.total_annual_cost > 0.0 {
        cost_difference / optimum.total_annual_cost * 100.0
    } else {
        0.0
    };

    OrderQuantityCostComparison {
        actual_annual_cost: actual_annual_cost.round(),
        cost_difference: cost_difference.round(),
        cost_increase_percent: stats::round2(cost_increase_percent),
    }
}

/// One quantity-discount bracket offered by a supplier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountBracket {
    pub min_quantity: i64,
    pub discounted_price: f64,
}

/// Selected bracket under quantity discounts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountedEoq {
    pub optimal_quantity: i64,
    pub optimal_price: f64,
    /// Purchase + ordering + holding, rounded.
    pub total_annual_cost: f64,
}

/// EOQ under a quantity-discount schedule.
///
/// For each bracket: compute the classical EOQ at that bracket's holding
/// cost (`price × holding_rate`), raise it to the bracket minimum if the
/// unconstrained EOQ falls below it, then evaluate total annual cost
/// (purchase + ordering + holding) and take the global minimum.
pub fn calculate_eoq_with_discounts(
    annual_demand: f64,
    ordering_cost: f64,
    holding_rate: f64,
    brackets: &[DiscountBracket],
) -> DiscountedEoq {
    let mut best = DiscountedEoq {
        optimal_quantity: 0,
        optimal_price: brackets.first().map(|b| b.discounted_price).unwrap_or(0.0),
        total_annual_cost: f64::INFINITY,
    };

    for bracket in brackets {
        let holding = bracket.discounted_price * holding_rate;
        let eoq = calculate_eoq(EoqInput {
            annual_demand,
            ordering_cost,
            holding_cost_per_unit: holding,
        });

        let quantity = eoq.eoq.max(bracket.min_quantity);
        if quantity <= 0 {
            continue;
        }

        let purchase = annual_demand * bracket.discounted_price;
        let ordering = annual_demand / quantity as f64 * ordering_cost;
        let hold = quantity as f64 / 2.0 * holding;
        let total = purchase + ordering + hold;

        if total < best.total_annual_cost {
            best = DiscountedEoq {
                optimal_quantity: quantity,
                optimal_price: bracket.discounted_price,
                total_annual_cost: total.round(),
            };
        }
    }

    if !best.total_annual_cost.is_finite() {
        best.total_annual_cost = 0.0;
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn textbook_eoq() {
        // D=1200, S=50, H=3 → √40000 = 200.
        let result = calculate_eoq(EoqInput {
            annual_demand: 1200.0,
            ordering_cost: 50.0,
            holding_cost_per_unit: 3.0,
        });
        assert_eq!(result.eoq, 200);
        assert_eq!(result.orders_per_year, 6.0);
        assert_eq!(result.order_cycle_days, 61);
        assert_eq!(result.annual_ordering_cost, 300.0);
        assert_eq!(result.annual_holding_cost, 300.0);
        assert_eq!(result.total_annual_cost, 600.0);
    }

    #[test]
    fn zero_inputs_zero_everything() {
        for input in [
            EoqInput { annual_demand: 0.0, ordering_cost: 50.0, holding_cost_per_unit: 3.0 },
            EoqInput { annual_demand: 1200.0, ordering_cost: 0.0, holding_cost_per_unit: 3.0 },
            EoqInput { annual_demand: 1200.0, ordering_cost: 50.0, holding_cost_per_unit: 0.0 },
        ] {
            let result = calculate_eoq(input);
            assert_eq!(result.eoq, 0);
            assert_eq!(result.total_annual_cost, 0.0);
        }
    }

    #[test]
    fn holding_cost_composes_components() {
        let cost = holding_cost(HoldingCostInput {
            unit_price: 100.0,
            holding_rate: Some(0.25),
            monthly_storage_cost: Some(1.0),
            annual_insurance_cost: Some(3.0),
            other_annual_cost: None,
        });
        assert_eq!(cost, 25.0 + 12.0 + 3.0);
    }

    #[test]
    fn ordering_above_eoq_costs_more() {
        let optimum = calculate_eoq(EoqInput {
            annual_demand: 1200.0,
            ordering_cost: 50.0,
            holding_cost_per_unit: 3.0,
        });
        let comparison = compare_order_quantity_cost(&optimum, 400, 1200.0, 50.0, 3.0);
        assert!(comparison.cost_difference > 0.0);
        assert!(comparison.cost_increase_percent > 0.0);
    }

    #[test]
    fn discount_schedule_picks_global_minimum() {
        // Large bracket wins: the unit-price saving dwarfs the extra holding.
        let brackets = [
            DiscountBracket { min_quantity: 0, discounted_price: 10.0 },
            DiscountBracket { min_quantity: 500, discounted_price: 9.0 },
        ];
        let result = calculate_eoq_with_discounts(10_000.0, 50.0, 0.25, &brackets);
        assert_eq!(result.optimal_price, 9.0);
        assert!(result.optimal_quantity >= 500);
    }

    #[test]
    fn bracket_minimum_constrains_the_quantity() {
        let brackets = [DiscountBracket { min_quantity: 1000, discounted_price: 10.0 }];
        let result = calculate_eoq_with_discounts(1200.0, 50.0, 0.25, &brackets);
        assert_eq!(result.optimal_quantity, 1000);
    }

    #[test]
    fn empty_schedule_yields_zero() {
        let result = calculate_eoq_with_discounts(1200.0, 50.0, 0.25, &[]);
        assert_eq!(result.optimal_quantity, 0);
        assert_eq!(result.total_annual_cost, 0.0);
    }

    proptest! {
        /// The cost breakdown stays internally consistent and no other
        /// quantity beats the chosen EOQ.
        #[test]
        fn eoq_minimizes_annual_cost(
            demand in 1.0f64..1e6,
            ordering in 0.5f64..1e4,
            holding in 0.1f64..1e3,
        ) {
            let result = calculate_eoq(EoqInput {
                annual_demand: demand,
                ordering_cost: ordering,
                holding_cost_per_unit: holding,
            });
            prop_assert!(result.eoq > 0);
            // Components and total are rounded independently.
            prop_assert!(
                (result.total_annual_cost
                    - (result.annual_ordering_cost + result.annual_holding_cost))
                    .abs()
                    <= 1.5
            );

            // Cost is convex with its minimum at or just below the ceiled
            // EOQ, so every larger quantity must cost at least as much.
            let cost_at = |q: f64| demand / q * ordering + q / 2.0 * holding;
            let at_eoq = cost_at(result.eoq as f64);
            for factor in [2, 4, 10] {
                prop_assert!(at_eoq <= cost_at((result.eoq * factor) as f64) + 1e-6);
            }
        }
    }
}
