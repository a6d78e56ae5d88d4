#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn make_input() -> BudgetInput {
    BudgetInput {
        salary: dec!(30000),
        rent: dec!(10000),
        groceries: dec!(5000),
        other_expenses: dec!(3000),
        current_savings: dec!(50000),
        goal: String::new(),
    }
}

// ── Derived metrics ───────────────────────────────────────────

#[test]
fn test_totals_are_exact() {
    let result = compute(&make_input());
    assert_eq!(result.total_expenses, dec!(18000));
    assert_eq!(result.monthly_balance, dec!(12000));
    assert_eq!(result.yearly_savings, dec!(144000));
}

#[test]
fn test_survival_months_truncates() {
    // 50000 / 18000 = 2.77…, floored to 2
    let result = compute(&make_input());
    assert_eq!(result.survival_months, 2);
}

#[test]
fn test_survival_months_zero_expenses_sentinel() {
    let input = BudgetInput {
        rent: Decimal::ZERO,
        groceries: Decimal::ZERO,
        other_expenses: Decimal::ZERO,
        ..make_input()
    };
    let result = compute(&input);
    assert_eq!(result.survival_months, 0);
    assert_eq!(result.monthly_balance, dec!(30000));
}

#[test]
fn test_negative_balance_allowed() {
    let input = BudgetInput {
        salary: dec!(10000),
        ..make_input()
    };
    let result = compute(&input);
    assert_eq!(result.monthly_balance, dec!(-8000));
    assert_eq!(result.yearly_savings, dec!(-96000));
}

#[test]
fn test_fractional_amounts() {
    let input = BudgetInput {
        salary: dec!(1000.50),
        rent: dec!(400.25),
        groceries: dec!(100.10),
        other_expenses: dec!(0.15),
        current_savings: dec!(1001),
        ..make_input()
    };
    let result = compute(&input);
    assert_eq!(result.total_expenses, dec!(500.50));
    assert_eq!(result.monthly_balance, dec!(500.00));
    // 1001 / 500.50 = 2.0 exactly
    assert_eq!(result.survival_months, 2);
}

#[test]
fn test_compute_is_idempotent() {
    let input = BudgetInput {
        goal: "Save ₹2L".into(),
        ..make_input()
    };
    assert_eq!(compute(&input), compute(&input));
}

// ── Goal outlook ──────────────────────────────────────────────

#[test]
fn test_goal_digits_stripped_of_units() {
    // "Save ₹2L" yields target 2: the "L" suffix is stripped, not expanded.
    // (2 - 50000) / 12000 = -4.16…, floored to -5.
    let input = BudgetInput {
        goal: "Save ₹2L".into(),
        ..make_input()
    };
    let result = compute(&input);
    assert_eq!(
        result.goal,
        GoalOutlook::Estimate {
            target: dec!(2),
            months: -5
        }
    );
}

#[test]
fn test_goal_months_positive() {
    // (200000 - 50000) / 12000 = 12.5, floored to 12
    let input = BudgetInput {
        goal: "save 200000 for a car".into(),
        ..make_input()
    };
    let result = compute(&input);
    assert_eq!(
        result.goal,
        GoalOutlook::Estimate {
            target: dec!(200000),
            months: 12
        }
    );
}

#[test]
fn test_goal_digits_concatenated_across_words() {
    let input = BudgetInput {
        goal: "1 bike, 500 helmet".into(),
        ..make_input()
    };
    let result = compute(&input);
    match result.goal {
        GoalOutlook::Estimate { target, .. } => assert_eq!(target, dec!(1500)),
        other => panic!("expected estimate, got {other:?}"),
    }
}

#[test]
fn test_goal_without_digits_is_no_target() {
    let input = BudgetInput {
        goal: "buy a bike".into(),
        ..make_input()
    };
    assert_eq!(compute(&input).goal, GoalOutlook::NoTarget);
}

#[test]
fn test_empty_goal_is_no_target() {
    assert_eq!(compute(&make_input()).goal, GoalOutlook::NoTarget);
}

#[test]
fn test_goal_unreachable_on_zero_balance() {
    let input = BudgetInput {
        salary: dec!(18000),
        goal: "save 200000".into(),
        ..make_input()
    };
    let result = compute(&input);
    assert_eq!(result.monthly_balance, Decimal::ZERO);
    assert_eq!(
        result.goal,
        GoalOutlook::NotReachable {
            target: dec!(200000)
        }
    );
}

#[test]
fn test_goal_unreachable_on_negative_balance() {
    let input = BudgetInput {
        salary: dec!(5000),
        goal: "save 200000".into(),
        ..make_input()
    };
    assert_eq!(
        compute(&input).goal,
        GoalOutlook::NotReachable {
            target: dec!(200000)
        }
    );
}

#[test]
fn test_goal_digit_overflow_is_no_target() {
    let input = BudgetInput {
        goal: "9".repeat(40),
        ..make_input()
    };
    assert_eq!(compute(&input).goal, GoalOutlook::NoTarget);
}

// ── Tips ──────────────────────────────────────────────────────

#[test]
fn test_no_tips_for_healthy_budget() {
    assert!(compute(&make_input()).tips.is_empty());
}

#[test]
fn test_high_rent_tip_is_strict() {
    // Exactly 40% of salary does not fire.
    let at_boundary = BudgetInput {
        rent: dec!(12000),
        ..make_input()
    };
    assert!(!compute(&at_boundary).tips.contains(&Tip::HighRent));

    let over = BudgetInput {
        rent: dec!(12000.01),
        ..make_input()
    };
    assert!(compute(&over).tips.contains(&Tip::HighRent));
}

#[test]
fn test_low_balance_tip() {
    let input = BudgetInput {
        salary: dec!(19999),
        ..make_input()
    };
    let result = compute(&input);
    assert_eq!(result.monthly_balance, dec!(1999));
    assert!(result.tips.contains(&Tip::LowMonthlySavings));

    let input = BudgetInput {
        salary: dec!(20000),
        ..make_input()
    };
    // Balance of exactly 2000 does not fire.
    assert!(!compute(&input).tips.contains(&Tip::LowMonthlySavings));
}

#[test]
fn test_no_emergency_fund_tip_is_independent() {
    let input = BudgetInput {
        current_savings: Decimal::ZERO,
        ..make_input()
    };
    let result = compute(&input);
    assert_eq!(result.tips, vec![Tip::NoEmergencyFund]);
}

#[test]
fn test_tips_keep_listed_order() {
    let input = BudgetInput {
        salary: dec!(10000),
        rent: dec!(9000),
        current_savings: Decimal::ZERO,
        ..make_input()
    };
    assert_eq!(
        compute(&input).tips,
        vec![Tip::HighRent, Tip::LowMonthlySavings, Tip::NoEmergencyFund]
    );
}

// ── Projection ────────────────────────────────────────────────

#[test]
fn test_savings_projection() {
    let proj = savings_projection(dec!(50000), dec!(12000), 3);
    assert_eq!(proj, vec![dec!(62000), dec!(74000), dec!(86000)]);
}

#[test]
fn test_savings_projection_negative_balance() {
    let proj = savings_projection(dec!(1000), dec!(-600), 3);
    assert_eq!(proj, vec![dec!(400), dec!(-200), dec!(-800)]);
}

#[test]
fn test_savings_projection_zero_months() {
    assert!(savings_projection(dec!(1000), dec!(100), 0).is_empty());
}
