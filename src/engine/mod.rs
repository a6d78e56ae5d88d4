use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// One simulation's worth of user-supplied figures.
/// All amounts are non-negative; the caller validates before building this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BudgetInput {
    pub(crate) salary: Decimal,
    pub(crate) rent: Decimal,
    pub(crate) groceries: Decimal,
    pub(crate) other_expenses: Decimal,
    pub(crate) current_savings: Decimal,
    pub(crate) goal: String,
}

/// Metrics derived from a [`BudgetInput`]. Recomputed from scratch on every
/// submission; never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BudgetResult {
    pub(crate) total_expenses: Decimal,
    /// Salary minus total expenses. Negative when spending exceeds income.
    pub(crate) monthly_balance: Decimal,
    pub(crate) yearly_savings: Decimal,
    /// Months current savings cover total expenses, assuming no income.
    /// `0` doubles as the sentinel for "expenses are zero".
    pub(crate) survival_months: u64,
    pub(crate) goal: GoalOutlook,
    pub(crate) tips: Vec<Tip>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum GoalOutlook {
    /// The goal string held no digits.
    NoTarget,
    /// Months until the target at the current monthly balance.
    /// Zero or negative means the target is already within savings.
    Estimate { target: Decimal, months: i64 },
    /// Digits were present but the monthly balance is not positive, so the
    /// target can never be reached at the current pace.
    NotReachable { target: Decimal },
}

/// A rule-triggered advisory shown alongside the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tip {
    HighRent,
    LowMonthlySavings,
    NoEmergencyFund,
}

impl Tip {
    pub(crate) fn message(&self) -> &'static str {
        match self {
            Self::HighRent => "Try reducing rent or find a flatmate.",
            Self::LowMonthlySavings => {
                "Very low monthly savings! Reduce other expenses or find side income."
            }
            Self::NoEmergencyFund => "No savings at all! Start an emergency fund ASAP.",
        }
    }
}

impl std::fmt::Display for Tip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Monthly balance below this triggers [`Tip::LowMonthlySavings`].
/// Same currency unit as the inputs.
const LOW_BALANCE_FLOOR: u32 = 2000;

/// Derive every budget metric from one set of inputs. Pure: no I/O, no
/// hidden state, identical inputs give identical outputs.
pub(crate) fn compute(input: &BudgetInput) -> BudgetResult {
    let total_expenses = input.rent + input.groceries + input.other_expenses;
    let monthly_balance = input.salary - total_expenses;
    let yearly_savings = monthly_balance * Decimal::from(12);

    // Guard the zero-expense case rather than erroring on the division.
    let survival_months = if total_expenses.is_zero() {
        0
    } else {
        (input.current_savings / total_expenses)
            .floor()
            .to_u64()
            .unwrap_or(u64::MAX)
    };

    let goal = match extract_goal_amount(&input.goal) {
        None => GoalOutlook::NoTarget,
        Some(target) if monthly_balance > Decimal::ZERO => {
            let months = ((target - input.current_savings) / monthly_balance)
                .floor()
                .to_i64()
                .unwrap_or(i64::MAX);
            GoalOutlook::Estimate { target, months }
        }
        Some(target) => GoalOutlook::NotReachable { target },
    };

    let mut tips = Vec::new();
    if input.rent > input.salary * Decimal::new(4, 1) {
        tips.push(Tip::HighRent);
    }
    if monthly_balance < Decimal::from(LOW_BALANCE_FLOOR) {
        tips.push(Tip::LowMonthlySavings);
    }
    if input.current_savings.is_zero() {
        tips.push(Tip::NoEmergencyFund);
    }

    BudgetResult {
        total_expenses,
        monthly_balance,
        yearly_savings,
        survival_months,
        goal,
        tips,
    }
}

/// Projected savings at the end of each month `1..=months`, assuming the
/// balance stays constant. Feeds the projection chart.
pub(crate) fn savings_projection(
    start: Decimal,
    monthly_balance: Decimal,
    months: u32,
) -> Vec<Decimal> {
    (1..=months)
        .map(|m| start + monthly_balance * Decimal::from(m))
        .collect()
}

static DIGIT_RUNS: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new("[0-9]+").unwrap()
});

/// Pull a target amount out of a free-text goal by concatenating every
/// ASCII digit in original order ("Save ₹2L" → 2, "buy a 1500 bike" → 1500).
/// Crude, but it is the established behavior; suffixes like "L" or "k" are
/// stripped, not expanded. A digit string too long for `Decimal` counts as
/// no target.
fn extract_goal_amount(goal: &str) -> Option<Decimal> {
    let digits: String = DIGIT_RUNS
        .find_iter(goal)
        .map(|m| m.as_str())
        .collect();
    if digits.is_empty() {
        return None;
    }
    Decimal::from_str(&digits).ok()
}

#[cfg(test)]
mod tests;
