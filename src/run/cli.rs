use anyhow::Result;
use rust_decimal::Decimal;

use crate::advisor::AdvisorClient;
use crate::engine::{self, BudgetInput, GoalOutlook};
use crate::ui::util::{format_amount, parse_amount};

pub(crate) fn as_cli(args: &[String]) -> Result<()> {
    match args[1].as_str() {
        "simulate" | "sim" => cli_simulate(&args[2..]),
        "ask" => cli_ask(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("finsim {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("FinSim — financial scenario simulator with an AI advisor");
    println!();
    println!("Usage: finsim [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  simulate [figures]            Print derived budget metrics and tips");
    println!("  ask <question> [figures]      One-shot advisor question (needs GROQ_API_KEY)");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Figures (all optional, default 0):");
    println!("  --salary N      Monthly salary");
    println!("  --rent N        Monthly rent");
    println!("  --groceries N   Groceries & essentials");
    println!("  --other N       Other monthly expenses");
    println!("  --savings N     Current savings");
    println!("  --goal TEXT     Financial goal, may contain a target amount");
}

fn cli_simulate(args: &[String]) -> Result<()> {
    let input = parse_input(args)?;
    let result = engine::compute(&input);

    println!("FinSim — simulation");
    println!("{}", "─".repeat(44));
    println!("  Total Monthly Expenses:    {}", format_amount(result.total_expenses));
    println!("  Monthly Balance:           {}", format_amount(result.monthly_balance));
    println!("  Projected Yearly Savings:  {}", format_amount(result.yearly_savings));
    println!("  Survival Without Income:   {} months", result.survival_months);

    match &result.goal {
        GoalOutlook::NoTarget => {}
        GoalOutlook::Estimate { target, months } if *months > 0 => {
            println!(
                "  Goal of {} reachable in approx {months} months",
                format_amount(*target)
            );
        }
        GoalOutlook::Estimate { target, .. } => {
            println!(
                "  Goal of {} is already within your savings",
                format_amount(*target)
            );
        }
        GoalOutlook::NotReachable { target } => {
            println!(
                "  Goal of {} not reachable at this pace: nothing saved monthly",
                format_amount(*target)
            );
        }
    }

    if !result.tips.is_empty() {
        println!();
        println!("Smart Suggestions:");
        for tip in &result.tips {
            println!("  • {tip}");
        }
    }

    Ok(())
}

fn cli_ask(args: &[String]) -> Result<()> {
    let question = args
        .first()
        .filter(|a| !a.starts_with("--"))
        .ok_or_else(|| anyhow::anyhow!("Usage: finsim ask <question> [figures]"))?;

    let input = parse_input(&args[1..])?;
    let client = AdvisorClient::from_env()?;
    let reply = client.ask(&input, question)?;
    println!("{reply}");
    Ok(())
}

/// Build a [`BudgetInput`] from `--flag value` pairs; omitted figures
/// default to zero, matching the form's empty fields.
fn parse_input(args: &[String]) -> Result<BudgetInput> {
    let amount = |name: &str| -> Result<Decimal> {
        match flag_value(args, name) {
            Some(raw) => parse_amount(raw)
                .ok_or_else(|| anyhow::anyhow!("Invalid amount for {name}: {raw}")),
            None => Ok(Decimal::ZERO),
        }
    };

    Ok(BudgetInput {
        salary: amount("--salary")?,
        rent: amount("--rent")?,
        groceries: amount("--groceries")?,
        other_expenses: amount("--other")?,
        current_savings: amount("--savings")?,
        goal: flag_value(args, "--goal").unwrap_or_default().to_string(),
    })
}

fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use rust_decimal_macros::dec;

    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_flag_value() {
        let a = args(&["--salary", "30000", "--goal", "Save ₹2L"]);
        assert_eq!(flag_value(&a, "--salary"), Some("30000"));
        assert_eq!(flag_value(&a, "--goal"), Some("Save ₹2L"));
        assert_eq!(flag_value(&a, "--rent"), None);
    }

    #[test]
    fn test_parse_input_defaults_to_zero() {
        let input = parse_input(&args(&["--salary", "30000"])).unwrap();
        assert_eq!(input.salary, dec!(30000));
        assert_eq!(input.rent, Decimal::ZERO);
        assert!(input.goal.is_empty());
    }

    #[test]
    fn test_parse_input_rejects_bad_amount() {
        assert!(parse_input(&args(&["--rent", "-500"])).is_err());
        assert!(parse_input(&args(&["--rent", "abc"])).is_err());
    }

    #[test]
    fn test_parse_input_full_set() {
        let input = parse_input(&args(&[
            "--salary",
            "30000",
            "--rent",
            "10000",
            "--groceries",
            "5000",
            "--other",
            "3000",
            "--savings",
            "50000",
            "--goal",
            "Save ₹2L",
        ]))
        .unwrap();
        assert_eq!(input.rent, dec!(10000));
        assert_eq!(input.current_savings, dec!(50000));
        assert_eq!(input.goal, "Save ₹2L");
    }
}
