//! Works out who is owed money and who owes money on a trip.
//!
//! Spending is split evenly between everyone on the trip. A contributor's
//! balance is how much they paid minus their share, so a positive balance
//! means the contributor is owed money and a negative balance means they owe
//! money.

use std::collections::HashMap;

use serde::Serialize;

use crate::{
    contributor::{Contributor, ContributorId},
    expense::Expense,
};

/// How much a contributor paid and how far that is from an even share.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContributorBalance {
    pub contributor: Contributor,
    /// The sum of the expenses this contributor paid for.
    pub total_paid: f64,
    /// `total_paid` minus the average spend per person.
    pub balance: f64,
}

/// The total a contributor paid across their expenses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonSpending {
    pub contributor: Contributor,
    pub total_paid: f64,
    pub expense_count: usize,
}

/// The headline figures for a trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripSummary {
    pub total_expenses: f64,
    pub average_per_person: f64,
    pub expense_count: usize,
    pub contributor_count: usize,
    /// Contributors that paid for at least one expense, biggest spender first.
    pub spending_by_person: Vec<PersonSpending>,
}

#[derive(Debug, Default, Clone, Copy)]
struct PaidTotal {
    amount: f64,
    expense_count: usize,
}

/// Amounts that are NaN or infinite do not count towards any total.
fn countable_amount(amount: f64) -> f64 {
    if amount.is_finite() { amount } else { 0.0 }
}

fn total_expenses(expenses: &[Expense]) -> f64 {
    expenses
        .iter()
        .map(|expense| countable_amount(expense.amount))
        .sum()
}

/// The even share of `total` for each contributor.
///
/// A trip with no contributors divides by one so the average is never NaN.
fn average_per_person(total: f64, contributor_count: usize) -> f64 {
    total / contributor_count.max(1) as f64
}

fn paid_totals(expenses: &[Expense]) -> HashMap<ContributorId, PaidTotal> {
    let mut totals: HashMap<ContributorId, PaidTotal> = HashMap::new();

    for expense in expenses {
        let total = totals.entry(expense.paid_by_contributor_id).or_default();
        total.amount += countable_amount(expense.amount);
        total.expense_count += 1;
    }

    totals
}

/// Calculate the balance of each contributor of a trip.
///
/// The result has one entry per contributor in the same order as
/// `contributors`. Expenses paid by someone not in `contributors` still count
/// towards the trip total. With no contributors the result is empty.
pub fn calculate_balances(
    contributors: &[Contributor],
    expenses: &[Expense],
) -> Vec<ContributorBalance> {
    let average = average_per_person(total_expenses(expenses), contributors.len());
    let totals = paid_totals(expenses);

    contributors
        .iter()
        .map(|contributor| {
            let total_paid = totals
                .get(&contributor.id)
                .map(|total| total.amount)
                .unwrap_or(0.0);

            ContributorBalance {
                contributor: contributor.clone(),
                total_paid,
                balance: total_paid - average,
            }
        })
        .collect()
}

/// Summarise the spending on a trip.
pub fn summarize_trip(contributors: &[Contributor], expenses: &[Expense]) -> TripSummary {
    let total = total_expenses(expenses);
    let totals = paid_totals(expenses);

    let mut spending_by_person = contributors
        .iter()
        .filter_map(|contributor| {
            totals.get(&contributor.id).map(|total| PersonSpending {
                contributor: contributor.clone(),
                total_paid: total.amount,
                expense_count: total.expense_count,
            })
        })
        .collect::<Vec<_>>();
    spending_by_person.sort_by(|a, b| b.total_paid.total_cmp(&a.total_paid));

    TripSummary {
        total_expenses: total,
        average_per_person: average_per_person(total, contributors.len()),
        expense_count: expenses.len(),
        contributor_count: contributors.len(),
        spending_by_person,
    }
}

#[cfg(test)]
pub(crate) mod test_helpers {
    use time::macros::datetime;

    use crate::{
        contributor::{Contributor, ContributorId, ContributorName},
        expense::Expense,
        identity::UserName,
    };

    pub(crate) fn contributor(id: ContributorId, name: &str) -> Contributor {
        Contributor {
            id,
            trip_id: 1,
            name: ContributorName::new_unchecked(name),
            email: None,
            user_id: None,
            created_at: datetime!(2025-01-01 00:00 UTC),
        }
    }

    pub(crate) fn expense(id: i64, amount: f64, paid_by: ContributorId) -> Expense {
        Expense {
            id,
            trip_id: 1,
            amount,
            description: format!("Expense {id}"),
            paid_by_contributor_id: paid_by,
            created_by: UserName::new("alice"),
            created_at: datetime!(2025-01-01 00:00 UTC),
            updated_at: datetime!(2025-01-01 00:00 UTC),
        }
    }
}

#[cfg(test)]
mod calculate_balances_tests {
    use super::{
        calculate_balances,
        test_helpers::{contributor, expense},
    };

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn two_contributors_uneven_spending() {
        let contributors = vec![contributor(1, "A"), contributor(2, "B")];
        let expenses = vec![expense(1, 100.0, 1), expense(2, 50.0, 2)];

        let balances = calculate_balances(&contributors, &expenses);

        assert_eq!(balances.len(), 2);
        assert_eq!(balances[0].contributor, contributors[0]);
        assert_eq!(balances[0].total_paid, 100.0);
        assert_eq!(balances[0].balance, 25.0);
        assert_eq!(balances[1].contributor, contributors[1]);
        assert_eq!(balances[1].total_paid, 50.0);
        assert_eq!(balances[1].balance, -25.0);
    }

    #[test]
    fn no_expenses_gives_zero_balances() {
        let contributors = vec![contributor(1, "A"), contributor(2, "B"), contributor(3, "C")];

        let balances = calculate_balances(&contributors, &[]);

        assert_eq!(balances.len(), 3);
        for balance in balances {
            assert_eq!(balance.total_paid, 0.0);
            assert_eq!(balance.balance, 0.0);
        }
    }

    #[test]
    fn no_contributors_gives_empty_result() {
        let balances = calculate_balances(&[], &[expense(1, 40.0, 1)]);

        assert!(balances.is_empty());
    }

    #[test]
    fn single_contributor_has_zero_balance() {
        let contributors = vec![contributor(1, "A")];
        let expenses = vec![expense(1, 12.34, 1), expense(2, 56.78, 1)];

        let balances = calculate_balances(&contributors, &expenses);

        assert_eq!(balances.len(), 1);
        assert!((balances[0].total_paid - 69.12).abs() < TOLERANCE);
        assert!(balances[0].balance.abs() < TOLERANCE);
    }

    #[test]
    fn total_paid_only_counts_own_expenses() {
        let contributors = vec![contributor(1, "A"), contributor(2, "B"), contributor(3, "C")];
        let expenses = vec![
            expense(1, 10.0, 1),
            expense(2, 20.0, 2),
            expense(3, 30.0, 1),
            expense(4, 5.0, 2),
        ];

        let balances = calculate_balances(&contributors, &expenses);

        assert_eq!(balances[0].total_paid, 40.0);
        assert_eq!(balances[1].total_paid, 25.0);
        assert_eq!(balances[2].total_paid, 0.0);
    }

    #[test]
    fn balances_sum_to_zero() {
        let contributors = vec![
            contributor(1, "A"),
            contributor(2, "B"),
            contributor(3, "C"),
            contributor(4, "D"),
        ];
        let expenses = vec![
            expense(1, 10.01, 1),
            expense(2, 0.03, 2),
            expense(3, 333.33, 3),
            expense(4, 7.77, 1),
            expense(5, 1.0, 3),
        ];

        let balances = calculate_balances(&contributors, &expenses);
        let sum: f64 = balances.iter().map(|balance| balance.balance).sum();

        assert!(sum.abs() < TOLERANCE, "balances summed to {sum}");
    }

    #[test]
    fn non_finite_amounts_count_as_zero() {
        let contributors = vec![contributor(1, "A"), contributor(2, "B")];
        let expenses = vec![
            expense(1, f64::NAN, 1),
            expense(2, f64::INFINITY, 2),
            expense(3, 20.0, 1),
        ];

        let balances = calculate_balances(&contributors, &expenses);

        assert_eq!(balances[0].total_paid, 20.0);
        assert_eq!(balances[0].balance, 10.0);
        assert_eq!(balances[1].total_paid, 0.0);
        assert_eq!(balances[1].balance, -10.0);
    }

    #[test]
    fn expenses_of_unknown_contributors_count_towards_average() {
        let contributors = vec![contributor(1, "A"), contributor(2, "B")];
        let expenses = vec![expense(1, 30.0, 1), expense(2, 30.0, 99)];

        let balances = calculate_balances(&contributors, &expenses);

        assert_eq!(balances[0].balance, 0.0);
        assert_eq!(balances[1].balance, -30.0);
    }

    #[test]
    fn preserves_contributor_order() {
        let contributors = vec![contributor(3, "C"), contributor(1, "A"), contributor(2, "B")];
        let expenses = vec![expense(1, 90.0, 1)];

        let balances = calculate_balances(&contributors, &expenses);

        let ids = balances
            .iter()
            .map(|balance| balance.contributor.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
