//! HTML for the trip summary, spending by person and contributor balances.

use maud::{Markup, html};

use crate::{
    balance::{ContributorBalance, TripSummary},
    html::{
        BADGE_STYLE, CARD_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        format_currency,
    },
};

/// Balances within half a cent of zero are shown as settled.
const SETTLED_TOLERANCE: f64 = 0.005;

#[derive(Debug, PartialEq)]
enum BalanceStatus {
    Owed,
    Owes,
    Settled,
}

impl BalanceStatus {
    fn from_balance(balance: f64) -> Self {
        if balance >= SETTLED_TOLERANCE {
            Self::Owed
        } else if balance <= -SETTLED_TOLERANCE {
            Self::Owes
        } else {
            Self::Settled
        }
    }

    fn text_style(&self) -> &'static str {
        match self {
            Self::Owed => "text-green-600 dark:text-green-400",
            Self::Owes => "text-red-600 dark:text-red-400",
            Self::Settled => "text-gray-500 dark:text-gray-400",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Owed => "is owed",
            Self::Owes => "owes",
            Self::Settled => "settled up",
        }
    }
}

/// Format a balance with an explicit plus sign for positive amounts, e.g. "+$25.00".
pub fn format_balance(balance: f64) -> String {
    match BalanceStatus::from_balance(balance) {
        BalanceStatus::Owed => format!("+{}", format_currency(balance)),
        BalanceStatus::Owes => format_currency(balance),
        BalanceStatus::Settled => format_currency(0.0),
    }
}

/// Cards with the total spent, the number of expenses and the number of contributors.
pub fn summary_cards_view(summary: &TripSummary) -> Markup {
    let card = |title: &str, value: String, id: &str| {
        html!(
            div class=(CARD_STYLE)
            {
                p class="text-sm text-gray-500 dark:text-gray-400" { (title) }
                p id=(id) class="text-2xl font-bold tabular-nums" { (value) }
            }
        )
    };

    html!(
        section class="grid grid-cols-1 gap-4 sm:grid-cols-3 w-full"
        {
            (card("Total Spent", format_currency(summary.total_expenses), "total-spent"))
            (card("Expenses", summary.expense_count.to_string(), "expense-count"))
            (card("Contributors", summary.contributor_count.to_string(), "contributor-count"))
        }
    )
}

/// How much each contributor has paid, biggest spender first.
pub fn spending_by_person_view(summary: &TripSummary) -> Markup {
    html!(
        section class=(CARD_STYLE)
        {
            h2 class="text-lg font-semibold mb-2" { "Spending by Person" }

            @if summary.spending_by_person.is_empty() {
                p class="text-gray-500 dark:text-gray-400" { "No expenses yet" }
            } @else {
                ul id="spending-by-person" class="space-y-2"
                {
                    @for person in &summary.spending_by_person {
                        li class="flex justify-between gap-4"
                        {
                            span
                            {
                                span class=(BADGE_STYLE) { (person.contributor.name) }
                                span class="ml-2 text-sm text-gray-500 dark:text-gray-400"
                                {
                                    (person.expense_count)
                                    @if person.expense_count == 1 { " expense" } @else { " expenses" }
                                }
                            }
                            span class="tabular-nums" { (format_currency(person.total_paid)) }
                        }
                    }
                }
            }
        }
    )
}

/// A table of contributor balances sorted from most owed to most owing.
pub fn balances_view(balances: &[ContributorBalance], average_per_person: f64) -> Markup {
    let mut sorted = balances.iter().collect::<Vec<_>>();
    sorted.sort_by(|a, b| b.balance.total_cmp(&a.balance));

    html!(
        section class=(CARD_STYLE)
        {
            header class="flex justify-between flex-wrap items-end mb-2"
            {
                h2 class="text-lg font-semibold" { "Balances" }

                @if !sorted.is_empty() {
                    p class="text-sm text-gray-500 dark:text-gray-400"
                    {
                        "Even share: " (format_currency(average_per_person)) " each"
                    }
                }
            }

            @if sorted.is_empty() {
                p class="text-gray-500 dark:text-gray-400" { "No contributors yet" }
            } @else {
                table id="balances" class="w-full text-sm text-left rtl:text-right"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Contributor" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Paid" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Balance" }
                        }
                    }

                    tbody
                    {
                        @for balance in sorted {
                            @let status = BalanceStatus::from_balance(balance.balance);

                            tr class=(TABLE_ROW_STYLE) data-contributor-id=(balance.contributor.id)
                            {
                                td class=(TABLE_CELL_STYLE) { (balance.contributor.name) }
                                td class={ (TABLE_CELL_STYLE) " tabular-nums" }
                                {
                                    (format_currency(balance.total_paid))
                                }
                                td class={ (TABLE_CELL_STYLE) " tabular-nums " (status.text_style()) }
                                {
                                    (format_balance(balance.balance))
                                    span class="ml-2 text-xs" { (status.label()) }
                                }
                            }
                        }
                    }
                }
            }
        }
    )
}
