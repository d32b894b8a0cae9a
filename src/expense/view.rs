//! HTML for the expense form and the list of a trip's expenses.

use std::collections::HashMap;

use maud::{Markup, html};
use time::UtcOffset;

use crate::{
    contributor::{Contributor, ContributorId},
    endpoints,
    expense::Expense,
    html::{
        BADGE_STYLE, BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        edit_delete_action_links, format_currency, format_date_time, loading_spinner,
    },
    trip::TripId,
};

/// The values to pre-fill the expense form with.
#[derive(Debug, Default)]
pub struct ExpenseFormValues<'a> {
    pub amount: Option<f64>,
    pub description: &'a str,
    pub paid_by: Option<ContributorId>,
}

/// The amount, description and payer inputs shared by the new and edit expense forms.
///
/// The payer is picked from `contributors`, or typed into the new contributor
/// input when "New contributor" is selected.
pub fn expense_form_fields(contributors: &[Contributor], values: &ExpenseFormValues) -> Markup {
    let amount = values.amount.map(|amount| format!("{amount:.2}"));

    html! {
        div
        {
            label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

            // w-full needed to ensure input takes the full width when prefilled with a value
            div class="input-wrapper w-full"
            {
                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="0.01"
                    min="0"
                    placeholder="0.00"
                    value=[amount]
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        div
        {
            label for="description" class=(FORM_LABEL_STYLE) { "Description" }

            input
                name="description"
                id="description"
                type="text"
                placeholder="e.g. Fuel, groceries, ski passes"
                value=(values.description)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="paid_by" class=(FORM_LABEL_STYLE) { "Paid By" }

            select
                name="paid_by"
                id="paid_by"
                data-new-contributor-toggle
                class=(FORM_TEXT_INPUT_STYLE)
            {
                @for contributor in contributors {
                    option
                        value=(contributor.id)
                        selected[values.paid_by == Some(contributor.id)]
                    {
                        (contributor.name)
                    }
                }

                option value="" selected[values.paid_by.is_none()] { "New contributor..." }
            }
        }

        div data-new-contributor-field hidden[values.paid_by.is_some()]
        {
            label for="new_contributor_name" class=(FORM_LABEL_STYLE) { "New Contributor Name" }

            input
                name="new_contributor_name"
                id="new_contributor_name"
                type="text"
                placeholder="Who paid?"
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

/// The form for adding an expense to a trip.
pub fn new_expense_form_view(trip_id: TripId, contributors: &[Contributor]) -> Markup {
    let values = ExpenseFormValues {
        paid_by: contributors.first().map(|contributor| contributor.id),
        ..Default::default()
    };

    html! {
        section class=(CARD_STYLE)
        {
            form
                hx-post=(endpoints::format_endpoint(endpoints::POST_EXPENSE, trip_id))
                hx-target-error="#alert-container"
                class="w-full space-y-4"
            {
                h2 class="text-lg font-semibold" { "Add Expense" }

                (expense_form_fields(contributors, &values))

                button type="submit" class=(BUTTON_PRIMARY_STYLE)
                {
                    span id="indicator" class="inline htmx-indicator" { (loading_spinner()) }
                    " Add Expense"
                }
            }
        }
    }
}

/// The trip's expenses, newest first, with who paid and when.
pub fn expense_list_view(
    expenses: &[Expense],
    contributors: &[Contributor],
    local_offset: UtcOffset,
) -> Markup {
    let contributor_names: HashMap<ContributorId, &str> = contributors
        .iter()
        .map(|contributor| (contributor.id, contributor.name.as_ref()))
        .collect();

    html! {
        section class=(CARD_STYLE)
        {
            h2 class="text-lg font-semibold mb-2" { "Expenses" }

            @if expenses.is_empty() {
                p class="text-gray-500 dark:text-gray-400" { "No expenses yet" }
            } @else {
                ul id="expenses" class="divide-y divide-gray-200 dark:divide-gray-700"
                {
                    @for expense in expenses {
                        @let payer = contributor_names
                            .get(&expense.paid_by_contributor_id)
                            .copied()
                            .unwrap_or("Unknown");
                        @let edit_url = endpoints::format_endpoint(
                            endpoints::EDIT_EXPENSE_VIEW,
                            expense.id,
                        );
                        @let delete_url = endpoints::format_endpoint(
                            endpoints::DELETE_EXPENSE,
                            expense.id,
                        );
                        @let confirm_message = format!(
                            "Are you sure you want to delete '{}'?",
                            expense.description
                        );

                        li class="py-3" data-expense-id=(expense.id)
                        {
                            div class="flex justify-between gap-4"
                            {
                                div
                                {
                                    p class="font-medium" { (expense.description) }
                                    p class="text-sm text-gray-500 dark:text-gray-400"
                                    {
                                        span class=(BADGE_STYLE) { (payer) }
                                        " "
                                        time datetime=(expense.created_at.to_string())
                                        {
                                            (format_date_time(expense.created_at, local_offset))
                                        }
                                    }
                                }

                                span class="font-semibold tabular-nums"
                                {
                                    (format_currency(expense.amount))
                                }
                            }

                            div class="mt-1 flex gap-4 text-sm"
                            {
                                (edit_delete_action_links(
                                    &edit_url,
                                    &delete_url,
                                    &confirm_message,
                                    "closest li",
                                    "delete",
                                ))
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::UtcOffset;

    use crate::{
        balance::test_helpers::{contributor, expense},
        endpoints,
    };

    use super::{expense_list_view, new_expense_form_view};

    #[test]
    fn form_lists_contributors_and_new_option() {
        let contributors = vec![contributor(1, "Alice"), contributor(2, "Bob")];

        let html = Html::parse_fragment(&new_expense_form_view(7, &contributors).into_string());

        let form = html.select(&Selector::parse("form").unwrap()).next().unwrap();
        assert_eq!(
            form.value().attr("hx-post"),
            Some(endpoints::format_endpoint(endpoints::POST_EXPENSE, 7).as_str())
        );
        let options = html
            .select(&Selector::parse("#paid_by option").unwrap())
            .map(|option| {
                (
                    option.value().attr("value").unwrap().to_owned(),
                    option.value().attr("selected").is_some(),
                )
            })
            .collect::<Vec<_>>();
        assert_eq!(
            options,
            vec![
                ("1".to_owned(), true),
                ("2".to_owned(), false),
                ("".to_owned(), false)
            ]
        );
    }

    #[test]
    fn form_without_contributors_shows_new_contributor_input() {
        let html = Html::parse_fragment(&new_expense_form_view(7, &[]).into_string());

        let field = html
            .select(&Selector::parse("[data-new-contributor-field]").unwrap())
            .next()
            .unwrap();
        assert!(field.value().attr("hidden").is_none());
    }

    #[test]
    fn expense_list_shows_payer_and_amount() {
        let contributors = vec![contributor(1, "Alice")];
        let expenses = vec![expense(3, 12.5, 1)];

        let html = Html::parse_fragment(
            &expense_list_view(&expenses, &contributors, UtcOffset::UTC).into_string(),
        );

        let item = html
            .select(&Selector::parse("#expenses li").unwrap())
            .next()
            .unwrap();
        let text = item.text().collect::<String>();
        assert!(text.contains("Expense 3"));
        assert!(text.contains("Alice"));
        assert!(text.contains("$12.50"));
        assert!(text.contains("Jan 1, 00:00"));
    }

    #[test]
    fn empty_expense_list_shows_placeholder() {
        let html =
            Html::parse_fragment(&expense_list_view(&[], &[], UtcOffset::UTC).into_string());

        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("No expenses yet"));
    }
}
