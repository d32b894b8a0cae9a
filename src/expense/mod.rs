//! Expenses: single payments made by one contributor during a trip.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod view;

pub use create::create_expense_endpoint;
pub use db::{
    create_expense, create_expense_table, delete_expense, get_expense, get_expenses_for_trip,
    update_expense,
};
pub use delete::delete_expense_endpoint;
pub use domain::{
    Expense, ExpenseFormData, ExpenseId, ExpenseUpdate, NewExpense, validate_amount,
    validate_description,
};
pub use edit::{get_edit_expense_page, update_expense_endpoint};
pub use view::{expense_list_view, new_expense_form_view};
