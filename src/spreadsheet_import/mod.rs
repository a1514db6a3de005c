//! Importing beneficiaries from CSV exports of spreadsheets.

mod alert;
mod form;
mod import_endpoint;
mod parse;

pub use form::{IMPORT_FORM_ID, import_form_view};
pub use import_endpoint::import_beneficiaries;
pub use parse::{Spreadsheet, parse_spreadsheet};
