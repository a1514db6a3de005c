//! Beneficiaries: the people to notify, and the ordered list that holds them.

mod create;
mod delete;
mod domain;
mod mapping;
mod store;
mod view;

pub use create::{create_beneficiary_endpoint, manual_entry_form_view};
pub use delete::{clear_beneficiaries_endpoint, delete_beneficiary_endpoint};
pub use domain::{Beneficiary, BeneficiaryForm, PaymentMethod};
pub use mapping::{Field, Row, map_row, missing_fields};
pub use store::BeneficiaryStore;
pub use view::{beneficiaries_section, section_response};
