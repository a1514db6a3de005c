//! Mapping loosely-typed spreadsheet rows onto beneficiaries.
//!
//! Spreadsheets in the wild name their columns in French or English, with or
//! without accents. Each [Field] has an ordered list of column names it may
//! appear under, and the first one present in a row wins.

use std::collections::HashMap;

use crate::beneficiary::{Beneficiary, PaymentMethod};

/// A row of a spreadsheet: column name to cell text.
///
/// Empty cells are not present in the map.
pub type Row = HashMap<String, String>;

/// A beneficiary attribute that can be read from a spreadsheet column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Phone,
    Reference,
    PaymentMethod,
    AccountNumber,
}

/// The column names each field is read from, in priority order.
pub const FIELD_ALIASES: &[(Field, &[&str])] = &[
    (Field::Name, &["Nom", "Bénéficiaire", "Name"]),
    (Field::Phone, &["Téléphone", "Telephone", "Tél", "Phone"]),
    (Field::Reference, &["Référence", "Reference", "Bon", "Ref"]),
    (
        Field::PaymentMethod,
        &["Mode", "Mode de paiement", "Payment", "Payment method"],
    ),
    (
        Field::AccountNumber,
        &["RIB", "Compte", "Account", "Account number"],
    ),
];

impl Field {
    /// The column names this field may appear under, highest priority first.
    pub fn aliases(self) -> &'static [&'static str] {
        FIELD_ALIASES
            .iter()
            .find(|(field, _)| *field == self)
            .map(|(_, aliases)| *aliases)
            .unwrap_or_default()
    }

    /// The value of the first alias present in `row`, or the empty string.
    pub fn resolve(self, row: &Row) -> &str {
        self.aliases()
            .iter()
            .find_map(|alias| row.get(*alias))
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// The name shown to users.
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Phone => "phone",
            Field::Reference => "reference",
            Field::PaymentMethod => "payment method",
            Field::AccountNumber => "account number",
        }
    }
}

/// Build a beneficiary from a spreadsheet row.
///
/// Never fails: fields with no matching column are left empty, and the payment
/// method falls back to cash. The account number is kept for transfers only.
pub fn map_row(row: &Row) -> Beneficiary {
    let payment_method = PaymentMethod::from_spreadsheet_cell(Field::PaymentMethod.resolve(row));
    let account_number = match payment_method {
        PaymentMethod::Cash => None,
        PaymentMethod::Transfer => Some(Field::AccountNumber.resolve(row))
            .filter(|account| !account.is_empty())
            .map(str::to_owned),
    };

    Beneficiary {
        name: Field::Name.resolve(row).to_owned(),
        phone: Field::Phone.resolve(row).to_owned(),
        reference: Field::Reference.resolve(row).to_owned(),
        payment_method,
        account_number,
    }
}

/// The required fields that none of `columns` provides.
///
/// Used to warn about spreadsheets whose headers were not recognised, since
/// their rows are still imported with empty values.
pub fn missing_fields(columns: &[&str]) -> Vec<Field> {
    [Field::Name, Field::Phone, Field::Reference]
        .into_iter()
        .filter(|field| !field.aliases().iter().any(|alias| columns.contains(alias)))
        .collect()
}
