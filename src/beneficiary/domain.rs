//! Core beneficiary domain types.

use std::{fmt::Display, str::FromStr};

use serde::Deserialize;

use crate::Error;

/// How a beneficiary receives their payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    /// Collected in person at the treasury.
    #[default]
    Cash,
    /// Paid into the beneficiary's bank account.
    Transfer,
}

impl PaymentMethod {
    /// Interpret the payment method column of an imported spreadsheet.
    ///
    /// Only "virement" (in any case) means a bank transfer, anything else,
    /// including an empty cell, is treated as cash.
    pub fn from_spreadsheet_cell(cell: &str) -> Self {
        if cell.to_lowercase() == "virement" {
            PaymentMethod::Transfer
        } else {
            PaymentMethod::Cash
        }
    }

    /// The name shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Transfer => "Bank transfer",
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "cash"),
            PaymentMethod::Transfer => write!(f, "transfer"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(PaymentMethod::Cash),
            "transfer" => Ok(PaymentMethod::Transfer),
            other => Err(Error::InvalidPaymentMethod(other.to_owned())),
        }
    }
}

/// A recipient of a payment notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Beneficiary {
    /// The name used to greet the beneficiary.
    pub name: String,
    /// Where the notification is sent. The format is not checked.
    pub phone: String,
    /// The order or voucher the payment relates to.
    pub reference: String,
    /// How the payment is made.
    pub payment_method: PaymentMethod,
    /// The account paid into, only meaningful for bank transfers.
    pub account_number: Option<String>,
}

impl Beneficiary {
    /// Whether this is a bank transfer with no account to pay into.
    ///
    /// Manual entries can never be in this state, imported rows can.
    pub fn is_missing_account_number(&self) -> bool {
        self.payment_method == PaymentMethod::Transfer
            && self
                .account_number
                .as_deref()
                .is_none_or(|account| account.is_empty())
    }
}

/// Form data for entering a single beneficiary by hand.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BeneficiaryForm {
    pub name: String,
    pub phone: String,
    pub reference: String,
    pub payment_method: String,
    #[serde(default)]
    pub account_number: String,
}

impl BeneficiaryForm {
    /// Check the required fields and build a [Beneficiary].
    ///
    /// Whitespace around values is ignored. An account number submitted for a
    /// cash payment is discarded.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyField] for the first required field that is empty,
    /// [Error::InvalidPaymentMethod] if the payment method is not recognised and
    /// [Error::MissingAccountNumber] for a transfer without an account number.
    pub fn validate(&self) -> Result<Beneficiary, Error> {
        let name = required(&self.name, "Name")?;
        let phone = required(&self.phone, "Phone")?;
        let reference = required(&self.reference, "Reference")?;
        let payment_method: PaymentMethod = self.payment_method.trim().parse()?;

        let account_number = match payment_method {
            PaymentMethod::Cash => None,
            PaymentMethod::Transfer => {
                let account_number = self.account_number.trim();

                if account_number.is_empty() {
                    return Err(Error::MissingAccountNumber);
                }

                Some(account_number.to_owned())
            }
        };

        Ok(Beneficiary {
            name,
            phone,
            reference,
            payment_method,
            account_number,
        })
    }
}

fn required(value: &str, field_name: &'static str) -> Result<String, Error> {
    let value = value.trim();

    if value.is_empty() {
        Err(Error::EmptyField(field_name))
    } else {
        Ok(value.to_owned())
    }
}
