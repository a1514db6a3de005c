//! The ordered, in-memory list of beneficiaries.

use crate::{
    Error,
    beneficiary::{Beneficiary, Row, map_row},
};

/// The beneficiaries to notify, in the order they were added.
///
/// A beneficiary has no identity beyond its position: there is no sorting and
/// no deduplication by phone or reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BeneficiaryStore {
    beneficiaries: Vec<Beneficiary>,
}

impl BeneficiaryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one beneficiary per spreadsheet row, in order.
    ///
    /// Rows are never rejected: columns that cannot be found leave the field
    /// empty. Returns the number of beneficiaries appended.
    pub fn import_rows(&mut self, rows: &[Row]) -> usize {
        self.beneficiaries.extend(rows.iter().map(map_row));

        rows.len()
    }

    /// Append a beneficiary that was entered by hand.
    ///
    /// The caller is responsible for validating it, see
    /// [crate::beneficiary::BeneficiaryForm::validate].
    pub fn add_manual(&mut self, beneficiary: Beneficiary) {
        self.beneficiaries.push(beneficiary);
    }

    /// Remove and return the beneficiary at `index`.
    ///
    /// # Errors
    ///
    /// Returns [Error::BeneficiaryNotFound] if `index` is past the end of the
    /// list, in which case the store is unchanged.
    pub fn remove_at(&mut self, index: usize) -> Result<Beneficiary, Error> {
        if index >= self.beneficiaries.len() {
            return Err(Error::BeneficiaryNotFound(index));
        }

        Ok(self.beneficiaries.remove(index))
    }

    /// Remove every beneficiary.
    pub fn clear(&mut self) {
        self.beneficiaries.clear();
    }

    /// The number of beneficiaries.
    pub fn len(&self) -> usize {
        self.beneficiaries.len()
    }

    /// Whether there are no beneficiaries.
    pub fn is_empty(&self) -> bool {
        self.beneficiaries.is_empty()
    }

    /// The beneficiaries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Beneficiary> {
        self.beneficiaries.iter()
    }

    /// The beneficiaries in insertion order.
    pub fn as_slice(&self) -> &[Beneficiary] {
        &self.beneficiaries
    }
}
