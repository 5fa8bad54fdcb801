//! Required-field validation

use crate::record::RawRecord;

/// Return the required field names that are missing from `record`.
///
/// A field is missing when it is absent, null, or blank after trimming.
/// Names are returned in the order given by `required`.
pub fn missing_fields(record: &RawRecord, required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|field| record.is_missing(field))
        .map(|field| field.to_string())
        .collect()
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
