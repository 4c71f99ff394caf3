//! Slot accessors shared by the domain rule sets
//!
//! Each helper returns errors rooted at the field it was given, so rules
//! only chain them with `?`.

use preflight_config::{Scalar, Slot, SlotList};
use preflight_validator::combinators::collect_each;
use preflight_validator::foundation::{Validate, ValidationError};
use preflight_validator::validators::{absolute_path, non_empty, not_blank};

/// A present, non-blank scalar.
pub(crate) fn text<'a>(slot: &'a Slot<Scalar>, field: &str) -> Result<&'a str, ValidationError> {
    let value = slot
        .require("a scalar")
        .map_err(|e| e.under(field))?
        .as_str();
    not_blank().validate(value).map_err(|e| e.under(field))?;
    Ok(value)
}

/// A present, non-blank, absolute path.
pub(crate) fn absolute(slot: &Slot<Scalar>, field: &str) -> Result<(), ValidationError> {
    let path = text(slot, field)?;
    absolute_path().validate(path).map_err(|e| e.under(field))
}

/// A present sequence, possibly empty.
pub(crate) fn shaped_sequence<'a, T>(
    slot: &'a SlotList<T>,
    field: &str,
) -> Result<&'a [Slot<T>], ValidationError> {
    slot.require("a sequence")
        .map(Vec::as_slice)
        .map_err(|e| e.under(field))
}

/// A present, non-empty sequence.
pub(crate) fn sequence<'a, T>(
    slot: &'a SlotList<T>,
    field: &str,
) -> Result<&'a [Slot<T>], ValidationError> {
    let entries = shaped_sequence(slot, field)?;
    non_empty().validate(entries).map_err(|e| e.under(field))?;
    Ok(entries)
}

/// Runs `check` on every entry of a sequence, reporting each failing entry
/// under `field[i]`. An absent or malformed sequence has no entries to check.
pub(crate) fn each_entry<T, F>(
    slot: &SlotList<T>,
    field: &str,
    expected: &'static str,
    check: F,
) -> Result<(), ValidationError>
where
    F: Fn(&T) -> Result<(), ValidationError>,
{
    let Some(entries) = slot.present() else {
        return Ok(());
    };
    collect_each(
        entries
            .iter()
            .map(|entry| entry.require(expected).and_then(&check)),
    )
    .map_err(|e| e.under(field))
}

/// Every listed field is a present, non-blank scalar.
pub(crate) fn all_text(fields: &[(&str, &Slot<Scalar>)]) -> Result<(), ValidationError> {
    grouped(
        fields
            .iter()
            .filter_map(|(field, slot)| text(slot, field).err())
            .collect(),
    )
}

/// Folds field failures of one entry into a single error.
///
/// A single failure is returned as is; several are grouped so the report
/// lists each field.
pub(crate) fn grouped(mut failures: Vec<ValidationError>) -> Result<(), ValidationError> {
    match failures.len() {
        0 => Ok(()),
        1 => Err(failures.remove(0)),
        n => {
            let names: Vec<&str> = failures
                .iter()
                .filter_map(|e| e.field.as_deref())
                .collect();
            let error = ValidationError::new(
                failures[0].kind,
                "missing_fields",
                format!("{n} required fields are missing or invalid"),
            )
            .with_param("fields", names.join(","));
            Err(failures.into_iter().fold(error, ValidationError::with_nested_error))
        }
    }
}
