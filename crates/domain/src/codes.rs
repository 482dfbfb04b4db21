// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Human-facing sequential codes.
//!
//! Codes are derived from the records already stored, so two writers that
//! read the same snapshot will mint the same code. The system assumes a
//! single writer.

/// Prefix of catalog item codes.
pub const ITEM_CODE_PREFIX: &str = "CAD-";

/// Prefix of order codes.
pub const ORDER_CODE_PREFIX: &str = "PED-";

/// Minimum width of the numeric suffix.
const CODE_WIDTH: usize = 3;

/// Computes the next code for a prefix.
///
/// Takes the largest numeric suffix among `existing` codes that share the
/// prefix, adds one, and zero-pads to three digits. Malformed suffixes count
/// as zero.
///
/// # Example
///
/// ```
/// use partyrent_domain::next_sequential_code;
///
/// let next = next_sequential_code("CAD-", ["CAD-001", "CAD-003"]);
/// assert_eq!(next, "CAD-004");
/// ```
#[must_use]
pub fn next_sequential_code<'a, I>(prefix: &str, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let highest: u64 = existing
        .into_iter()
        .filter_map(|code| code.strip_prefix(prefix))
        .map(|suffix| suffix.parse::<u64>().unwrap_or(0))
        .max()
        .unwrap_or(0);

    format!(
        "{prefix}{:0width$}",
        highest.saturating_add(1),
        width = CODE_WIDTH
    )
}
