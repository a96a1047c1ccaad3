// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The default claim matcher.

use warden_core::{ClaimMatcher, Claims};

/// Every required claim must be present in the payload with an equal value.
///
/// - No claim-set, or an empty one, authorizes any verified payload.
/// - Evaluation stops at the first missing or differing claim. The order in
///   which required claims are checked does not affect the result.
/// - Values compare as JSON values with no coercion: `1` is not `"1"`, `true`
///   is not `1`, and an integer is not equal to a float.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatch;

impl ClaimMatcher for ExactMatch {
    fn matches(&self, payload: &Claims, required: Option<&Claims>) -> bool {
        let Some(required) = required else {
            return true;
        };
        required
            .iter()
            .all(|(key, expected)| payload.get(key) == Some(expected))
    }
}
