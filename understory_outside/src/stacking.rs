// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stacking order resolution.
//!
//! This is an approximation of paint order, not the CSS stacking-context
//! model: `position`, `isolation`, and containing blocks are ignored. An
//! element's order is its own `z-index` if that is a non-zero integer,
//! otherwise the nearest such ancestor's, otherwise `0`.

use crate::tree::ElementTree;

/// Style property consulted by [`resolve_z_index`].
pub const Z_INDEX_PROPERTY: &str = "z-index";

/// Parse a `z-index` value with integer-prefix semantics.
///
/// Leading whitespace and one sign are accepted, then the longest run of ASCII
/// digits; anything after it is ignored. Values without leading digits (such
/// as `"auto"`) are unparseable. Out-of-range values saturate.
///
/// ```
/// use understory_outside::parse_z_index;
///
/// assert_eq!(parse_z_index("10"), Some(10));
/// assert_eq!(parse_z_index(" -3px"), Some(-3));
/// assert_eq!(parse_z_index("auto"), None);
/// ```
pub fn parse_z_index(value: &str) -> Option<i32> {
    let s = value.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let mut magnitude: i64 = 0;
    let mut any = false;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        any = true;
        magnitude = magnitude.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }
    if !any {
        return None;
    }
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value.clamp(i64::from(i32::MIN), i64::from(i32::MAX))).ok()
}

/// Resolve the stacking order of `id` by walking up the tree.
///
/// Returns the first non-zero, parseable `z-index` found on `id` or its
/// ancestors, or `0` when the walk reaches a root without one.
pub fn resolve_z_index<T: ElementTree + ?Sized>(tree: &T, id: T::Id) -> i32 {
    let mut current = Some(id);
    while let Some(node) = current {
        if let Some(z) = tree
            .style_property(node, Z_INDEX_PROPERTY)
            .and_then(parse_z_index)
            && z != 0
        {
            return z;
        }
        current = tree.parent_of(node);
    }
    0
}
