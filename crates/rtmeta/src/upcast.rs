// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Base sub-object offsets.
//!
//! The walk follows the [`BaseLink`](crate::BaseLink) tables declared on
//! [`Reflect::BASES`](crate::Reflect::BASES), one level at a time. Within a
//! level, immediate bases are checked in declaration order before anything
//! deeper is visited, so the shallowest match wins. Every call re-derives
//! the offset.

use crate::config::MAX_HIERARCHY_DEPTH;
use crate::error::{Error, Result};
use crate::types::{BaseLink, Type};

/// Byte offset of the `to` sub-object inside a `from` value.
///
/// Returns `Ok(Some(0))` when the types are the same, `Ok(None)` when `to`
/// is not reachable, and [`Error::MalformedHierarchy`] when a declared link
/// does not fit its derived type or the tables form a cycle. Const
/// qualifiers are ignored.
pub fn base_offset(from: &Type, to: &Type) -> Result<Option<usize>> {
    if from.same_type(to) {
        return Ok(Some(0));
    }

    let mut level: Vec<(Type, usize)> = vec![(from.unqualified(), 0)];
    for _ in 0..MAX_HIERARCHY_DEPTH {
        let mut next = Vec::new();
        for (node, offset) in &level {
            for link in node.bases() {
                let base = checked_base(node, link)?;
                let at = offset + link.offset();
                if base.same_type(to) {
                    return Ok(Some(at));
                }
                next.push((base, at));
            }
        }
        if next.is_empty() {
            return Ok(None);
        }
        level = next;
    }

    log::error!(
        "[upcast] base tables of {} exceed {} levels",
        from,
        MAX_HIERARCHY_DEPTH
    );
    Err(Error::MalformedHierarchy(format!(
        "base tables of {} exceed {} levels (cycle?)",
        from, MAX_HIERARCHY_DEPTH
    )))
}

/// `true` if `to` is `from` or one of its declared bases, at any depth.
pub fn is_base_of(to: &Type, from: &Type) -> Result<bool> {
    Ok(base_offset(from, to)?.is_some())
}

fn checked_base(derived: &Type, link: &BaseLink) -> Result<Type> {
    let base = link.base_type();
    let fits = matches!(
        link.offset().checked_add(base.size()),
        Some(end) if end <= derived.size()
    );
    if !fits {
        log::error!(
            "[upcast] {} at offset {} does not fit in {} ({} bytes)",
            base,
            link.offset(),
            derived,
            derived.size()
        );
        return Err(Error::MalformedHierarchy(format!(
            "base {} at offset {} overruns {}",
            base,
            link.offset(),
            derived
        )));
    }
    if link.offset() % base.alignment() != 0 {
        log::error!(
            "[upcast] {} at offset {} is misaligned in {}",
            base,
            link.offset(),
            derived
        );
        return Err(Error::MalformedHierarchy(format!(
            "base {} at offset {} is misaligned in {}",
            base,
            link.offset(),
            derived
        )));
    }
    Ok(base)
}
