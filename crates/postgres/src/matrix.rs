//! PostgreSQL conflict table
//!
//! Hand-enumerated from the server's lock-mode compatibility table.
//! Each entry maps (requested mode, held mode) to the tie-break priority
//! used when one waiter conflicts with several holders at once.

use crate::mode::PgLockMode;
use lockview_core::{ConflictMatrix, ConflictRule};
use std::sync::LazyLock;

const fn rule(requested: PgLockMode, held: PgLockMode, priority: u32) -> ConflictRule<PgLockMode> {
    ConflictRule {
        requested,
        held,
        priority,
    }
}

/// The full conflict table, 38 entries.
pub fn conflict_rules() -> Vec<ConflictRule<PgLockMode>> {
    use PgLockMode::*;

    vec![
        rule(AccessShare, AccessExclusive, 1),
        //
        rule(RowShare, Exclusive, 1),
        rule(RowShare, AccessExclusive, 2),
        //
        rule(RowExclusive, Share, 1),
        rule(RowExclusive, ShareRowExclusive, 2),
        rule(RowExclusive, Exclusive, 3),
        rule(RowExclusive, AccessExclusive, 4),
        //
        rule(ShareUpdateExclusive, ShareUpdateExclusive, 1),
        rule(ShareUpdateExclusive, Share, 2),
        rule(ShareUpdateExclusive, ShareRowExclusive, 3),
        rule(ShareUpdateExclusive, Exclusive, 4),
        rule(ShareUpdateExclusive, AccessExclusive, 5),
        //
        rule(Share, RowExclusive, 1),
        rule(Share, ShareUpdateExclusive, 2),
        rule(Share, ShareRowExclusive, 3),
        rule(Share, Exclusive, 4),
        rule(Share, AccessExclusive, 5),
        //
        rule(ShareRowExclusive, RowExclusive, 1),
        rule(ShareRowExclusive, ShareUpdateExclusive, 2),
        rule(ShareRowExclusive, Share, 3),
        rule(ShareRowExclusive, ShareRowExclusive, 4),
        rule(ShareRowExclusive, Exclusive, 5),
        rule(ShareRowExclusive, AccessExclusive, 6),
        //
        rule(Exclusive, RowShare, 1),
        rule(Exclusive, RowExclusive, 2),
        rule(Exclusive, ShareUpdateExclusive, 3),
        rule(Exclusive, Share, 4),
        rule(Exclusive, ShareRowExclusive, 5),
        rule(Exclusive, Exclusive, 6),
        rule(Exclusive, AccessExclusive, 7),
        //
        rule(AccessExclusive, AccessShare, 1),
        rule(AccessExclusive, RowShare, 2),
        rule(AccessExclusive, RowExclusive, 3),
        rule(AccessExclusive, ShareUpdateExclusive, 4),
        rule(AccessExclusive, Share, 5),
        rule(AccessExclusive, ShareRowExclusive, 6),
        rule(AccessExclusive, Exclusive, 7),
        rule(AccessExclusive, AccessExclusive, 8),
    ]
}

static MATRIX: LazyLock<ConflictMatrix<PgLockMode>> =
    LazyLock::new(|| ConflictMatrix::from_rules(conflict_rules()));

/// The process-wide matrix, built once on first use.
pub fn conflict_matrix() -> &'static ConflictMatrix<PgLockMode> {
    &MATRIX
}
