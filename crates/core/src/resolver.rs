//! Blocker election
//!
//! Maps each waiting session in a snapshot to the single session reported
//! as blocking it. A waiter may conflict with several held locks at once;
//! the matrix's priority picks the reported cause, not arrival order.

use crate::matrix::ConflictMatrix;
use crate::record::{LockRecord, ResolvedBlock, SessionActivity};
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// Resolve every waiting session in `records` to exactly one blocker.
///
/// A held row is a candidate blocker for a waiting row when the pids
/// differ, the resource keys are equal, and the matrix marks (waiting
/// mode, held mode) as a conflict. Candidates accumulate per waiting pid
/// across all of that pid's waiting rows; the winner is the minimum by
/// (priority, holder pid), so repeated runs over the same snapshot elect
/// the same blocker. Waiting pids with no candidate are omitted; a
/// snapshot can race the lock table, and an unmatched waiter is not an
/// error.
pub fn resolve<P, M, K>(
    matrix: &ConflictMatrix<M>,
    records: &[LockRecord<P, M, K>],
    activity: &HashMap<P, SessionActivity>,
) -> BTreeMap<P, ResolvedBlock<P>>
where
    P: Copy + Ord + Hash,
    M: Copy + Eq + Hash,
    K: Eq,
{
    let (waiting, held): (Vec<_>, Vec<_>) = records.iter().partition(|record| !record.granted);

    let mut winners: BTreeMap<P, (u32, P)> = BTreeMap::new();
    for waiter in &waiting {
        for holder in &held {
            if holder.pid == waiter.pid || holder.key != waiter.key {
                continue;
            }
            let Some(priority) = matrix.conflicts(waiter.mode, holder.mode) else {
                continue;
            };
            let candidate = (priority, holder.pid);
            let best = winners.entry(waiter.pid).or_insert(candidate);
            if candidate < *best {
                *best = candidate;
            }
        }
    }

    winners
        .into_iter()
        .map(|(pid, (_, blocking_pid))| {
            let blocked = activity.get(&pid).cloned().unwrap_or_default();
            let blocking = activity.get(&blocking_pid).cloned().unwrap_or_default();
            (
                pid,
                ResolvedBlock {
                    blocking_pid,
                    blocked_user: blocked.user,
                    blocking_user: blocking.user,
                    blocked_query: blocked.query,
                    blocking_query: blocking.query,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::ConflictRule;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Mode {
        Shared,
        Update,
        Exclusive,
    }

    fn matrix() -> ConflictMatrix<Mode> {
        ConflictMatrix::from_rules([
            ConflictRule {
                requested: Mode::Shared,
                held: Mode::Exclusive,
                priority: 2,
            },
            ConflictRule {
                requested: Mode::Shared,
                held: Mode::Update,
                priority: 1,
            },
            ConflictRule {
                requested: Mode::Exclusive,
                held: Mode::Shared,
                priority: 1,
            },
            ConflictRule {
                requested: Mode::Exclusive,
                held: Mode::Exclusive,
                priority: 3,
            },
        ])
    }

    fn record(pid: i32, key: &str, mode: Mode, granted: bool) -> LockRecord<i32, Mode, String> {
        LockRecord {
            pid,
            key: key.to_string(),
            mode,
            granted,
        }
    }

    fn activity_for(pids: &[(i32, &str)]) -> HashMap<i32, SessionActivity> {
        pids.iter()
            .map(|&(pid, user)| {
                (
                    pid,
                    SessionActivity {
                        user: user.to_string(),
                        query: format!("query of {pid}"),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_single_blocker() {
        let records = vec![
            record(10, "R1", Mode::Exclusive, true),
            record(20, "R1", Mode::Shared, false),
        ];
        let activity = activity_for(&[(10, "alice"), (20, "bob")]);

        let resolved = resolve(&matrix(), &records, &activity);

        assert_eq!(resolved.len(), 1);
        let block = &resolved[&20];
        assert_eq!(block.blocking_pid, 10);
        assert_eq!(block.blocked_user, "bob");
        assert_eq!(block.blocking_user, "alice");
        assert_eq!(block.blocked_query, "query of 20");
        assert_eq!(block.blocking_query, "query of 10");
    }

    #[test]
    fn test_lower_priority_wins() {
        // pid 20 conflicts with both holders; Update carries priority 1,
        // Exclusive priority 2.
        let records = vec![
            record(10, "R1", Mode::Exclusive, true),
            record(30, "R1", Mode::Update, true),
            record(20, "R1", Mode::Shared, false),
        ];
        let activity = HashMap::new();

        for _ in 0..5 {
            let resolved = resolve(&matrix(), &records, &activity);
            assert_eq!(resolved[&20].blocking_pid, 30);
        }
    }

    #[test]
    fn test_equal_priority_breaks_ties_by_lowest_pid() {
        let records = vec![
            record(40, "R1", Mode::Exclusive, true),
            record(10, "R1", Mode::Exclusive, true),
            record(20, "R1", Mode::Shared, false),
        ];

        let resolved = resolve(&matrix(), &records, &HashMap::new());
        assert_eq!(resolved[&20].blocking_pid, 10);
    }

    #[test]
    fn test_unmatched_waiter_is_omitted() {
        let records = vec![
            record(10, "R1", Mode::Exclusive, true),
            record(20, "R2", Mode::Shared, false),
        ];

        let resolved = resolve(&matrix(), &records, &HashMap::new());
        assert!(resolved.is_empty());
    }

    #[test]
    fn test_compatible_modes_do_not_block() {
        let records = vec![
            record(10, "R1", Mode::Shared, true),
            record(20, "R1", Mode::Shared, false),
        ];

        let resolved = resolve(&matrix(), &records, &HashMap::new());
        assert!(resolved.is_empty());
    }

    #[test]
    fn test_own_locks_are_not_candidates() {
        // pid 20 holds one lock on R1 and waits on another; only pid 10
        // counts as a blocker.
        let records = vec![
            record(20, "R1", Mode::Shared, true),
            record(20, "R1", Mode::Exclusive, false),
            record(10, "R1", Mode::Shared, true),
        ];

        let resolved = resolve(&matrix(), &records, &HashMap::new());
        assert_eq!(resolved[&20].blocking_pid, 10);
    }

    #[test]
    fn test_candidates_accumulate_per_pid_across_waiting_rows() {
        // pid 20 has two waiting rows on different resources; the winner is
        // elected over candidates from both.
        let records = vec![
            record(10, "R1", Mode::Exclusive, true),
            record(30, "R2", Mode::Update, true),
            record(20, "R1", Mode::Shared, false),
            record(20, "R2", Mode::Shared, false),
        ];

        let resolved = resolve(&matrix(), &records, &HashMap::new());
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[&20].blocking_pid, 30);
    }

    #[test]
    fn test_missing_activity_degrades_to_empty_fields() {
        let records = vec![
            record(10, "R1", Mode::Exclusive, true),
            record(20, "R1", Mode::Shared, false),
        ];

        let resolved = resolve(&matrix(), &records, &HashMap::new());
        let block = &resolved[&20];
        assert_eq!(block.blocking_pid, 10);
        assert!(block.blocked_user.is_empty());
        assert!(block.blocking_query.is_empty());
    }

    #[test]
    fn test_two_waiters_on_one_holder() {
        let records = vec![
            record(10, "R1", Mode::Exclusive, true),
            record(20, "R1", Mode::Shared, false),
            record(30, "R1", Mode::Shared, false),
        ];

        let resolved = resolve(&matrix(), &records, &HashMap::new());
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[&20].blocking_pid, 10);
        assert_eq!(resolved[&30].blocking_pid, 10);
    }
}
