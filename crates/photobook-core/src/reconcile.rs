//! Reconciliation of turn completions that fire out of creation order.
//!
//! Settle animations run concurrently with independent durations, so a page
//! started later can finish first. Completions are therefore matched against
//! the id expected to settle next. An early finisher is folded into the page
//! ahead of it, which then stands for both turns; the cursor state is only
//! touched when the expected page itself completes.

use crate::page::{PageId, TurningPage};
use crate::queue::TurnQueue;
use tracing::{debug, warn};

/// State change a completion asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum StateUpdate {
    /// The page settled in order and has left the queue. Its skip count says
    /// how many turns it stands for.
    Settle(TurningPage),
    /// The page finished early and was folded into `into`.
    Merge { page: PageId, into: PageId },
    /// The page is not in flight.
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub queue: TurnQueue,
    pub update: StateUpdate,
}

/// Resolve the completion of `completing` against the queue.
///
/// `next_expected` is the id after the last fully settled one.
pub fn reconcile(queue: &TurnQueue, next_expected: PageId, completing: PageId) -> Reconciliation {
    let mut queue = queue.clone();
    let Some(position) = queue.position(completing) else {
        debug!(page = %completing, "Completion for a page no longer in flight");
        return Reconciliation {
            queue,
            update: StateUpdate::Ignored,
        };
    };

    if completing != next_expected {
        if let Some(ahead_idx) = position.checked_sub(1) {
            let page = queue.remove_at(position);
            let ahead = &mut queue.pages_mut()[ahead_idx];
            ahead.absorb(&page);
            let into = ahead.id();
            debug!(
                page = %completing,
                into = %into,
                skip = ahead.skip_count(),
                "Merged early completion into the page ahead"
            );
            return Reconciliation {
                queue,
                update: StateUpdate::Merge {
                    page: completing,
                    into,
                },
            };
        }
        warn!(
            page = %completing,
            expected = %next_expected,
            "Out-of-order completion with no page ahead; settling it in order"
        );
    }

    let page = queue.remove_at(position);
    Reconciliation {
        queue,
        update: StateUpdate::Settle(page),
    }
}
