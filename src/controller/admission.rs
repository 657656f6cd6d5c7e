//! # Opportunistic admission
//!
//! Decides whether an action may start **without disturbing** anything that is
//! already running, and on which lights. Used by
//! [`Executor::maybe_start`](crate::Executor::maybe_start).
//!
//! ## Algorithm
//! ```text
//! nothing running                     → Start(requested)
//! needed   = used_lights(requested)
//!   none                              → Decline(NoLights)
//!   all                               → Decline(WantsAll)
//! in_use   = ∪ running
//!   any running set is all            → Decline(AllInUse)
//! available = needed − in_use
//!   none                              → Decline(NoneAvailable)
//! final    = used_lights(available)
//!   none                              → Decline(ShrunkToNone)
//!   not a subset of available         → Decline(NotMonotonic)
//!                                     → Start(final)
//! ```
//!
//! ## Invariants
//! - A started action never gets a light that is in use, except when nothing runs.
//! - The decision is computed against a snapshot; it is not atomic with the start.

use crate::lights::LightSet;
use crate::tasks::Action;

/// Outcome of an admission check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Admission {
    /// Start the action with these lights (passed to `Executor::start`).
    Start(LightSet),
    /// Do not start the action.
    Decline(DeclineReason),
}

/// Why an action was not admitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclineReason {
    /// The action uses none of the requested lights.
    NoLights,
    /// The action wants every light while something else is running.
    WantsAll,
    /// A running action holds every light.
    AllInUse,
    /// Every light the action needs is in use.
    NoneAvailable,
    /// Offered only the free lights, the action would use none of them.
    ShrunkToNone,
    /// Offered the free lights, the action asked for lights outside them.
    ///
    /// This means its `used_lights` is not monotonic.
    NotMonotonic,
}

impl DeclineReason {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            DeclineReason::NoLights => "no_lights",
            DeclineReason::WantsAll => "wants_all",
            DeclineReason::AllInUse => "all_in_use",
            DeclineReason::NoneAvailable => "none_available",
            DeclineReason::ShrunkToNone => "shrunk_to_none",
            DeclineReason::NotMonotonic => "not_monotonic",
        }
    }
}

/// Runs the admission algorithm for `action` on `requested` given the light
/// sets of the `running` actions.
pub fn admit<C: 'static>(
    action: &Action<C>,
    requested: &LightSet,
    running: &[LightSet],
) -> Admission {
    if running.is_empty() {
        return Admission::Start(requested.clone());
    }

    let needed = action.used_lights(requested);
    if needed.is_none() {
        return Admission::Decline(DeclineReason::NoLights);
    }
    if needed.is_all() {
        return Admission::Decline(DeclineReason::WantsAll);
    }

    let mut in_use = LightSet::none();
    for lights in running {
        if in_use.merge(lights).is_err() {
            return Admission::Decline(DeclineReason::AllInUse);
        }
    }

    let available = match needed.subtract(&in_use) {
        Ok(available) if !available.is_none() => available,
        Ok(_) => return Admission::Decline(DeclineReason::NoneAvailable),
        Err(_) => return Admission::Decline(DeclineReason::WantsAll),
    };

    let final_used = action.used_lights(&available);
    if final_used.is_none() {
        return Admission::Decline(DeclineReason::ShrunkToNone);
    }
    let within = !final_used.is_all()
        && final_used
            .subtract(&available)
            .is_ok_and(|outside| outside.is_none());
    if !within {
        tracing::warn!(
            action = action.id(),
            offered = %available,
            used = %final_used,
            "used_lights is not monotonic; declining"
        );
        return Admission::Decline(DeclineReason::NotMonotonic);
    }

    Admission::Start(final_used)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Execution;
    use crate::error::TaskError;
    use crate::tasks::ActionFn;

    fn plain(id: u64) -> Action<()> {
        ActionFn::action(id, "plain", |_l: LightSet, _e: Execution| async {
            Ok::<_, TaskError>(())
        })
    }

    fn using(id: u64, used: impl Fn(&LightSet) -> LightSet + Send + Sync + 'static) -> Action<()> {
        Action::new(
            id,
            "custom",
            ActionFn::new(|_l: LightSet, _e: Execution| async { Ok::<_, TaskError>(()) })
                .with_used_lights(used),
        )
    }

    fn set(ids: &[u32]) -> LightSet {
        LightSet::new(ids.iter().copied())
    }

    #[test]
    fn idle_executor_starts_as_requested() {
        assert_eq!(
            admit(&plain(1), &set(&[1, 2]), &[]),
            Admission::Start(set(&[1, 2]))
        );
        assert_eq!(
            admit(&plain(1), &LightSet::All, &[]),
            Admission::Start(LightSet::All)
        );
    }

    #[test]
    fn takes_only_free_lights() {
        assert_eq!(
            admit(&plain(2), &set(&[1, 2, 3]), &[set(&[1, 2])]),
            Admission::Start(set(&[3]))
        );
    }

    #[test]
    fn used_lights_may_add_lights() {
        let plus_ten = using(3, |l| l.union(&set(&[10])));
        assert_eq!(
            admit(&plus_ten, &set(&[1, 2, 3]), &[set(&[1, 2])]),
            Admission::Start(set(&[3, 10]))
        );
    }

    #[test]
    fn declines() {
        let running = [set(&[1, 2])];
        assert_eq!(
            admit(&plain(1), &LightSet::none(), &running),
            Admission::Decline(DeclineReason::NoLights)
        );
        assert_eq!(
            admit(&plain(1), &LightSet::All, &running),
            Admission::Decline(DeclineReason::WantsAll)
        );
        assert_eq!(
            admit(&plain(1), &set(&[5]), &[LightSet::All]),
            Admission::Decline(DeclineReason::AllInUse)
        );
        assert_eq!(
            admit(&plain(1), &set(&[1, 2]), &running),
            Admission::Decline(DeclineReason::NoneAvailable)
        );

        let all_or_nothing = using(4, |l| {
            if l.is_all() || *l == set(&[1, 2, 3]) {
                l.clone()
            } else {
                LightSet::none()
            }
        });
        assert_eq!(
            admit(&all_or_nothing, &set(&[1, 2, 3]), &running),
            Admission::Decline(DeclineReason::ShrunkToNone)
        );

        let grabby = using(5, |l| if l.is_none() { l.clone() } else { l.union(&set(&[1])) });
        assert_eq!(
            admit(&grabby, &set(&[3]), &running),
            Admission::Decline(DeclineReason::NotMonotonic)
        );
    }
}
