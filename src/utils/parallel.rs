//! Process-wide switch for rayon-backed code paths.
//!
//! Call sites that can parallelise (Merkle leaf hashing, query verification)
//! consult [`parallelism_enabled`] at runtime so tests can force the serial
//! path and compare results against the parallel one.

use std::sync::atomic::{AtomicBool, Ordering};

static RAYON_ENABLED: AtomicBool = AtomicBool::new(true);

/// Whether rayon-backed paths should be taken right now.
///
/// Always `false` when the crate is built without the `parallel` feature.
pub fn parallelism_enabled() -> bool {
    cfg!(feature = "parallel") && RAYON_ENABLED.load(Ordering::Relaxed)
}

/// Overrides the parallelism switch until the returned guard is dropped.
#[must_use = "the override ends when the guard is dropped"]
pub fn set_parallelism(enabled: bool) -> ParallelismGuard {
    ParallelismGuard {
        previous: RAYON_ENABLED.swap(enabled, Ordering::Relaxed),
    }
}

/// Restores the previous parallelism mode on drop.
pub struct ParallelismGuard {
    previous: bool,
}

impl Drop for ParallelismGuard {
    fn drop(&mut self) {
        RAYON_ENABLED.store(self.previous, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_restores_the_previous_mode() {
        let before = parallelism_enabled();
        {
            let _guard = set_parallelism(!before);
            assert_eq!(
                parallelism_enabled(),
                cfg!(feature = "parallel") && !before
            );
        }
        assert_eq!(parallelism_enabled(), before);
    }
}
