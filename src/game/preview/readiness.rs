use bevy::asset::LoadState;

/// Load progress of one requested thumbnail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailState {
    Loading,
    Loaded,
    Failed,
}

impl From<Option<LoadState>> for ThumbnailState {
    fn from(state: Option<LoadState>) -> Self {
        match state {
            Some(LoadState::Loaded) => ThumbnailState::Loaded,
            Some(LoadState::Failed(_)) => ThumbnailState::Failed,
            // Not yet known to the server counts as still loading
            _ => ThumbnailState::Loading,
        }
    }
}

/// Outcome of one poll over a batch of thumbnail requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    Pending { ready: usize, total: usize },
    Failed(usize),
    TimedOut { ready: usize, total: usize },
}

/// Classify a batch. A failed load wins over everything, a complete batch
/// wins over the timeout.
pub fn evaluate_readiness<I>(states: I, elapsed_secs: f32, timeout_secs: f32) -> Readiness
where
    I: IntoIterator<Item = ThumbnailState>,
{
    let mut ready = 0;
    let mut total = 0;
    for (index, state) in states.into_iter().enumerate() {
        total += 1;
        match state {
            ThumbnailState::Loaded => ready += 1,
            ThumbnailState::Failed => return Readiness::Failed(index),
            ThumbnailState::Loading => {}
        }
    }

    if ready == total {
        Readiness::Ready
    } else if elapsed_secs >= timeout_secs {
        Readiness::TimedOut { ready, total }
    } else {
        Readiness::Pending { ready, total }
    }
}
