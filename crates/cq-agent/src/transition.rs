//! The agent's private training environment.
//!
//! A deliberately crude model of a checkout area, independent of the full
//! engine: each step applies the chosen action, then every queue serves one
//! customer and gains one with a time-of-day probability.

use cq_core::SimRng;

use crate::{Action, QState};

/// Queue lengths above this shrink by one on `convert_to_kiosk`.
const KIOSK_RELIEF_THRESHOLD: u32 = 3;

/// Next state after taking `action` in `state`.
///
/// `layout_retention` is the weight each queue keeps under
/// `optimize_layout`; the rest is pulled toward the mean.
pub fn simulate(action: Action, state: &QState, layout_retention: f64, rng: &mut SimRng) -> QState {
    let mut next = state.clone();
    let queues = &mut next.queue_lengths;

    match action {
        Action::AddRegular | Action::AddKiosk => {
            next.active_stations += 1;
            queues.push(0);
        }
        Action::RemoveStation => {
            if next.active_stations > 1 {
                next.active_stations -= 1;
                // First occurrence of the longest queue.
                let longest = queues
                    .iter()
                    .enumerate()
                    .fold(None, |best: Option<(usize, u32)>, (i, &len)| match best {
                        Some((_, top)) if top >= len => best,
                        _ => Some((i, len)),
                    });
                if let Some((idx, _)) = longest {
                    queues.remove(idx);
                }
            }
        }
        Action::ConvertToKiosk => {
            for len in queues.iter_mut().filter(|len| **len > KIOSK_RELIEF_THRESHOLD) {
                *len -= 1;
            }
        }
        Action::ConvertToRegular => {
            for len in queues.iter_mut().filter(|len| **len > 0) {
                *len -= 1;
            }
        }
        Action::OptimizeLayout => {
            let mean = if queues.is_empty() {
                0.0
            } else {
                queues.iter().map(|&l| l as f64).sum::<f64>() / queues.len() as f64
            };
            for len in queues.iter_mut() {
                let pulled = *len as f64 * layout_retention + mean * (1.0 - layout_retention);
                *len = pulled.round().max(0.0) as u32;
            }
        }
        Action::NoChange => {}
    }

    // Natural progression: serve one, maybe admit one.
    let arrival_probability = next.time_bucket().arrival_probability();
    for len in next.queue_lengths.iter_mut() {
        *len = len.saturating_sub(1);
        if rng.uniform() < arrival_probability {
            *len += 1;
        }
    }
    next
}
