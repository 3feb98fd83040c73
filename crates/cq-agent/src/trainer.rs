//! Background training task.
//!
//! A [`LearningTask`] drives [`QLearningAgent::train_batch`] on its own
//! thread, one batch per `batch_interval`, until the agent halts or the task
//! is stopped.  The agent sits behind a mutex so callers can read progress
//! or ask for recommendations between batches; each batch holds the lock
//! only for its own duration.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use cq_core::CheckoutStation;
use tracing::{debug, warn};

use crate::{AgentResult, QLearningAgent, QState};

/// Agent shared between a [`LearningTask`] and its owner.
pub type SharedAgent = Arc<Mutex<QLearningAgent>>;

/// Lock the agent, recovering it if a previous holder panicked.
pub fn lock(agent: &SharedAgent) -> MutexGuard<'_, QLearningAgent> {
    agent.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle to a running training thread.  Dropping it has the same effect as
/// [`LearningTask::stop`].
#[derive(Debug)]
pub struct LearningTask {
    agent:  SharedAgent,
    stop:   Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl LearningTask {
    /// Call `start_learning` on the agent, then spawn the training loop.
    pub fn start(agent: SharedAgent, state: &QState, stations: &[CheckoutStation]) -> AgentResult<Self> {
        let interval = {
            let mut guard = lock(&agent);
            guard.start_learning(state, stations);
            guard.config().batch_interval
        };
        Self::spawn(agent, interval)
    }

    /// Spawn the training loop for an agent whose learning has already been
    /// started.
    pub fn spawn(agent: SharedAgent, interval: Duration) -> AgentResult<Self> {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let worker = Arc::clone(&agent);

        let handle = thread::Builder::new().name("q-learning".into()).spawn(move || {
            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                        debug!("training task cancelled");
                        break;
                    }
                }
                if !lock(&worker).train_batch() {
                    break;
                }
            }
        })?;

        Ok(Self { agent, stop: Some(stop_tx), handle: Some(handle) })
    }

    pub fn agent(&self) -> &SharedAgent {
        &self.agent
    }

    /// `true` once the thread has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Cancel the loop, mark the agent as no longer learning, and wait for
    /// the thread.
    pub fn stop(mut self) {
        self.halt();
    }

    /// Wait for training to run to completion.
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("training thread panicked");
            }
        }
        self.stop = None;
    }

    /// No-op once the thread has been joined.
    fn halt(&mut self) {
        if self.handle.is_none() {
            return;
        }
        self.shutdown();
        lock(&self.agent).stop_learning();
    }

    fn shutdown(&mut self) {
        if let Some(stop) = self.stop.take() {
            // The thread may already have exited.
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("training thread panicked");
            }
        }
    }
}

impl Drop for LearningTask {
    fn drop(&mut self) {
        self.halt();
    }
}
