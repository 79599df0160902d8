use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures::future::BoxFuture;
use tokio::task::JoinHandle;

type Action<A> = Arc<dyn Fn(A) -> BoxFuture<'static, ()> + Send + Sync>;

struct DebounceState<A> {
    generation: u64,
    last_args: Option<A>,
    timer: Option<JoinHandle<()>>,
}

/// Trailing-edge debouncer: the action runs once, with the latest arguments,
/// after `wait` passes without another call.
pub struct Debouncer<A> {
    wait: Duration,
    state: Arc<Mutex<DebounceState<A>>>,
    action: Action<A>,
}

impl<A: Send + 'static> Debouncer<A> {
    pub fn new<F, Fut>(wait: Duration, action: F) -> Self
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            wait,
            state: Arc::new(Mutex::new(DebounceState {
                generation: 0,
                last_args: None,
                timer: None,
            })),
            action: Arc::new(move |args| -> BoxFuture<'static, ()> { Box::pin(action(args)) }),
        }
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Records `args` and restarts the quiet-period timer.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule(&self, args: A) {
        let mut state = lock(&self.state);

        state.generation += 1;
        state.last_args = Some(args);

        if let Some(timer) = state.timer.take() {
            timer.abort();
        }

        let generation = state.generation;
        let shared = Arc::clone(&self.state);
        let action = Arc::clone(&self.action);
        let wait = self.wait;

        state.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(wait).await;

            let args = {
                let mut state = lock(&shared);

                // a newer call or a cancellation got here first
                if state.generation != generation {
                    return;
                }

                state.timer = None;
                state.last_args.take()
            };

            if let Some(args) = args {
                action(args).await;
            }
        }));
    }

    /// Drops the pending call, if any. Returns whether one was pending.
    pub fn cancel_pending(&self) -> bool {
        let mut state = lock(&self.state);

        state.generation += 1;
        state.last_args = None;

        match state.timer.take() {
            Some(timer) => {
                timer.abort();
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        lock(&self.state).timer.is_some()
    }
}

impl<A> Drop for Debouncer<A> {
    fn drop(&mut self) {
        let mut state = lock(&self.state);

        state.generation += 1;
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
    }
}

fn lock<A>(state: &Mutex<DebounceState<A>>) -> MutexGuard<'_, DebounceState<A>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
