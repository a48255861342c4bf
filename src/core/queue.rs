//! Ordered execution queue
//!
//! Runs asynchronous tasks strictly one at a time, in submission order. A
//! task that suspends (for example on a slow source-map lookup) holds the
//! queue until it settles, so a later task can never finish first.
//!
//! A dedicated worker thread owns a single-threaded tokio runtime and drains
//! a FIFO channel, driving each task to completion before taking the next.

use super::error::{panic_message, LoggerError, Result};
use crossbeam_channel::{unbounded, Sender};
use futures::future::{BoxFuture, FutureExt};
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{ready, Context, Poll};
use std::thread;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;

/// Default shutdown timeout for draining pending tasks (5 seconds)
///
/// Used when the queue is dropped without an explicit [`OrderedQueue::shutdown`].
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

const WORKER_THREAD_NAME: &str = "ordered-log-queue";

type Job = BoxFuture<'static, ()>;

#[derive(Debug, Default)]
struct QueueState {
    pending: AtomicUsize,
    processing: AtomicBool,
}

/// FIFO, one-at-a-time runner for asynchronous tasks
pub struct OrderedQueue {
    sender: Option<Sender<Job>>,
    worker: Option<thread::JoinHandle<()>>,
    state: Arc<QueueState>,
}

impl OrderedQueue {
    /// Start the worker thread.
    ///
    /// # Errors
    ///
    /// Fails if the runtime or the worker thread cannot be created.
    pub fn new() -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let (sender, receiver) = unbounded::<Job>();
        let state = Arc::new(QueueState::default());
        let worker_state = Arc::clone(&state);

        let worker = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || {
                // Channel closed once every sender is gone; pending jobs drain first
                for job in receiver.iter() {
                    worker_state.processing.store(true, Ordering::SeqCst);
                    runtime.block_on(job);
                    worker_state.processing.store(false, Ordering::SeqCst);
                    worker_state.pending.fetch_sub(1, Ordering::SeqCst);
                }
            })?;

        Ok(Self {
            sender: Some(sender),
            worker: Some(worker),
            state,
        })
    }

    /// Submit a task; it starts only after every earlier task has settled.
    ///
    /// Never blocks. A task that fails or panics settles its own handle with
    /// the error and the queue moves on to the next task.
    pub fn enqueue<F, T>(&self, task: F) -> TaskHandle<T>
    where
        F: Future<Output = Result<T>> + Send + 'static,
        T: Send + 'static,
    {
        let (completion, receiver) = oneshot::channel();

        let job = async move {
            let result = match AssertUnwindSafe(task).catch_unwind().await {
                Ok(result) => result,
                Err(payload) => Err(LoggerError::TaskPanicked(panic_message(payload.as_ref()))),
            };
            // Submitter may have dropped its handle; nothing to report then
            let _ = completion.send(result);
        }
        .boxed();

        let Some(sender) = self.sender.as_ref() else {
            return TaskHandle::settled(Err(LoggerError::LoggerStopped));
        };

        self.state.pending.fetch_add(1, Ordering::SeqCst);
        if sender.send(job).is_err() {
            self.state.pending.fetch_sub(1, Ordering::SeqCst);
            return TaskHandle::settled(Err(LoggerError::LoggerStopped));
        }

        TaskHandle {
            receiver: Some(receiver),
        }
    }

    /// Number of submitted tasks that have not settled yet
    pub fn pending(&self) -> usize {
        self.state.pending.load(Ordering::SeqCst)
    }

    /// Whether a task is currently in flight
    pub fn is_processing(&self) -> bool {
        self.state.processing.load(Ordering::SeqCst)
    }

    /// Whether the queue still accepts tasks
    pub fn is_running(&self) -> bool {
        self.sender.is_some()
    }

    /// Stop accepting tasks and wait for the pending ones to drain.
    ///
    /// # Returns
    ///
    /// `true` if the worker finished within `timeout`, `false` otherwise
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        // Close the channel to signal the worker thread
        drop(self.sender.take());

        let Some(handle) = self.worker.take() else {
            return true;
        };

        let start = Instant::now();
        loop {
            if handle.is_finished() {
                if let Err(e) = handle.join() {
                    eprintln!(
                        "[LOGGER ERROR] Queue worker thread panicked during shutdown: {}",
                        panic_message(e.as_ref())
                    );
                    return false;
                }
                return true;
            }

            if start.elapsed() >= timeout {
                eprintln!(
                    "[LOGGER WARNING] Queue worker did not finish within {:?}, {} pending tasks may be lost.",
                    timeout,
                    self.pending()
                );
                return false;
            }

            // Small sleep to avoid busy-waiting
            thread::sleep(Duration::from_millis(5));
        }
    }
}

impl Drop for OrderedQueue {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
    }
}

/// Completion handle for a queued task.
///
/// Await it from async code, or call [`TaskHandle::wait`] from a thread that
/// is not driving an async runtime.
#[must_use = "dropping the handle discards the task's outcome"]
pub struct TaskHandle<T> {
    /// `None` once the outcome has been taken
    receiver: Option<oneshot::Receiver<Result<T>>>,
}

impl<T> TaskHandle<T> {
    fn settled(result: Result<T>) -> Self {
        let (completion, receiver) = oneshot::channel();
        let _ = completion.send(result);
        Self {
            receiver: Some(receiver),
        }
    }

    /// Block the current thread until the task settles.
    ///
    /// # Panics
    ///
    /// Panics if called from within an asynchronous execution context; await
    /// the handle there instead.
    pub fn wait(self) -> Result<T> {
        match self.receiver {
            Some(receiver) => receiver
                .blocking_recv()
                .unwrap_or(Err(LoggerError::ChannelReceiveError)),
            None => Err(LoggerError::ChannelReceiveError),
        }
    }

    /// Outcome if the task has already settled
    pub fn try_result(&mut self) -> Option<Result<T>> {
        let Some(receiver) = self.receiver.as_mut() else {
            return Some(Err(LoggerError::ChannelReceiveError));
        };
        let outcome = match receiver.try_recv() {
            Ok(result) => result,
            Err(oneshot::error::TryRecvError::Empty) => return None,
            Err(oneshot::error::TryRecvError::Closed) => Err(LoggerError::ChannelReceiveError),
        };
        self.receiver = None;
        Some(outcome)
    }
}

impl<T> Future for TaskHandle<T> {
    type Output = Result<T>;

    /// Polling again after completion yields `ChannelReceiveError`.
    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let Some(receiver) = self.receiver.as_mut() else {
            return Poll::Ready(Err(LoggerError::ChannelReceiveError));
        };

        let outcome = ready!(Pin::new(receiver).poll(cx))
            .unwrap_or(Err(LoggerError::ChannelReceiveError));
        self.receiver = None;
        Poll::Ready(outcome)
    }
}
