use std::num::NonZero;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

/// Fixed-size pool of worker threads consuming tasks from a shared queue.
///
/// Workers race to receive from a single channel, so tasks are load-balanced
/// rather than processed in submission order. Each submitted task reports its
/// result through its own one-shot channel; the caller decides when and
/// whether to wait.
///
/// # Lifecycle
///
/// Dropping the pool closes the task queue and waits for every worker to
/// finish the tasks it already picked up.
///
/// # Examples
///
/// ```
/// use new_zealand::nz;
/// use read_bench::ThreadPool;
///
/// let pool = ThreadPool::new(nz!(2));
/// assert_eq!(pool.worker_count().get(), 2);
///
/// let result = pool.submit(|| 2 + 2);
/// assert_eq!(result.recv().unwrap(), 4);
/// ```
#[derive(Debug)]
pub struct ThreadPool {
    // `None` only during drop; closing the channel is the shutdown signal.
    task_tx: Option<mpsc::Sender<Task>>,
    join_handles: Vec<JoinHandle<()>>,
    worker_count: NonZero<usize>,
}

type Task = Box<dyn FnOnce() + Send>;

impl ThreadPool {
    /// Creates a pool with exactly `worker_count` worker threads.
    #[must_use]
    pub fn new(worker_count: NonZero<usize>) -> Self {
        let (task_tx, task_rx) = mpsc::channel::<Task>();

        let task_rx = Arc::new(Mutex::new(task_rx));

        let join_handles = (0..worker_count.get())
            .map(|_| {
                let task_rx = Arc::clone(&task_rx);
                thread::spawn(move || worker_entrypoint(&task_rx))
            })
            .collect();

        Self {
            task_tx: Some(task_tx),
            join_handles,
            worker_count,
        }
    }

    /// Returns the number of worker threads in the pool.
    #[must_use]
    pub fn worker_count(&self) -> NonZero<usize> {
        self.worker_count
    }

    /// Queues a task and returns the channel on which its result will arrive.
    ///
    /// The receive end reports a channel error instead of a value if the
    /// worker running the task panics before completing it.
    pub fn submit<F, R>(&self, f: F) -> oneshot::Receiver<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let (result_tx, result_rx) = oneshot::channel();

        self.task_tx
            .as_ref()
            .expect("task queue only closed during drop")
            .send(Box::new(move || {
                // The submitter may have stopped listening; a result with no
                // receiver is simply dropped.
                _ = result_tx.send(f());
            }))
            .expect("worker threads outlive the pool, so the queue cannot be closed here");

        result_rx
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        if thread::panicking() {
            // We are probably in a dirty state; joining workers now may hide
            // the original panic behind a secondary one, so do nothing.
            return;
        }

        // Closing the queue lets each worker drain what remains and exit.
        drop(self.task_tx.take());

        for handle in self.join_handles.drain(..) {
            handle
                .join()
                .expect("worker thread panicked while shutting down");
        }
    }
}

fn worker_entrypoint(task_rx: &Mutex<mpsc::Receiver<Task>>) {
    loop {
        // The lock is only held while receiving, never while running a task.
        let task = match task_rx
            .lock()
            .expect("a worker panicked while holding the queue lock")
            .recv()
        {
            Ok(task) => task,
            // Queue closed: the pool is shutting down.
            Err(mpsc::RecvError) => break,
        };

        task();
    }
}
