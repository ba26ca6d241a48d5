//! FIFO thread pool over one mutex and two condition variables.
//!
//! Purpose
//! -------
//! Execute opaque `FnOnce` tasks on a fixed set of worker threads in
//! submission order. One condvar wakes workers when tasks arrive
//! (`task_ready`); the other wakes [`ThreadPool::wait`] callers when the
//! queue is empty and nothing is running (`all_idle`).
//!
//! Invariants & assumptions
//! ------------------------
//! - `running` counts tasks popped from the queue but not yet finished;
//!   `queued() == 0 && running() == 0` is exactly the idle condition
//!   `wait()` blocks on.
//! - Task panics are not caught; a panicking task poisons the shared
//!   mutex, and the pool recovers the inner state rather than
//!   propagating the poison.
//! - Dropping the pool requests stop: tasks still queued are discarded
//!   without execution, and the workers join after finishing any
//!   in-flight task.
use std::{
    collections::VecDeque,
    sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError},
    thread::JoinHandle,
};

type Task = Box<dyn FnOnce() + Send + 'static>;

/// Requested worker counts above `8 × hardware` are clamped.
fn clamp_workers(requested: usize) -> usize {
    let hardware = num_cpus::get().max(1);
    let count = if requested == 0 { hardware } else { requested };
    count.clamp(1, 8 * hardware)
}

struct PoolQueue {
    tasks: VecDeque<Task>,
    running: usize,
    stop: bool,
}

struct PoolShared {
    queue: Mutex<PoolQueue>,
    task_ready: Condvar,
    all_idle: Condvar,
}

impl PoolShared {
    fn lock(&self) -> MutexGuard<'_, PoolQueue> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Fixed-size FIFO worker pool.
pub struct ThreadPool {
    shared: Arc<PoolShared>,
    workers: Vec<JoinHandle<()>>,
}

impl ThreadPool {
    /// Spawn a pool with `workers` threads; 0 means hardware concurrency.
    pub fn new(workers: usize) -> Self {
        let count = clamp_workers(workers);
        let shared = Arc::new(PoolShared {
            queue: Mutex::new(PoolQueue { tasks: VecDeque::new(), running: 0, stop: false }),
            task_ready: Condvar::new(),
            all_idle: Condvar::new(),
        });

        let workers = (0..count)
            .map(|_| {
                let shared = Arc::clone(&shared);
                std::thread::spawn(move || worker_loop(&shared))
            })
            .collect();

        Self { shared, workers }
    }

    /// Queue a task; workers pick tasks up in submission order.
    pub fn enqueue(&self, task: impl FnOnce() + Send + 'static) {
        let mut queue = self.shared.lock();
        queue.tasks.push_back(Box::new(task));
        drop(queue);
        self.shared.task_ready.notify_one();
    }

    /// Block until the queue is empty and no task is running.
    pub fn wait(&self) {
        let mut queue = self.shared.lock();
        while !queue.tasks.is_empty() || queue.running > 0 {
            queue = self
                .shared
                .all_idle
                .wait(queue)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Number of worker threads.
    pub fn n_workers(&self) -> usize {
        self.workers.len()
    }

    /// Tasks queued but not yet started.
    pub fn queued(&self) -> usize {
        self.shared.lock().tasks.len()
    }

    /// Tasks currently executing.
    pub fn running(&self) -> usize {
        self.shared.lock().running
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        {
            let mut queue = self.shared.lock();
            queue.stop = true;
        }
        self.shared.task_ready.notify_all();
        for worker in self.workers.drain(..) {
            // A worker that panicked already delivered its panic payload;
            // nothing useful to do with it here.
            let _ = worker.join();
        }
    }
}

fn worker_loop(shared: &PoolShared) {
    loop {
        let task = {
            let mut queue = shared.lock();
            loop {
                // Stop wins over pending work: whatever is still queued
                // at shutdown is discarded, never executed.
                if queue.stop {
                    queue.tasks.clear();
                    return;
                }
                if let Some(task) = queue.tasks.pop_front() {
                    queue.running += 1;
                    break task;
                }
                queue = shared
                    .task_ready
                    .wait(queue)
                    .unwrap_or_else(PoisonError::into_inner);
            }
        };

        task();

        let mut queue = shared.lock();
        queue.running -= 1;
        if queue.tasks.is_empty() && queue.running == 0 {
            shared.all_idle.notify_all();
        }
    }
}

#[cfg(test)]
mod tests {
    //! Scope
    //! -----
    //! These tests cover task execution, the wait barrier, worker-count
    //! clamping, discard-on-drop, and the idle accessors. They
    //! intentionally DO NOT cover panicking tasks (documented as fatal
    //! to the batch being accumulated).
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    // Purpose: every queued task runs exactly once.
    // Given: 1000 increments across 4 workers.
    // Expect: counter at 1000 with an idle pool after wait().
    #[test]
    fn runs_all_tasks_once() {
        let pool = ThreadPool::new(4);
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..1000 {
            let counter = Arc::clone(&counter);
            pool.enqueue(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
        pool.wait();

        assert_eq!(counter.load(Ordering::SeqCst), 1000);
        assert_eq!(pool.queued(), 0);
        assert_eq!(pool.running(), 0);
    }

    // Purpose: wait() is a reusable barrier.
    // Given: two submission rounds separated by wait().
    // Expect: both rounds complete.
    #[test]
    fn wait_is_reusable() {
        let pool = ThreadPool::new(2);
        let counter = Arc::new(AtomicUsize::new(0));

        for round in 1..=2 {
            for _ in 0..50 {
                let counter = Arc::clone(&counter);
                pool.enqueue(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                });
            }
            pool.wait();
            assert_eq!(counter.load(Ordering::SeqCst), 50 * round);
        }
    }

    // Purpose: worker counts are defaulted and clamped.
    // Given: requests of 0, 3, and an absurdly large count.
    // Expect: hardware default, exact honor, and the 8× hardware cap.
    #[test]
    fn worker_count_clamping() {
        let hardware = num_cpus::get().max(1);

        assert_eq!(ThreadPool::new(0).n_workers(), hardware);
        assert_eq!(ThreadPool::new(3).n_workers(), 3usize.clamp(1, 8 * hardware));
        assert_eq!(ThreadPool::new(usize::MAX).n_workers(), 8 * hardware);
    }

    // Purpose: dropping the pool discards queued tasks without running
    // them.
    // Given: a 1-worker pool kept busy by a sleeping task with 100
    // counted tasks queued behind it, then dropped.
    // Expect: none of the queued tasks execute.
    #[test]
    fn drop_discards_queued_tasks() {
        let counter = Arc::new(AtomicUsize::new(0));
        {
            let pool = ThreadPool::new(1);
            pool.enqueue(|| std::thread::sleep(std::time::Duration::from_millis(200)));
            for _ in 0..100 {
                let counter = Arc::clone(&counter);
                pool.enqueue(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                });
            }
        }
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    // Purpose: an idle pool reports zero queued/running immediately.
    #[test]
    fn fresh_pool_is_idle() {
        let pool = ThreadPool::new(1);
        assert_eq!(pool.queued(), 0);
        assert_eq!(pool.running(), 0);
        pool.wait(); // must not block
    }
}
