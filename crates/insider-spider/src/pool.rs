use std::future::Future;
use std::time::Duration;
use tokio::task::{JoinError, JoinSet};
use tracing::error;

/// A bounded set of in-flight tasks.
///
/// The pool never blocks on a spawn; callers check [`WorkerPool::has_capacity`] first and
/// reap finished tasks with [`WorkerPool::try_reap`] or [`WorkerPool::reap`]. A task that
/// panics is reported as a [`JoinError`] and never takes its siblings down.
#[derive(Debug)]
pub struct WorkerPool<T> {
    capacity: usize,
    tasks: JoinSet<T>,
}

impl<T: Send + 'static> WorkerPool<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            tasks: JoinSet::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn has_capacity(&self) -> bool {
        self.tasks.len() < self.capacity
    }

    pub fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = T> + Send + 'static,
    {
        self.tasks.spawn(task);
    }

    /// Collect every task that has already finished, without waiting.
    pub fn try_reap(&mut self) -> Vec<Result<T, JoinError>> {
        let mut done = vec![];
        while let Some(result) = self.tasks.try_join_next() {
            done.push(result);
        }
        done
    }

    /// Wait at most `timeout` for one task to finish, then collect any others that are
    /// also done.
    pub async fn reap(&mut self, timeout: Duration) -> Vec<Result<T, JoinError>> {
        let mut done = vec![];
        if let Ok(Some(result)) = tokio::time::timeout(timeout, self.tasks.join_next()).await {
            done.push(result);
        }
        done.extend(self.try_reap());
        done
    }

    /// Wait for every remaining task.
    pub async fn drain(&mut self) -> Vec<Result<T, JoinError>> {
        let mut done = vec![];
        while let Some(result) = self.tasks.join_next().await {
            if let Err(err) = &result {
                error!("worker task did not complete, error({err})");
            }
            done.push(result);
        }
        done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn capacity_is_bounded() {
        let mut pool = WorkerPool::new(2);
        assert!(pool.has_capacity());
        pool.spawn(async { 1 });
        pool.spawn(async { 2 });
        assert!(!pool.has_capacity());

        let mut done: Vec<i32> = pool.drain().await.into_iter().map(Result::unwrap).collect();
        done.sort();
        assert_eq!(done, vec![1, 2]);
        assert!(pool.is_empty());
    }

    #[tokio::test]
    async fn a_panicking_task_does_not_stop_its_siblings() {
        let mut pool = WorkerPool::new(4);
        pool.spawn(async { panic!("boom") });
        pool.spawn(async { 7 });
        pool.spawn(async { 8 });

        let done = pool.drain().await;
        let panics = done.iter().filter(|r| r.is_err()).count();
        let mut ok: Vec<i32> = done.into_iter().filter_map(Result::ok).collect();
        ok.sort();
        assert_eq!(panics, 1);
        assert_eq!(ok, vec![7, 8]);
    }

    #[tokio::test(start_paused = true)]
    async fn reap_gives_up_after_the_timeout() {
        let mut pool = WorkerPool::new(1);
        pool.spawn(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            1
        });

        assert!(pool.reap(Duration::from_millis(10)).await.is_empty());
        assert_eq!(pool.len(), 1);
        assert!(pool.try_reap().is_empty());

        let done = pool.reap(Duration::from_secs(120)).await;
        assert_eq!(done.len(), 1);
        assert!(pool.is_empty());
    }
}
