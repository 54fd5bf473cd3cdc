/// Collects background jobs during startup and launches them together.
pub struct TaskRunner {
    tasks: Vec<(&'static str, Box<dyn FnOnce() + Send>)>,
}

impl Default for TaskRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskRunner {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn add_task<F>(&mut self, name: &'static str, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.tasks.push((name, Box::new(task)));
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn start_all(self) {
        for (name, task) in self.tasks {
            tracing::debug!(task = name, "Starting background task");
            task();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn start_all_runs_every_task_once() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut runner = TaskRunner::new();
        for name in ["a", "b"] {
            let counter = counter.clone();
            runner.add_task(name, move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(runner.len(), 2);
        runner.start_all();
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }
}
