use tokio::task::JoinHandle;

// Collects background loops and their join handles so the owning surface can
// tear them down when it goes away.
pub struct TaskRunner {
    tasks: Vec<Box<dyn FnOnce() -> JoinHandle<()> + Send>>,
    handles: Vec<JoinHandle<()>>,
}

impl TaskRunner {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            handles: Vec::new(),
        }
    }

    pub fn add_task<F>(&mut self, task: F)
    where
        F: FnOnce() -> JoinHandle<()> + Send + 'static,
    {
        self.tasks.push(Box::new(task));
    }

    pub fn start_all(&mut self) {
        for task in self.tasks.drain(..) {
            self.handles.push(task());
        }
    }

    pub fn abort_all(self) {
        for handle in self.handles {
            handle.abort();
        }
    }
}

impl Default for TaskRunner {
    fn default() -> Self {
        Self::new()
    }
}
