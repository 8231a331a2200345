use std::process::Child;

/// A background child together with its position in the registry.
#[derive(Debug)]
pub struct BackgroundJob {
    pub index: usize,
    pub child: Child,
}

/// Background children started during the session.
///
/// Entries are only added while the shell runs. Nothing reaps a finished
/// background child before shutdown, so exited children linger until then.
#[derive(Debug, Default)]
pub struct JobRegistry {
    jobs: Vec<BackgroundJob>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a running child and return its 1-based job index.
    pub fn register(&mut self, child: Child) -> usize {
        let index = self.jobs.len() + 1;
        log::info!("background job [{index}] started as pid {}", child.id());
        self.jobs.push(BackgroundJob { index, child });
        index
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn pids(&self) -> Vec<u32> {
        self.jobs.iter().map(|job| job.child.id()).collect()
    }

    pub fn contains(&self, pid: u32) -> bool {
        self.jobs.iter().any(|job| job.child.id() == pid)
    }

    /// Send SIGKILL to every registered child, in registration order, and empty the registry.
    ///
    /// The signalled handles are returned so a caller that keeps running can reap them.
    pub fn terminate_all(&mut self) -> Vec<Child> {
        self.jobs
            .drain(..)
            .map(|mut job| {
                let pid = job.child.id();
                match job.child.kill() {
                    Ok(()) => log::info!("sent SIGKILL to background job [{}] pid {pid}", job.index),
                    Err(e) => log::warn!("could not signal background job [{}] pid {pid}: {e}", job.index),
                }
                job.child
            })
            .collect()
    }
}
