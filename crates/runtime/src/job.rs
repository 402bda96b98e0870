use crate::channel::Channel;

/// Deterministic background-job queue with an explicit state machine.
///
/// Key properties:
/// - Total ordering on `(priority, id)`; equal priorities run in
///   submission order.
/// - Every state transition is validated and reported as a typed
///   [`JobEvent`] on the queue's channel.
/// - Optional backpressure via a maximum number of unfinished jobs.
///
/// The queue schedules; it does not run anything. Callers pop the next
/// startable job, do the work, and report completion. This keeps the type
/// single-threaded and replayable.

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JobId(pub u64);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum JobState {
    Pending,
    Running,
    Paused,
    Stopped,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobEvent {
    pub id: JobId,
    pub state: JobState,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct JobQueueFull {
    pub max_pending: usize,
}

impl std::fmt::Display for JobQueueFull {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "job queue full: max_pending={}", self.max_pending)
    }
}

impl std::error::Error for JobQueueFull {}

#[derive(Debug)]
struct JobEntry<T> {
    id: JobId,
    // Smaller values start earlier.
    priority: i32,
    state: JobState,
    payload: T,
}

#[derive(Debug)]
pub struct JobQueue<T> {
    next_id: u64,
    jobs: Vec<JobEntry<T>>,
    max_pending: Option<usize>,
    events: Channel<JobEvent>,
}

impl<T> Default for JobQueue<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            jobs: Vec::new(),
            max_pending: None,
            events: Channel::new(),
        }
    }
}

impl<T> JobQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_pending(max_pending: usize) -> Self {
        Self {
            max_pending: Some(max_pending),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn state(&self, id: JobId) -> Option<JobState> {
        self.entry(id).map(|j| j.state)
    }

    pub fn payload(&self, id: JobId) -> Option<&T> {
        self.entry(id).map(|j| &j.payload)
    }

    fn unfinished(&self) -> usize {
        self.jobs
            .iter()
            .filter(|j| !matches!(j.state, JobState::Stopped | JobState::Complete))
            .count()
    }

    pub fn submit(&mut self, priority: i32, payload: T) -> Result<JobId, JobQueueFull> {
        if let Some(max) = self.max_pending
            && self.unfinished() >= max
        {
            return Err(JobQueueFull { max_pending: max });
        }

        let id = JobId(self.next_id);
        self.next_id += 1;
        self.jobs.push(JobEntry {
            id,
            priority,
            state: JobState::Pending,
            payload,
        });
        self.events.emit(JobEvent {
            id,
            state: JobState::Pending,
        });
        Ok(id)
    }

    /// Moves the next pending job (by `(priority, id)`) to `Running`.
    pub fn start_next(&mut self) -> Option<JobId> {
        let id = self
            .jobs
            .iter()
            .filter(|j| j.state == JobState::Pending)
            .min_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.id.cmp(&b.id)))
            .map(|j| j.id)?;
        self.transition(id, JobState::Running);
        Some(id)
    }

    /// `Running` -> `Paused`. Returns `false` for any other state.
    pub fn pause(&mut self, id: JobId) -> bool {
        self.guarded_transition(id, &[JobState::Running], JobState::Paused)
    }

    /// `Paused` -> `Running`. Returns `false` for any other state.
    pub fn resume(&mut self, id: JobId) -> bool {
        self.guarded_transition(id, &[JobState::Paused], JobState::Running)
    }

    /// `Pending`/`Running`/`Paused` -> `Stopped`. Terminal.
    pub fn stop(&mut self, id: JobId) -> bool {
        self.guarded_transition(
            id,
            &[JobState::Pending, JobState::Running, JobState::Paused],
            JobState::Stopped,
        )
    }

    /// `Running` -> `Complete`. Terminal.
    pub fn complete(&mut self, id: JobId) -> bool {
        self.guarded_transition(id, &[JobState::Running], JobState::Complete)
    }

    /// Removes jobs in a terminal state, returning their payloads in id order.
    pub fn remove_finished(&mut self) -> Vec<(JobId, JobState, T)> {
        let mut finished = Vec::new();
        let mut remaining = Vec::new();
        for job in self.jobs.drain(..) {
            if matches!(job.state, JobState::Stopped | JobState::Complete) {
                finished.push((job.id, job.state, job.payload));
            } else {
                remaining.push(job);
            }
        }
        self.jobs = remaining;
        finished.sort_by_key(|(id, _, _)| *id);
        finished
    }

    pub fn events(&self) -> &[JobEvent] {
        self.events.events()
    }

    pub fn drain_events(&mut self) -> Vec<JobEvent> {
        self.events.drain()
    }

    fn entry(&self, id: JobId) -> Option<&JobEntry<T>> {
        self.jobs.iter().find(|j| j.id == id)
    }

    fn guarded_transition(&mut self, id: JobId, from: &[JobState], to: JobState) -> bool {
        let Some(job) = self.jobs.iter().find(|j| j.id == id) else {
            return false;
        };
        if !from.contains(&job.state) {
            return false;
        }
        self.transition(id, to);
        true
    }

    fn transition(&mut self, id: JobId, to: JobState) {
        if let Some(job) = self.jobs.iter_mut().find(|j| j.id == id) {
            job.state = to;
            self.events.emit(JobEvent { id, state: to });
        }
    }
}
