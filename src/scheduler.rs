//! Timestamp-driven timers on the single animation timeline.
//!
//! Nothing here sleeps or registers browser timeouts: the frame loop calls
//! [`Scheduler::poll`] with the current timestamp (ms) and receives the
//! payloads whose deadlines have passed. Every timer has a [`TaskId`] and can
//! be cancelled before it fires.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Clone, Copy, Debug)]
struct Repeat {
    every: f64,
    until: f64,
}

#[derive(Debug)]
struct Task<T> {
    id: TaskId,
    due: f64,
    repeat: Option<Repeat>,
    payload: T,
}

#[derive(Debug)]
pub struct Scheduler<T> {
    next_id: u64,
    tasks: Vec<Task<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            tasks: Vec::new(),
        }
    }

    fn alloc_id(&mut self) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Fire `payload` once, `delay_ms` after `now`.
    pub fn once(&mut self, now: f64, delay_ms: f64, payload: T) -> TaskId {
        let id = self.alloc_id();
        self.tasks.push(Task {
            id,
            due: now + delay_ms.max(0.0),
            repeat: None,
            payload,
        });
        id
    }

    /// Fire `payload` every `every_ms` starting one interval after `now`, for
    /// as long as the deadline is within `duration_ms` of `now`.
    pub fn repeating(&mut self, now: f64, every_ms: f64, duration_ms: f64, payload: T) -> TaskId {
        let id = self.alloc_id();
        let every = every_ms.max(1.0);
        let until = now + duration_ms.max(0.0);
        if now + every <= until {
            self.tasks.push(Task {
                id,
                due: now + every,
                repeat: Some(Repeat { every, until }),
                payload,
            });
        }
        id
    }

    /// Drop a pending timer. Returns false if it already fired or was unknown.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}

impl<T: Clone> Scheduler<T> {
    /// Collect every payload due at `now`, earliest deadline first.
    ///
    /// A repeating timer fires at most once per poll; missed intervals are
    /// caught up on later polls until its window closes.
    pub fn poll(&mut self, now: f64) -> Vec<(TaskId, T)> {
        let mut fired: Vec<(f64, TaskId, T)> = Vec::new();
        self.tasks.retain_mut(|t| {
            if t.due > now {
                return true;
            }
            fired.push((t.due, t.id, t.payload.clone()));
            match t.repeat {
                Some(r) if t.due + r.every <= r.until => {
                    t.due += r.every;
                    true
                }
                _ => false,
            }
        });
        fired.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        fired.into_iter().map(|(_, id, p)| (id, p)).collect()
    }
}
