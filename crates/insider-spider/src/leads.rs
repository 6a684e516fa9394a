use crate::stock::sec::archive::{Candidate, ResolvedDocument};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// One unit of pipeline work.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lead {
    /// Stage A: a filing folder still to be resolved.
    Candidate(Candidate),
    /// Stage B: a document ready to be parsed.
    Document(ResolvedDocument),
}

/// Two-stage FIFO backlog shared by the dispatcher and every in-flight step.
///
/// All pops are non-blocking. Documents are always served before candidates: resolving a
/// candidate only produces more document work, so draining documents first keeps the
/// backlog shallow.
#[derive(Debug, Default)]
pub struct Leads {
    inner: Mutex<Stages>,
}

#[derive(Debug, Default)]
struct Stages {
    candidates: VecDeque<Candidate>,
    documents: VecDeque<ResolvedDocument>,
}

impl Leads {
    pub fn new(candidates: impl IntoIterator<Item = Candidate>) -> Self {
        Self {
            inner: Mutex::new(Stages {
                candidates: candidates.into_iter().collect(),
                documents: VecDeque::new(),
            }),
        }
    }

    // a panicking holder cannot leave a VecDeque half-mutated, so poisoning is ignored
    fn lock(&self) -> MutexGuard<'_, Stages> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push_candidate(&self, candidate: Candidate) {
        self.lock().candidates.push_back(candidate);
    }

    pub fn push_document(&self, document: ResolvedDocument) {
        self.lock().documents.push_back(document);
    }

    pub fn try_pop_document(&self) -> Option<ResolvedDocument> {
        self.lock().documents.pop_front()
    }

    pub fn try_pop_candidate(&self) -> Option<Candidate> {
        self.lock().candidates.pop_front()
    }

    /// The next lead to work on, documents first.
    pub fn next(&self) -> Option<Lead> {
        let mut stages = self.lock();
        if let Some(document) = stages.documents.pop_front() {
            return Some(Lead::Document(document));
        }
        stages.candidates.pop_front().map(Lead::Candidate)
    }

    /// Both stages are empty.
    pub fn is_empty(&self) -> bool {
        let stages = self.lock();
        stages.candidates.is_empty() && stages.documents.is_empty()
    }

    /// `(candidates, documents)` currently queued.
    pub fn len(&self) -> (usize, usize) {
        let stages = self.lock();
        (stages.candidates.len(), stages.documents.len())
    }
}
