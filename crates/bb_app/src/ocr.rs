//! Still-image recognition requests.
//!
//! Every capture gets a fresh request id. Results and failures carry the id
//! back, so anything produced for an earlier photo is rejected.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running { request_id: u64 },
}

#[derive(Debug, Default)]
pub struct Model {
    phase: Phase,
    last_request_id: u64,
}

impl Model {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    /// Id of the request in flight, if any.
    pub fn current_request(&self) -> Option<u64> {
        match self.phase {
            Phase::Running { request_id } => Some(request_id),
            Phase::Idle => None,
        }
    }

    /// Begin a new request and return its id.
    pub fn start(&mut self) -> u64 {
        self.last_request_id += 1;
        self.phase = Phase::Running {
            request_id: self.last_request_id,
        };
        self.last_request_id
    }

    /// Complete `request_id`. Returns `false` (and changes nothing) when it is
    /// not the request in flight.
    pub fn finish(&mut self, request_id: u64) -> bool {
        if self.current_request() != Some(request_id) {
            return false;
        }
        self.phase = Phase::Idle;
        true
    }

    pub fn cancel(&mut self) {
        self.phase = Phase::Idle;
    }
}
