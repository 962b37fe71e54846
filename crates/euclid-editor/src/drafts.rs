//! Draft generation requests.
//!
//! The journaling editor talks to a `DraftService` through tickets: it
//! submits a request, and later polls for the matching response. A real
//! backend would implement this over the network; `SimulatedDraftService`
//! answers after a fixed delay so the editor's pending → success flow can
//! run without one.

use crate::timer::TimerSlot;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Where a generated draft is meant to be published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    LinkedIn,
    X,
    Instagram,
}

impl Platform {
    pub fn label(self) -> &'static str {
        match self {
            Platform::LinkedIn => "LinkedIn",
            Platform::X => "X",
            Platform::Instagram => "Instagram",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "linkedin" => Some(Platform::LinkedIn),
            "x" | "twitter" => Some(Platform::X),
            "instagram" => Some(Platform::Instagram),
            _ => None,
        }
    }
}

/// Identifies one submission; responses carry it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DraftTicket(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct DraftRequest {
    pub ticket: DraftTicket,
    pub entry: String,
    pub platform: Platform,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DraftResponse {
    Completed {
        ticket: DraftTicket,
        platform: Platform,
        at: DateTime<Utc>,
    },
    Failed {
        ticket: DraftTicket,
        message: String,
    },
}

impl DraftResponse {
    pub fn ticket(&self) -> DraftTicket {
        match self {
            DraftResponse::Completed { ticket, .. } | DraftResponse::Failed { ticket, .. } => *ticket,
        }
    }
}

pub trait DraftService {
    /// Start a request. A new submission supersedes any in-flight one.
    fn submit(&mut self, request: DraftRequest, now: DateTime<Utc>);

    /// Next response that is ready at `now`, if any.
    fn poll(&mut self, now: DateTime<Utc>) -> Option<DraftResponse>;

    /// Abandon the in-flight request; its response must never surface.
    fn cancel(&mut self);

    fn in_flight(&self) -> bool;

    /// When the in-flight request will have a response ready. Hosts that
    /// only wake at deadlines rely on this to poll at all.
    fn next_deadline(&self) -> Option<DateTime<Utc>>;
}

/// Completes every request after a fixed delay.
pub struct SimulatedDraftService {
    delay: TimeDelta,
    timer: TimerSlot,
    request: Option<DraftRequest>,
}

impl SimulatedDraftService {
    pub fn new(delay: TimeDelta) -> Self {
        Self {
            delay,
            timer: TimerSlot::new(),
            request: None,
        }
    }
}

impl DraftService for SimulatedDraftService {
    fn submit(&mut self, request: DraftRequest, now: DateTime<Utc>) {
        log::debug!("drafts: simulating {:?} for {}", request.ticket, request.platform.label());
        self.timer.arm(now, self.delay);
        self.request = Some(request);
    }

    fn poll(&mut self, now: DateTime<Utc>) -> Option<DraftResponse> {
        let fired = self.timer.fire(now)?;
        let request = self.request.take()?;
        Some(DraftResponse::Completed {
            ticket: request.ticket,
            platform: request.platform,
            at: fired.at,
        })
    }

    fn cancel(&mut self) {
        self.timer.cancel();
        self.request = None;
    }

    fn in_flight(&self) -> bool {
        self.request.is_some()
    }

    fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.timer.due_at()
    }
}
