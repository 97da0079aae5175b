//! Fixed-value scorer for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::scorer::{DetectionRequest, DetectionScore, DetectionScorer};

/// A scorer that always returns the same value and records what it was asked.
pub struct FixedScorer {
    score: f64,
    call_count: AtomicU32,
    last_request: Mutex<Option<DetectionRequest>>,
}

impl FixedScorer {
    pub fn new(score: f64) -> Self {
        Self {
            score,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Get the number of calls made to this scorer.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last request made to this scorer.
    pub fn last_request(&self) -> Option<DetectionRequest> {
        self.last_request
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DetectionScorer for FixedScorer {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn score(&self, request: &DetectionRequest) -> anyhow::Result<DetectionScore> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }
        Ok(DetectionScore {
            score: self.score,
            duration_ms: 0,
        })
    }
}
