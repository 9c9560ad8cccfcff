// ABOUTME: Transient error banners — each one expires a fixed time after it was shown.
// ABOUTME: Time is passed in explicitly so expiry is testable without sleeping.

use std::time::{Duration, Instant};

/// One error banner and the moment it disappears.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorBanner {
    pub text: String,
    pub expires_at: Instant,
}

/// Banners currently on screen, oldest first. Not user-dismissible.
#[derive(Debug, Clone)]
pub struct BannerQueue {
    ttl: Duration,
    banners: Vec<ErrorBanner>,
}

impl BannerQueue {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            banners: Vec::new(),
        }
    }

    pub fn push_at(&mut self, text: String, now: Instant) {
        self.banners.push(ErrorBanner {
            text,
            expires_at: now + self.ttl,
        });
    }

    /// Drop expired banners. Returns whether anything was removed.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.banners.len();
        self.banners.retain(|b| b.expires_at > now);
        self.banners.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &ErrorBanner> {
        self.banners.iter()
    }

    pub fn len(&self) -> usize {
        self.banners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.banners.is_empty()
    }
}
