//! Process-wide request counters. Initialized once at startup and mutated
//! only by the transport layer; the calculator core never touches them.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    requests_total: AtomicU64,
    tool_calls_total: AtomicU64,
    tool_errors_total: AtomicU64,
    request_duration_us_total: AtomicU64,
    chat_connections: AtomicU64,
    chat_turns_total: AtomicU64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub tool_calls_total: u64,
    pub tool_errors_total: u64,
    pub request_duration_us_total: u64,
    pub chat_connections: u64,
    pub chat_turns_total: u64,
}

impl Metrics {
    pub fn record_request(&self, duration_us: u64) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        self.request_duration_us_total
            .fetch_add(duration_us, Ordering::Relaxed);
    }

    pub fn record_tool_calls(&self, calls: u64) {
        self.tool_calls_total.fetch_add(calls, Ordering::Relaxed);
    }

    pub fn record_tool_errors(&self, errors: u64) {
        self.tool_errors_total.fetch_add(errors, Ordering::Relaxed);
    }

    pub fn chat_connected(&self) {
        self.chat_connections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn chat_disconnected(&self) {
        self.chat_connections.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn record_chat_turn(&self) {
        self.chat_turns_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_total: self.requests_total.load(Ordering::Relaxed),
            tool_calls_total: self.tool_calls_total.load(Ordering::Relaxed),
            tool_errors_total: self.tool_errors_total.load(Ordering::Relaxed),
            request_duration_us_total: self.request_duration_us_total.load(Ordering::Relaxed),
            chat_connections: self.chat_connections.load(Ordering::Relaxed),
            chat_turns_total: self.chat_turns_total.load(Ordering::Relaxed),
        }
    }
}
