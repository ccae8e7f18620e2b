//! Loading / error / upload-progress bookkeeping for UI bindings.

use crate::FetchError;

/// Upload progress of a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    /// Bytes handed to the transport.
    pub sent: u64,
    /// Total body size in bytes.
    pub total: u64,
}

impl UploadProgress {
    /// Completion percentage in `0..=100`. An empty body counts as complete.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        let pct = self.sent.min(self.total) * 100 / self.total;
        pct as u8
    }

    pub fn is_complete(&self) -> bool {
        self.sent >= self.total
    }
}

/// State of the most recent request issued through a tracked call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestState {
    /// A request is in flight.
    pub loading: bool,
    /// User-facing message of the last failure, cleared on the next attempt.
    pub error: Option<String>,
    /// Upload progress of the in-flight request body, if it has one.
    pub progress: Option<UploadProgress>,
}

impl RequestState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a request as started.
    pub fn begin(&mut self, body_len: Option<usize>) {
        self.loading = true;
        self.error = None;
        self.progress = body_len.map(|len| UploadProgress {
            sent: 0,
            total: len as u64,
        });
    }

    /// Record upload progress.
    pub fn set_progress(&mut self, sent: u64, total: u64) {
        self.progress = Some(UploadProgress { sent, total });
    }

    /// Mark the body as fully handed off.
    pub fn body_sent(&mut self) {
        if let Some(progress) = self.progress.as_mut() {
            progress.sent = progress.total;
        }
    }

    /// Record the outcome of the request.
    pub fn finish<T>(&mut self, result: &Result<T, FetchError>) {
        self.loading = false;
        self.error = result.as_ref().err().map(FetchError::user_message);
    }

    pub fn is_idle(&self) -> bool {
        !self.loading
    }
}
