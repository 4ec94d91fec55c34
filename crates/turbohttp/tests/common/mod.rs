//! Common test utilities and helpers

use std::sync::{Arc, Mutex};

use turbohttp::{OutgoingRequest, RequestLogger, Response, ResponseLogger, ResponseProcessor};

/// Shared, ordered record of collaborator invocations
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

#[allow(dead_code)]
impl Journal {
    pub fn push(&self, entry: String) {
        self.0.lock().unwrap().push(entry);
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// Request logger recording `request <METHOD> <path>`
#[derive(Debug)]
pub struct RecordingRequestLogger(pub Journal);

impl RequestLogger for RecordingRequestLogger {
    fn log_request(&self, request: &OutgoingRequest) {
        self.0
            .push(format!("request {} {}", request.method(), request.url().path()));
    }
}

/// Response logger recording `response <status>`
#[derive(Debug)]
pub struct RecordingResponseLogger(pub Journal);

impl ResponseLogger for RecordingResponseLogger {
    fn log_response(&self, _request: &OutgoingRequest, response: &Response) {
        self.0
            .push(format!("response {}", response.status().as_u16()));
    }
}

/// Processor recording `process <status>` and passing the response through
#[derive(Debug)]
pub struct RecordingProcessor(pub Journal);

impl ResponseProcessor for RecordingProcessor {
    fn process(&self, response: Response) -> turbohttp::Result<Response> {
        self.0
            .push(format!("process {}", response.status().as_u16()));
        Ok(response)
    }
}
