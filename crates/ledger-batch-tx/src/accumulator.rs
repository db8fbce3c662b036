use crate::{InstructionRequest, TxBatchError};
use tracing::debug;

/// Ordered, append-only collection of requests awaiting grouping
#[derive(Debug, Clone, Default)]
pub struct BatchAccumulator {
    requests: Vec<InstructionRequest>,
}

impl BatchAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a request; duplicates are kept
    pub fn add(&mut self, request: InstructionRequest) -> Result<(), TxBatchError> {
        request.validate()?;
        debug!("Queued instruction {:?} at position {}", request.label(), self.requests.len());
        self.requests.push(request);
        Ok(())
    }

    /// Append several requests, or none of them if any is invalid
    pub fn extend<I>(&mut self, requests: I) -> Result<(), TxBatchError>
    where
        I: IntoIterator<Item = InstructionRequest>,
    {
        let requests: Vec<_> = requests.into_iter().collect();
        for request in &requests {
            request.validate()?;
        }
        self.requests.extend(requests);
        Ok(())
    }

    pub fn requests(&self) -> &[InstructionRequest] {
        &self.requests
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn clear(&mut self) {
        self.requests.clear();
    }
}
