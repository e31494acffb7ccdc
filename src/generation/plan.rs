use crate::error::ApiError;
use crate::types::GenerationRequest;

/// Notice template for a part whose reply had no usable text; `{k}` is the
/// 1-based part number.
pub const DEFAULT_PART_NOTICE: &str =
    "Sorry, we couldn't generate part {k} of this document. Please try again.";

/// Notice template for a part that never got a reply.
pub const DEFAULT_PART_ERROR_NOTICE: &str =
    "An error occurred while generating part {k} of this document. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainPart {
    request: GenerationRequest,
    failure_notice: Option<String>,
    error_notice: Option<String>,
}

impl ChainPart {
    fn new(request: GenerationRequest) -> Self {
        Self {
            request,
            failure_notice: None,
            error_notice: None,
        }
    }

    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }

    pub fn failure_notice(&self) -> Option<&str> {
        self.failure_notice.as_deref()
    }

    pub fn error_notice(&self) -> Option<&str> {
        self.error_notice.as_deref()
    }
}

/// Ordered, non-empty list of parts whose texts are joined with a blank line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainPlan {
    parts: Vec<ChainPart>,
}

impl ChainPlan {
    pub fn new(first: GenerationRequest) -> Self {
        Self {
            parts: vec![ChainPart::new(first)],
        }
    }

    pub fn try_from_requests(requests: Vec<GenerationRequest>) -> Result<Self, ApiError> {
        let mut iter = requests.into_iter();
        let first = iter.next().ok_or_else(|| {
            ApiError::InvalidInput("Chained generation needs at least one part".to_string())
        })?;
        Ok(iter.fold(Self::new(first), ChainPlan::then))
    }

    /// Append a part that uses the default notice on failure.
    pub fn then(mut self, request: GenerationRequest) -> Self {
        self.parts.push(ChainPart::new(request));
        self
    }

    /// Append a part with its own notice for an unusable reply.
    pub fn then_with_notice(mut self, request: GenerationRequest, notice: impl Into<String>) -> Self {
        self.parts.push(ChainPart {
            failure_notice: Some(notice.into()),
            ..ChainPart::new(request)
        });
        self
    }

    /// Append a part with its own notices for an unusable reply and for a
    /// request that never got one.
    pub fn then_with_notices(
        mut self,
        request: GenerationRequest,
        failure_notice: impl Into<String>,
        error_notice: impl Into<String>,
    ) -> Self {
        self.parts.push(ChainPart {
            request,
            failure_notice: Some(failure_notice.into()),
            error_notice: Some(error_notice.into()),
        });
        self
    }

    pub fn parts(&self) -> &[ChainPart] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Always false; a plan has at least one part.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Text appended when the part at `index` (0-based) gets a reply with no
    /// usable text.
    pub fn notice_for(&self, index: usize) -> String {
        self.parts
            .get(index)
            .and_then(|p| p.failure_notice.clone())
            .unwrap_or_else(|| DEFAULT_PART_NOTICE.replace("{k}", &(index + 1).to_string()))
    }

    /// Text appended when the part at `index` (0-based) fails in transport.
    pub fn error_notice_for(&self, index: usize) -> String {
        self.parts
            .get(index)
            .and_then(|p| p.error_notice.clone())
            .unwrap_or_else(|| DEFAULT_PART_ERROR_NOTICE.replace("{k}", &(index + 1).to_string()))
    }
}

/// Output of a tool's assembler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationPlan {
    Single(GenerationRequest),
    Chained(ChainPlan),
}

impl GenerationPlan {
    pub fn part_count(&self) -> usize {
        match self {
            GenerationPlan::Single(_) => 1,
            GenerationPlan::Chained(chain) => chain.len(),
        }
    }

    /// Instructions in issue order.
    pub fn instructions(&self) -> Vec<&str> {
        match self {
            GenerationPlan::Single(request) => vec![request.instruction()],
            GenerationPlan::Chained(chain) => chain
                .parts()
                .iter()
                .map(|p| p.request().instruction())
                .collect(),
        }
    }
}
