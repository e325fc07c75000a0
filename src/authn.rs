use std::time::SystemTime;

/// An authenticated user or service principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    name: String,
}

impl Principal {
    /// Creates a principal with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the principal name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The outcome of a completed authentication flow.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    flow_id: String,
    principal: Principal,
    completed_at: SystemTime,
}

impl AuthenticationResult {
    /// Creates a result for `flow_id`, completed now.
    pub fn new(flow_id: impl Into<String>, principal: Principal) -> Self {
        Self {
            flow_id: flow_id.into(),
            principal,
            completed_at: SystemTime::now(),
        }
    }

    /// Overrides the completion instant.
    pub fn with_completed_at(mut self, completed_at: SystemTime) -> Self {
        self.completed_at = completed_at;
        self
    }

    /// Returns the identifier of the flow that produced this result.
    pub fn flow_id(&self) -> &str {
        &self.flow_id
    }

    /// Returns the authenticated principal.
    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    /// Returns the authenticated principal's name.
    pub fn principal_name(&self) -> &str {
        self.principal.name()
    }

    /// Returns when the flow completed.
    pub fn completed_at(&self) -> SystemTime {
        self.completed_at
    }
}

/// Subcontext tracking authentication within a request.
///
/// The result is only present once a flow has completed.
#[derive(Debug, Clone, Default)]
pub struct AuthenticationContext {
    result: Option<AuthenticationResult>,
}

impl AuthenticationContext {
    /// Creates a context with no completed result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the completed result, if any.
    pub fn result(&self) -> Option<&AuthenticationResult> {
        self.result.as_ref()
    }

    /// Records the completed result, replacing any earlier one.
    pub fn set_result(&mut self, result: AuthenticationResult) {
        self.result = Some(result);
    }

    /// Removes and returns the completed result.
    pub fn take_result(&mut self) -> Option<AuthenticationResult> {
        self.result.take()
    }
}
