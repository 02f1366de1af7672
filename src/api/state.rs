//! Application state for the Compensated Hours Engine API.

use std::sync::Arc;

use crate::service::CompensationService;

/// Shared application state.
///
/// Every handler reaches the engine through the same service instance.
#[derive(Clone)]
pub struct AppState {
    service: Arc<CompensationService>,
}

impl AppState {
    /// Creates a new application state around `service`.
    pub fn new(service: CompensationService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Returns the engine service.
    pub fn service(&self) -> &CompensationService {
        &self.service
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone + Send + Sync + 'static>() {}
        assert_clone::<AppState>();
    }
}
