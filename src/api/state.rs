//! Application state for the Payslip Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::pipeline::PayslipGenerator;

/// Shared application state.
///
/// Holds the payslip generator, which is immutable and shared by every
/// request, including those running on blocking worker threads.
#[derive(Clone)]
pub struct AppState {
    /// The configured payslip generator.
    generator: Arc<PayslipGenerator>,
}

impl AppState {
    /// Creates a new application state around a generator.
    pub fn new(generator: PayslipGenerator) -> Self {
        Self {
            generator: Arc::new(generator),
        }
    }

    /// Returns a reference to the generator.
    pub fn generator(&self) -> &PayslipGenerator {
        &self.generator
    }

    /// Returns a shared handle to the generator, for moving into other tasks.
    pub fn shared_generator(&self) -> Arc<PayslipGenerator> {
        Arc::clone(&self.generator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_clones_share_generator() {
        let state = AppState::new(PayslipGenerator::new(RenderConfig::default()));
        let other = state.clone();
        assert!(Arc::ptr_eq(
            &state.shared_generator(),
            &other.shared_generator()
        ));
    }
}
