//! Service lifecycle primitives.
//!
//! Manna's services are long-lived objects constructed by the registry,
//! initialized once at startup, and stopped at teardown. The lifecycle is
//! deliberately small: a service is created, running, or stopped.

use manna_core::error::MannaResult;

/// Lifecycle state of a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    /// Constructed but not yet initialized.
    Created,
    /// Initialized and operational.
    Running,
    /// Shut down.
    Stopped,
}

impl std::fmt::Display for ServiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Running => write!(f, "running"),
            Self::Stopped => write!(f, "stopped"),
        }
    }
}

/// Common interface the registry uses to drive every service.
pub trait Service: Send + Sync {
    /// Human-readable name of this service.
    fn name(&self) -> &str;

    /// Current state of this service.
    fn state(&self) -> ServiceState;

    /// Initialize the service. Called once during application startup.
    fn init(&mut self) -> MannaResult<()>;

    /// Gracefully shut down the service. Called during application teardown.
    fn shutdown(&mut self) -> MannaResult<()>;

    /// Health check. Returns true if the service is operational.
    fn is_healthy(&self) -> bool {
        self.state() == ServiceState::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoService {
        state: ServiceState,
    }

    impl Service for EchoService {
        fn name(&self) -> &str {
            "echo"
        }
        fn state(&self) -> ServiceState {
            self.state
        }
        fn init(&mut self) -> MannaResult<()> {
            self.state = ServiceState::Running;
            Ok(())
        }
        fn shutdown(&mut self) -> MannaResult<()> {
            self.state = ServiceState::Stopped;
            Ok(())
        }
    }

    #[test]
    fn test_healthy_only_while_running() {
        let mut svc = EchoService {
            state: ServiceState::Created,
        };
        assert!(!svc.is_healthy());
        svc.init().unwrap();
        assert_eq!(svc.state(), ServiceState::Running);
        assert!(svc.is_healthy());
        svc.shutdown().unwrap();
        assert_eq!(svc.state(), ServiceState::Stopped);
        assert!(!svc.is_healthy());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ServiceState::Created.to_string(), "created");
        assert_eq!(ServiceState::Running.to_string(), "running");
        assert_eq!(ServiceState::Stopped.to_string(), "stopped");
    }
}
