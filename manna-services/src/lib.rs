//! Manna Services - Business logic and service layer.
//!
//! This crate provides the service trait, service registry, and the concrete
//! components behind daily verse delivery:
//! - Content table (static topic -> verse mapping with case-insensitive lookup)
//! - Rephraser (third-person verse text to first-person address)
//! - Recency tracker (repeat avoidance over a persisted sliding window)
//! - Time-slot generator (random future timestamps in the delivery window)
//! - Scheduler (cancel sweep, slot generation, content selection, registration)
//! - Settings persistence (topic, frequency, setup flag)
//! - Notification backend abstraction (desktop + in-memory implementations)
//! - Event bus (typed intra-service communication)

pub mod event_bus;
pub mod notify;
pub mod recency;
pub mod registry;
pub mod rephrase;
pub mod scheduler;
pub mod service;
pub mod settings;
pub mod slots;
pub mod verses;

// Re-export key types
pub use event_bus::{AppEvent, EventBus};
pub use notify::{DesktopBackend, MemoryBackend, NotificationBackend};
pub use recency::RecencyTracker;
pub use registry::ServiceRegistry;
pub use rephrase::RephrasedMessage;
pub use scheduler::SchedulerService;
pub use service::{Service, ServiceState};
pub use settings::SettingsService;
pub use slots::DeliveryWindow;
pub use verses::VerseRecord;
