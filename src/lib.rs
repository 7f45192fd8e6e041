// --- Module Structure ---

// Collaborator contracts and their in-process implementations.
pub mod auth;
pub mod controllers;
pub mod dom;

// Navigation core.
pub mod actions;
pub mod models;
pub mod navigator;
pub mod routes;

// Ambient services.
pub mod config;
pub mod dataset;
pub mod error;
pub mod telemetry;

// --- Public Re-exports ---

pub use auth::{AuthSignal, AuthState, AuthStateRef, StaticAuth};
pub use config::{AppConfig, Env};
pub use controllers::{ControllerLoader, LoaderState, LoggingLoader, RecordingLoader};
pub use dom::{DomAdapter, DomState, InMemoryDom};
pub use error::{ActionError, ConfigError, NavigationError, RouteError};
pub use models::{NavigationContext, NavigationOutcome, PageDescriptor, PageId};
pub use navigator::Navigator;

/// NavigatorState
///
/// Every dependency the navigator is constructed with. The collaborators are
/// trait objects so tests can swap in the recording and in-memory doubles.
#[derive(Clone)]
pub struct NavigatorState {
    /// Resolves the page controllers that pre-actions call into.
    pub loader: LoaderState,
    /// Current user presence and the one-time auth-resolved signal.
    pub auth: AuthStateRef,
    /// Document the panels, links, drawer and viewport live in.
    pub dom: DomState,
    pub config: AppConfig,
}
