//! Service layer: presence orchestration.

pub mod presence_service;

pub use presence_service::PresenceService;
