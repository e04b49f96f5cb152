// src/consistency/mod.rs — Journaling consistency: streaks, tiers, engagement

pub mod insights;
pub mod model;
pub mod prompts;
pub mod reminders;
pub mod scoring;
pub mod service;

pub use model::{ConsistencyData, ConsistencyLevel, GoalProgress, ReminderFrequency, ReminderSettings};
pub use service::ConsistencyService;
