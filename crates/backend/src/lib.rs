//! Mock session gateway for ZephyrPad.
//! ZephyrPad 的模擬工作階段閘道。
//!
//! The playground has no real backend; this crate simulates one behind the
//! same boundary the surface would call in production: latency-delayed
//! operations returning `{status, data, message}` envelopes, a template
//! catalogue, and opaque share URLs. State is never persisted.

mod gateway;
mod templates;

pub use gateway::{BackendResponse, MockBackend, ResponseStatus, SessionInit, ShareLink};
pub use templates::{catalogue, TemplateSummary, DEFAULT_TEMPLATE_ID};
