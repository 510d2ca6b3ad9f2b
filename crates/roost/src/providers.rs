//! The model-client seam. The session only ever talks to the [`base::Provider`]
//! trait; swap in a real client without touching the session code.
pub mod base;
pub mod mock;
pub mod placeholder;
