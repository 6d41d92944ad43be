//! # historify-web
//!
//! Axum integration for history recording. The only concern here is making
//! the caller's identity visible to the recorder's actor resolution for the
//! duration of each request.
//!
//! ```rust,ignore
//! let app = Router::new()
//!     .route("/widgets/:id", put(update_widget))
//!     .layer(axum::middleware::from_fn(historify_web::identity_scope))
//!     .layer(session_layer); // inserts `SessionUser` into request extensions
//! ```

pub mod middleware;

pub use middleware::{identity_scope, request_identity};
