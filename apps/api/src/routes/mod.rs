//! HTTP routes, one file per resource.
//!
//! ```text
//!   /health                    health::health
//!   /api/quotes                quotes::router()
//!   /api/items                 items::router()
//! ```

pub mod health;
pub mod items;
pub mod quotes;
