//! # Pathwise Web
//!
//! HTTP API serving learning paths from an immutable [`PathEngine`](pathwise_rank::PathEngine).
//!
//! ## Quick Start
//!
//! ```bash
//! # Start the server with ./pathwise.toml (or defaults)
//! cargo run -p pathwise-web -- --port 5000
//!
//! curl -s localhost:5000/api/get-learning-path \
//!   -H 'content-type: application/json' \
//!   -d '{"known_topic": "Introduction to Python", "goal_topic": "Decision Trees"}'
//! ```
//!
//! ## API Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Banner |
//! | GET | `/api/health` | Health and scoring mode |
//! | POST | `/api/get-learning-path` | Prerequisite path with ranked resources |
//! | GET | `/api/topics` | Curated topics, or goals reachable from `?known=` |
//! | POST | `/api/search` | Semantic search over the catalog |

pub mod routes;
pub mod state;
pub mod thumbnail;

pub use routes::create_router;
pub use state::AppState;
