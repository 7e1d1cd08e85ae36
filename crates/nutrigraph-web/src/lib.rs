//! # NutriGraph Web
//!
//! Read-only HTTP service over the food/biomarker evidence graph. The graph
//! loads once in the background at startup; until then graph endpoints
//! answer `503` with `{"status": "loading"}`.
//!
//! ## Quick Start
//!
//! ```bash
//! cargo run -p nutrigraph-web -- --source data/graph.json --port 8000
//! ```
//!
//! ## API Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Load status |
//! | GET | `/graph` | Full graph document |
//! | GET | `/search?q=` | Nodes whose label contains `q` |
//! | GET | `/node/:id` | One node with its links |
//! | GET | `/api/subgraph?type=&group=` | Filtered view with type counts |
//! | GET | `/api/neighbors/:id` | One-hop neighborhood and connectivity |
//! | POST | `/api/recommend` | Ranked foods for target biomarkers |
//! | GET | `/api/stats` | Headline statistics and most connected nodes |
//! | GET | `/api/groups` | Food and biomarker groups with counts |
//! | GET | `/api/papers?q=` | Deduplicated citations |
//! | GET | `/api/foods/:id/evidence` | Evidence for one food |
//! | GET | `/api/biomarkers/:id/evidence` | Evidence for one biomarker |
//! | GET | `/api/biomarkers/quick` | Most studied biomarkers |

pub mod error;
pub mod routes;
pub mod source;
pub mod state;

pub use error::ApiError;
pub use source::SourceSpec;
pub use state::AppState;
