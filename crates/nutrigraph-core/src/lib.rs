//! # NutriGraph Core
//!
//! Query and ranking engine over a bipartite evidence graph of foods and
//! biomarkers. Links are directed (food → biomarker) and carry an effect
//! direction, an evidence strength and citations.
//!
//! The graph is loaded once into an immutable [`store::GraphStore`]; every
//! view is a pure function recomputed from it:
//!
//! - **Connectivity**: incident-link counts and one-hop neighbor sets
//! - **Focus**: selection/hover highlighting, selection wins
//! - **Filter**: type/group subgraphs that keep their cross-type neighbors
//! - **Recommend**: foods ranked by evidence alignment, coverage and conflict
//! - **Catalog**: search, evidence listings, groups and headline stats
//!
//! ## Quick Start
//!
//! ```rust
//! use nutrigraph_core::prelude::*;
//!
//! let data = GraphData::new(
//!     vec![
//!         Node::new("oats", "Oats", NodeType::Food, "Grains"),
//!         Node::new("ldl", "LDL Cholesterol", NodeType::Biomarker, "Lipids"),
//!     ],
//!     vec![Link::new("oats", "ldl", Effect::Decrease, Strength::High)],
//! );
//! let store = GraphStore::new(data);
//!
//! let query = RecommendQuery::new().target("ldl", Direction::Decrease);
//! let set = recommend(&store, &query);
//! assert_eq!(set.recommendations[0].food.id.as_str(), "oats");
//! ```

pub mod catalog;
pub mod connectivity;
pub mod error;
pub mod filter;
pub mod focus;
pub mod papers;
pub mod prelude;
pub mod recommend;
pub mod session;
pub mod source;
pub mod store;
pub mod types;
