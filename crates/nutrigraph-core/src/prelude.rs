//! NutriGraph Core Prelude - convenient imports for common usage.
//!
//! ```rust
//! use nutrigraph_core::prelude::*;
//! ```

pub use crate::types::{
    Citation, Direction, Effect, GraphData, Link, Node, NodeId, NodeType, Strength, TypeCounts,
};

pub use crate::store::GraphStore;
pub use crate::connectivity::ConnectivityIndex;
pub use crate::focus::FocusState;
pub use crate::filter::{filter_subgraph, SubgraphFilter, TypeFilter};
pub use crate::recommend::{
    recommend, recommend_with, score_foods,
    BiomarkerMatch, FoodRecommendation, RecommendQuery, RecommendationSet,
    RecommendationSummary, ScoringWeights,
};
pub use crate::catalog::{
    biomarker_evidence, catalog_stats, food_evidence, groups, node_details,
    quick_biomarkers, search, search_with_group, top_connected,
    CatalogStats, EvidenceEntry, GroupCount, NodeDetails, RankedNode,
};
pub use crate::papers::{papers, search_papers, PaperConnection, PaperEntry};
pub use crate::session::{GraphSession, LoadStatus};
pub use crate::source::{parse_graph, GraphSource, JsonFileSource, StaticSource};

pub use crate::error::{NutriError, Result};
