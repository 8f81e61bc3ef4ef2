pub mod facets;
pub mod filter;
pub mod recommend;
pub mod state;

pub use facets::{source_facets, tag_facets, FacetCount};
pub use filter::visible;
pub use recommend::{pick_at, recommend};
pub use state::{FacetMode, FacetSelection, FilterState, SortDir, SortKey, SortSpec};
