pub mod guide_home;
pub mod reorder;
pub mod search;
pub mod taxonomy_filter;
