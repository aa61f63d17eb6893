// Query scoring — fuzzy string similarity and multi-clause query relevance.

pub mod fuzzy;
pub mod query;
