/// Data layer: core types, loading, caching, filtering, and export.
///
/// Architecture:
/// ```text
///   remote .csv / .tab
///         │
///         ▼
///    ┌──────────┐
///    │  loader   │  fetch + parse + dtype inference → Table
///    └──────────┘
///         │
///         ▼
///    ┌──────────┐
///    │  cache    │  one Table per source URL, process lifetime
///    └──────────┘
///         │
///         ▼
///    ┌──────────┐
///    │  filter   │  classify columns, apply predicates → filtered Table
///    └──────────┘
///         │
///         ▼
///    ┌──────────┐
///    │  export   │  filtered Table → CSV bytes for download
///    └──────────┘
/// ```
pub mod cache;
pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
