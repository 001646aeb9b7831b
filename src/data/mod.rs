/// Data layer: core types, loading, filtering and the session table store.
///
/// Architecture:
/// ```text
///   CSV bytes
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse bytes → Dataset      (and back: serialize)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │    store      │  full dataset + active view + filter flag
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  column == value (string form) → row subset
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod store;
