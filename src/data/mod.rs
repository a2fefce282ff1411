/// Data layer: launch records, acquisition, and filtering.
///
/// Architecture:
/// ```text
///  built-in sample  /  .parquet / .json / .csv
///        │                  │
///        ▼                  ▼
///   ┌──────────┐      ┌──────────┐
///   │  sample   │      │  loader   │  rows → validated records
///   └──────────┘      └──────────┘
///        │                  │
///        └────────┬─────────┘
///                 ▼
///         ┌───────────────┐
///         │ LaunchDataset │  read-only rows, site index, payload bounds
///         └───────────────┘
///                 │
///                 ▼
///           ┌──────────┐
///           │  filter   │  site + payload predicates → borrowed rows
///           └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod sample;
