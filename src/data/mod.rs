/// Data layer: typed tables, coordinate mapping and curve evaluation.
///
/// Architecture:
/// ```text
///   five .csv tables
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate → PhaseTables
///   └──────────┘
///        │
///        ├──────────────────────┐
///        ▼                      ▼
///   ┌──────────┐          ┌──────────┐
///   │  mapper   │          │  curve    │  polynomial → CompositionRecord stream
///   └──────────┘          └──────────┘
///        │                      │
///        └──────► TernaryPoint ◄┘
/// ```

pub mod curve;
pub mod loader;
pub mod mapper;
pub mod model;
