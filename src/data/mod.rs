/// Data layer: core types and loading.
///
/// Architecture:
/// ```text
///  xor_grid.csv (x,y,z rows)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse rows → three flat columns → n×n reshape
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ SurfaceGrid  │  three n×n matrices (X, Y, Z)
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ renderer  │  projected, depth-sorted surface quads
///   └──────────┘
/// ```
pub mod loader;
pub mod model;
