// Adapters layer: concrete implementations for external systems.
// Configuration providers stay under src/config; the store backends live here.

pub mod store;
