// Application layer: wiring above the core service.

pub mod menu;
