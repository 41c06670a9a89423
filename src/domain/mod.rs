// Domain layer - Inventory records and the views derived from them
pub mod fallback;
pub mod inventory;
pub mod summary;
