//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod entry;
pub mod system_state;

// Re-export specific types to avoid conflicts
pub use entry::{Column as EntryColumn, Entity as Entry, Model as EntryModel};
pub use system_state::{
    Column as SystemStateColumn, Entity as SystemState, Model as SystemStateModel,
};
