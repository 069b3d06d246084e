pub mod inventory_handler;

pub use inventory_handler::{INVENTORY_STATUS, inventory_status};
