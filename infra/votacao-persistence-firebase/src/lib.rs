pub mod firebase;
pub mod memory;
mod record;
