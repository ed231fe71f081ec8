pub mod selection;
pub mod transfer;
