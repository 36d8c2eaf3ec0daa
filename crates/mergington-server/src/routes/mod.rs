pub mod activities;
pub mod index;
