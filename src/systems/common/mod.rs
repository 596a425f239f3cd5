pub mod bundles;
pub mod components;
