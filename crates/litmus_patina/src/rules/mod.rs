//! Lint rules for markup in tagged templates.

pub mod lit;
