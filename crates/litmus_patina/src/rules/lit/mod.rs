//! Lit template rules.
//!
//! Based on [eslint-plugin-lit](https://github.com/43081j/eslint-plugin-lit).

mod attribute_value_entities;

pub use attribute_value_entities::{find_unencoded_entity, AttributeValueEntities};
