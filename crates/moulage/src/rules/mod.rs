//! Rewrite rules, one per macro kind.

mod component;
mod definition;
mod functional;
mod injections;
mod key_strip;
mod name;
mod props;
mod ts_type;
mod type_erasure;

pub(crate) use component::transform_components;
pub(crate) use functional::transform_functionals;
pub(crate) use injections::normalize_injections;
pub(crate) use key_strip::strip_key_macro;
pub(crate) use type_erasure::erase_type_annotations;
