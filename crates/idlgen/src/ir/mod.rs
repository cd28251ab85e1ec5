//! Language-agnostic document model.
//!
//! This IR is produced by the IDL parser and consumed by the code generator.
//! It is read-only here: normalisation builds a new tree instead of mutating
//! the one it was given.

mod document;
mod identifier;
mod types;
mod value;

pub use document::{
    Const, Document, Enum, EnumField, Field, Function, Header, Include, Requiredness, Service,
    ServiceParent, Struct, StructKind,
};
pub use identifier::Identifier;
pub use types::Type;
pub use value::Value;
