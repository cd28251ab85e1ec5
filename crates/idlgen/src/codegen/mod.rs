//! Code generation from the document IR.
//!
//! The generator never emits target code directly. For every construct it
//! builds a [`Dictionary`] of ready-made code fragments, and the dialect's
//! templates decide the layout:
//!
//! - `consts` - one file with all constants of a document
//! - `enum` - one file per enum
//! - `struct` / `union` - one file per struct, exception or union
//! - `service` - one file per service, with its argument and result structs

mod consts;
mod dictionary;
mod enums;
mod fragment;
mod services;
mod structs;

pub mod constants;
pub mod imports;
pub mod normalize;
pub mod types;

pub use consts::consts_dict;
pub use constants::ConstantGenerator;
pub use dictionary::{mark_ends, DictValue, Dictionary};
pub use enums::enum_dict;
pub use fragment::{quote, CodeFragment};
pub use imports::{imports_dicts, resolve_namespace};
pub use normalize::normalize_document;
pub use services::service_dict;
pub use structs::{struct_body, struct_dict};
pub use types::{TypeMapper, WireTag};
