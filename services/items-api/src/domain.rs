// ドメイン層モジュール
pub mod item;
pub mod item_schema;
pub mod validation;
pub mod wire;

// 再エクスポート
pub use item::Item;
pub use item_schema::{
    DESCRIPTION_MAX_LENGTH, FieldUpdate, ItemCreate, ItemListResponse, ItemResponse, ItemUpdate,
    NAME_MAX_LENGTH, NAME_MIN_LENGTH,
};
pub use validation::{Constraint, FieldViolation, ValidationError};
pub use wire::{WireField, WireSchema, decode, decode_slice, to_camel_case};
