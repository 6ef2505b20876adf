//! Core building blocks shared by every resource: error taxonomy, field
//! values, pagination and search normalization.

pub mod error;
pub mod field;
pub mod normalize;
pub mod query;

pub use error::{ApiError, ApiResult, ConflictCode, FieldError};
pub use field::FieldValue;
pub use normalize::normalize_search;
pub use query::{Paginated, PaginationMeta};
