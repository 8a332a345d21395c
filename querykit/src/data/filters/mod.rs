//! Query filter system
//!
//! Immutable, parameterised SQL predicates that compose with AND/OR.
//! Column builders mint a fresh named parameter per comparison; combinators
//! group filters, drop empty ones and refuse to merge clashing parameters.
//!
//! ## Usage
//!
//! ```
//! use querykit::data::filters::{and, column, or};
//!
//! let filter = and([
//!     or([]).unwrap(),
//!     or([
//!         column("name").is_equal_to("test"),
//!         column("value").is_greater_than(12),
//!     ])
//!     .unwrap(),
//! ])
//! .unwrap();
//!
//! assert!(filter.sql().starts_with("(name = :"));
//! assert_eq!(filter.params().len(), 2);
//! ```

mod column;
mod error;
mod group;
mod param_id;
mod parser;
mod types;
mod value;

pub use column::{ColumnFilter, column};
pub use error::FilterError;
pub use group::{GroupOp, and, empty, group, or};
pub use param_id::{PARAM_ID_LEN, unique_parameter_id};
pub use parser::{FilterSpec, parse_filter, parse_filter_spec, validate_identifier};
pub use types::{FilterParams, QueryFilter};
pub(crate) use types::placeholder_spans;
pub use value::FilterValue;
