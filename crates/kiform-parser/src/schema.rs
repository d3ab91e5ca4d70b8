//! Building blocks for entity schemas.
//!
//! A document schema maps a generic [`Node`](crate::Node) onto a typed entity
//! and back. The pieces here are shared by every schema:
//!
//! - [`Fields`] walks the children of one node, coercing positional atoms
//!   and reporting shape problems with the right [`ErrorCode`](crate::error::ErrorCode).
//! - [`Keyword`] and the [`keywords!`](crate::keywords) macro define closed
//!   sets of bare keywords, both for child tags and for enumerated values.
//! - [`FieldSpec`] describes an encoded field and when it is left out;
//!   [`NodeBuilder`] is the one place that applies those rules.
//!
//! # Example
//!
//! ```
//! # use kiform_parser::schema::{Elision, FieldSpec, Fields, NodeBuilder};
//! # use kiform_parser::parse;
//!
//! const OPACITY: FieldSpec<f64> = FieldSpec::new("opacity", Elision::IfDefault(1.0));
//!
//! let node = parse("(model \"a.wrl\" (opacity 0.5))").unwrap();
//! let mut fields = Fields::new(&node, "model");
//! let path = fields.next_text("path").unwrap();
//! fields.finish().unwrap();
//!
//! let encoded = NodeBuilder::new("model")
//!     .string(path)
//!     .field(&OPACITY, &1.0)
//!     .build();
//! assert!(encoded.find("opacity").is_none());
//! ```

mod builder;
mod coerce;
mod fields;
mod keyword;

pub use builder::{Elision, FieldSpec, FieldValue, NodeBuilder};
pub use coerce::{boolean, integer, number};
pub use fields::Fields;
pub use keyword::Keyword;
