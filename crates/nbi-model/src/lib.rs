//! Bridge inventory submission data model.
//!
//! One [`BridgeRecord`] per bridge, owning eight child collections (features
//! carry nested routes). Every scalar is kept as the submitted text so that
//! invalid-but-salvageable values survive until sanitization.
//!
//! Each entity type implements [`Entity`], which exposes an explicit field
//! schema and by-item accessors. Rules, the sanitizer and the border-bridge
//! "other populated fields" check all work through that schema instead of
//! inspecting struct layouts at runtime.

pub mod bridge;
pub mod dates;
pub mod element;
pub mod enums;
pub mod error;
pub mod fatal;
pub mod feature;
pub mod inspection;
pub mod keys;
pub mod numeric;
pub mod posting;
pub mod result;
pub mod schema;
pub mod structure;
pub mod work;

pub use bridge::BridgeRecord;
pub use element::Element;
pub use enums::{EntityKind, RecordStatus, Severity};
pub use error::{ModelError, Result};
pub use fatal::{FatalKey, FatalKeys};
pub use feature::{Feature, Route};
pub use inspection::Inspection;
pub use keys::{BridgeKey, EntityKey, RecordId};
pub use numeric::DecimalText;
pub use posting::{PostingEvaluation, PostingStatus};
pub use result::{FailedRule, Origin};
pub use dates::parse_date;
pub use schema::{DynEntity, Entity, FieldKind, FieldSpec, is_blank, trimmed};
pub use structure::{SpanSet, SubstructureSet};
pub use work::Work;
