//! JSON codec.
//!
//! Wire shape of a resource:
//!
//! ```json
//! {
//!   "schemas": [{"uri": "urn:scim:schemas:core:1.0"},
//!               {"uri": "urn:scim:schemas:extension:enterprise:1.0"}],
//!   "userName": "bjensen",
//!   "emails": [{"value": "bjensen@example.com", "type": "work"}],
//!   "urn:scim:schemas:extension:enterprise:1.0": {"department": "Tour"}
//! }
//! ```
//!
//! Primary schema attributes sit at the top level; every other schema's
//! attributes are nested under an object keyed by its URN.

mod marshaller;
mod unmarshaller;

pub use marshaller::JsonMarshaller;
pub use unmarshaller::JsonUnmarshaller;

use serde_json::{Map, Value};

pub(crate) const RESOURCES: &str = "Resources";
pub(crate) const TOTAL_RESULTS: &str = "totalResults";
pub(crate) const ITEMS_PER_PAGE: &str = "itemsPerPage";
pub(crate) const START_INDEX: &str = "startIndex";
pub(crate) const ERRORS: &str = "Errors";
pub(crate) const CODE: &str = "code";
pub(crate) const DESCRIPTION: &str = "description";

/// Look up an object member, preferring an exact key match and falling back
/// to an ASCII case-insensitive one.
pub(crate) fn get_ignore_case<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key).or_else(|| {
        object
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    })
}
