//! XML codec.
//!
//! A resource is one element named after the resource type. Each schema URN
//! is bound to a namespace prefix: `scim` for the resource's primary schema,
//! `n0`, `n1`, ... for the others in declaration order. Attributes are child
//! elements qualified by their schema's prefix:
//!
//! ```xml
//! <scim:User xmlns:scim="urn:scim:schemas:core:1.0"
//!            xmlns:n0="urn:scim:schemas:extension:enterprise:1.0">
//!   <scim:userName>bjensen</scim:userName>
//!   <scim:emails>
//!     <scim:email><scim:value>bjensen@example.com</scim:value></scim:email>
//!   </scim:emails>
//!   <n0:department>Tour</n0:department>
//! </scim:User>
//! ```
//!
//! Attributes are looked up among the direct children of the resource
//! element by namespace and local name, so two schemas may share a local
//! name. Unqualified children belong to the resource element's namespace.

mod dom;
mod marshaller;
mod unmarshaller;

pub use marshaller::XmlMarshaller;
pub use unmarshaller::XmlUnmarshaller;

pub(crate) const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub(crate) const RESPONSE: &str = "Response";
pub(crate) const RESOURCES: &str = "Resources";
pub(crate) const RESOURCE: &str = "Resource";
pub(crate) const TOTAL_RESULTS: &str = "totalResults";
pub(crate) const ITEMS_PER_PAGE: &str = "itemsPerPage";
pub(crate) const START_INDEX: &str = "startIndex";
pub(crate) const ERRORS: &str = "Errors";
pub(crate) const ERROR: &str = "Error";
pub(crate) const CODE: &str = "code";
pub(crate) const DESCRIPTION: &str = "description";

/// Element name of one entry of a plural attribute: the attribute name
/// without its trailing `s` (`emails` -> `email`).
pub(crate) fn plural_entry_name(name: &str) -> &str {
    match name.strip_suffix('s') {
        Some(singular) if !singular.is_empty() => singular,
        _ => name,
    }
}
