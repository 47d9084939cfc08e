//! Embedded core SCIM resource definitions.
//!
//! This module provides the SCIM 1.x core `User` (with the enterprise user
//! extension) and `Group` definitions as static JSON strings, so a registry can
//! be built without any schema files on disk.

/// Returns the core User definition as a JSON string.
///
/// Attributes of the enterprise extension carry their own `schema`.
pub fn core_user_definition() -> &'static str {
    r#"{
  "name": "User",
  "schema": "urn:scim:schemas:core:1.0",
  "endpoint": "Users",
  "description": "SCIM core resource for representing users",
  "attributes": [
    { "name": "id", "type": "string", "readOnly": true, "required": true, "caseExact": true,
      "description": "Unique identifier for the SCIM Resource as defined by the Service Provider" },
    { "name": "meta", "type": "complex",
      "description": "A complex type containing metadata about the resource",
      "subAttributes": [
        { "name": "created", "type": "dateTime" },
        { "name": "lastModified", "type": "dateTime" },
        { "name": "location", "type": "string" },
        { "name": "version", "type": "string" },
        { "name": "attributes", "type": "string", "multiValued": true }
      ] },
    { "name": "externalId", "type": "string",
      "description": "Unique identifier for the Resource as defined by the Service Consumer" },
    { "name": "userName", "type": "string", "required": true,
      "description": "Unique identifier for the User, typically used to directly authenticate" },
    { "name": "name", "type": "complex",
      "description": "The components of the User's real name",
      "subAttributes": [
        { "name": "formatted", "type": "string" },
        { "name": "familyName", "type": "string" },
        { "name": "givenName", "type": "string" },
        { "name": "middleName", "type": "string" },
        { "name": "honorificPrefix", "type": "string" },
        { "name": "honorificSuffix", "type": "string" }
      ] },
    { "name": "displayName", "type": "string" },
    { "name": "nickName", "type": "string" },
    { "name": "profileUrl", "type": "string" },
    { "name": "title", "type": "string" },
    { "name": "userType", "type": "string" },
    { "name": "preferredLanguage", "type": "string" },
    { "name": "locale", "type": "string" },
    { "name": "timezone", "type": "string" },
    { "name": "active", "type": "boolean" },
    { "name": "password", "type": "string" },
    { "name": "emails", "type": "string", "multiValued": true,
      "canonicalValues": ["work", "home", "other"] },
    { "name": "phoneNumbers", "type": "string", "multiValued": true,
      "canonicalValues": ["fax", "pager", "other", "work", "home", "mobile"] },
    { "name": "ims", "type": "string", "multiValued": true,
      "canonicalValues": ["aim", "gtalk", "icq", "xmpp", "msn", "skype", "qq", "yahoo"] },
    { "name": "photos", "type": "string", "multiValued": true,
      "canonicalValues": ["photo", "thumbnail"] },
    { "name": "addresses", "type": "complex", "multiValued": true,
      "canonicalValues": ["work", "home", "other"],
      "subAttributes": [
        { "name": "formatted", "type": "string" },
        { "name": "streetAddress", "type": "string" },
        { "name": "locality", "type": "string" },
        { "name": "region", "type": "string" },
        { "name": "postalCode", "type": "string" },
        { "name": "country", "type": "string" }
      ] },
    { "name": "groups", "type": "string", "multiValued": true, "readOnly": true,
      "canonicalValues": ["direct", "indirect"] },
    { "name": "entitlements", "type": "string", "multiValued": true },
    { "name": "roles", "type": "string", "multiValued": true },
    { "name": "x509Certificates", "type": "binary", "multiValued": true },
    { "name": "employeeNumber", "schema": "urn:scim:schemas:extension:enterprise:1.0",
      "type": "string" },
    { "name": "costCenter", "schema": "urn:scim:schemas:extension:enterprise:1.0",
      "type": "string" },
    { "name": "organization", "schema": "urn:scim:schemas:extension:enterprise:1.0",
      "type": "string" },
    { "name": "division", "schema": "urn:scim:schemas:extension:enterprise:1.0",
      "type": "string" },
    { "name": "department", "schema": "urn:scim:schemas:extension:enterprise:1.0",
      "type": "string" },
    { "name": "manager", "schema": "urn:scim:schemas:extension:enterprise:1.0",
      "type": "complex",
      "subAttributes": [
        { "name": "managerId", "type": "string", "required": true },
        { "name": "displayName", "type": "string" }
      ] }
  ]
}"#
}

/// Returns the core Group definition as a JSON string.
pub fn core_group_definition() -> &'static str {
    r#"{
  "name": "Group",
  "schema": "urn:scim:schemas:core:1.0",
  "endpoint": "Groups",
  "description": "SCIM core resource for representing groups",
  "attributes": [
    { "name": "id", "type": "string", "readOnly": true, "required": true, "caseExact": true },
    { "name": "meta", "type": "complex",
      "subAttributes": [
        { "name": "created", "type": "dateTime" },
        { "name": "lastModified", "type": "dateTime" },
        { "name": "location", "type": "string" },
        { "name": "version", "type": "string" },
        { "name": "attributes", "type": "string", "multiValued": true }
      ] },
    { "name": "externalId", "type": "string" },
    { "name": "displayName", "type": "string", "required": true,
      "description": "A human readable name for the Group" },
    { "name": "members", "type": "string", "multiValued": true,
      "canonicalValues": ["User", "Group"],
      "description": "A list of members of the Group" }
  ]
}"#
}
