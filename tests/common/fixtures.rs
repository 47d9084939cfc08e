//! Wire documents in the SCIM 1.x shapes.

/// Examples modelled on the SCIM 1.1 core schema document.
pub mod scim_examples {
    use scim_sdk::schema::{SCHEMA_URI_CORE, SCHEMA_URI_ENTERPRISE_EXTENSION};
    use serde_json::{Value, json};

    /// Single-schema user with flat attributes.
    pub fn user_minimal() -> Value {
        json!({
            "schemas": [SCHEMA_URI_CORE],
            "id": "2819c223-7f76-453a-919d-413861904646",
            "userName": "bjensen@example.com"
        })
    }

    /// Core user with the enterprise extension nested under its URN.
    pub fn user_enterprise() -> Value {
        json!({
            "schemas": [SCHEMA_URI_CORE, SCHEMA_URI_ENTERPRISE_EXTENSION],
            "id": "2819c223-7f76-453a-919d-413861904646",
            "externalId": "bjensen",
            "userName": "bjensen@example.com",
            "name": {
                "formatted": "Ms. Barbara J Jensen III",
                "familyName": "Jensen",
                "givenName": "Barbara"
            },
            "displayName": "Babs Jensen",
            "active": true,
            "emails": [
                { "value": "bjensen@example.com", "type": "work", "primary": true },
                { "value": "babs@jensen.org", "type": "home" }
            ],
            "phoneNumbers": [
                { "value": "555-555-8377", "type": "work" }
            ],
            SCHEMA_URI_ENTERPRISE_EXTENSION: {
                "employeeNumber": "701984",
                "costCenter": "4130",
                "department": "Tour Operations",
                "manager": { "managerId": "26118915-6090-4610-87e4-49d8ca9f808d", "displayName": "John Smith" }
            }
        })
    }

    pub fn group_basic() -> Value {
        json!({
            "schemas": [SCHEMA_URI_CORE],
            "id": "e9e30dba-f08f-4109-8486-d5c6a331660a",
            "displayName": "Tour Guides",
            "members": [
                { "value": "2819c223-7f76-453a-919d-413861904646", "display": "Babs Jensen" },
                { "value": "902c246b-6245-4190-8e05-00816be7344a", "display": "Mandy Pepperidge" }
            ]
        })
    }

    /// The same enterprise user in XML.
    pub fn user_enterprise_xml() -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<scim:User xmlns:scim="{core}" xmlns:n0="{ext}">
  <scim:id>2819c223-7f76-453a-919d-413861904646</scim:id>
  <scim:userName>bjensen@example.com</scim:userName>
  <scim:name>
    <scim:familyName>Jensen</scim:familyName>
    <scim:givenName>Barbara</scim:givenName>
  </scim:name>
  <scim:active>true</scim:active>
  <scim:emails>
    <scim:email>
      <scim:value>bjensen@example.com</scim:value>
      <scim:type>work</scim:type>
      <scim:primary>true</scim:primary>
    </scim:email>
  </scim:emails>
  <n0:department>Tour Operations</n0:department>
</scim:User>"#,
            core = SCHEMA_URI_CORE,
            ext = SCHEMA_URI_ENTERPRISE_EXTENSION
        )
    }
}
