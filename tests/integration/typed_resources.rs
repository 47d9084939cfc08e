//! Typed resources through the codecs.

use crate::common::fixtures::scim_examples;
use crate::common::{group_descriptor, to_json, to_xml, user_descriptor};
use scim_sdk::marshal::{JsonUnmarshaller, XmlUnmarshaller};
use scim_sdk::resource::{Entry, GroupResource, Name, UserResource};
use scim_sdk::schema::{ResourceDescriptor, SCHEMA_URI_CORE};
use scim_sdk::{ScimError, ScimObject, ScimResource, ScimResult, Unmarshaller};
use std::sync::Arc;

#[test]
fn test_user_from_json() {
    let descriptor = user_descriptor();
    let json = scim_examples::user_enterprise().to_string();
    let user: UserResource = JsonUnmarshaller::new()
        .unmarshal(json.as_bytes(), &descriptor, &UserResource::from_parts)
        .unwrap();

    assert_eq!(user.id(), Some("2819c223-7f76-453a-919d-413861904646"));
    assert_eq!(user.external_id(), Some("bjensen"));
    assert_eq!(user.user_name(), Some("bjensen@example.com"));
    assert_eq!(user.display_name(), Some("Babs Jensen"));
    assert_eq!(user.active().unwrap(), Some(true));

    let name = user.name().unwrap();
    assert_eq!(name.given_name.as_deref(), Some("Barbara"));
    assert_eq!(name.formatted.as_deref(), Some("Ms. Barbara J Jensen III"));

    assert_eq!(user.emails().len(), 2);
    assert_eq!(user.primary_email().as_deref(), Some("bjensen@example.com"));
    assert_eq!(user.phone_numbers()[0].entry_type.as_deref(), Some("work"));
    assert_eq!(user.enterprise_attribute("costCenter"), Some("4130"));
}

#[test]
fn test_user_from_xml() {
    let descriptor = user_descriptor();
    let user: UserResource = XmlUnmarshaller::new()
        .unmarshal(
            scim_examples::user_enterprise_xml().as_bytes(),
            &descriptor,
            &UserResource::from_parts,
        )
        .unwrap();

    assert_eq!(user.user_name(), Some("bjensen@example.com"));
    assert_eq!(user.name().unwrap().family_name.as_deref(), Some("Jensen"));
    assert!(user.emails()[0].is_primary());
    assert_eq!(user.enterprise_attribute("department"), Some("Tour Operations"));
}

#[test]
fn test_built_user_is_written_in_both_formats() {
    let mut user = UserResource::new(user_descriptor());
    user.set_id("42").unwrap();
    user.set_user_name("ann").unwrap();
    user.set_name(&Name::new_simple("Ann", "Lee")).unwrap();
    user.set_active(false).unwrap();
    user.set_emails(&[
        Entry::new("ann@work.example").with_type("work").with_primary(true),
        Entry::new("ann@home.example").with_type("home"),
    ])
    .unwrap();

    let json = to_json(&user);
    assert_eq!(json["userName"], "ann");
    assert_eq!(json["name"]["familyName"], "Lee");
    assert_eq!(json["emails"][1]["type"], "home");
    assert_eq!(json["active"], "false");

    let xml = to_xml(&user);
    assert!(xml.contains("<scim:id>42</scim:id>"));
    assert!(xml.contains("<scim:active>false</scim:active>"));
    assert!(xml.contains(
        "<scim:email><scim:value>ann@work.example</scim:value><scim:type>work</scim:type><scim:primary>true</scim:primary></scim:email>"
    ));
}

#[test]
fn test_group_members_survive_xml() {
    let descriptor = group_descriptor();
    let json = scim_examples::group_basic().to_string();
    let group: GroupResource = JsonUnmarshaller::new()
        .unmarshal(json.as_bytes(), &descriptor, &GroupResource::from_parts)
        .unwrap();
    assert_eq!(group.display_name(), Some("Tour Guides"));
    assert_eq!(group.members().len(), 2);

    let xml = to_xml(&group);
    assert!(xml.contains("<scim:members><scim:member>"));
    let reread: GroupResource = XmlUnmarshaller::new()
        .unmarshal(xml.as_bytes(), &descriptor, &GroupResource::from_parts)
        .unwrap();
    assert_eq!(reread, group);
    assert_eq!(reread.members()[1].display.as_deref(), Some("Mandy Pepperidge"));
}

#[test]
fn test_closure_factory() {
    let descriptor = user_descriptor();
    let user_name = |_: &Arc<ResourceDescriptor>, object: ScimObject| -> ScimResult<String> {
        object
            .get_attribute(SCHEMA_URI_CORE, "userName")
            .and_then(|a| a.as_str())
            .map(str::to_string)
            .ok_or_else(|| ScimError::invalid_resource("User", "userName is required"))
    };

    let name = JsonUnmarshaller::new()
        .unmarshal(&br#"{"userName": "ann"}"#[..], &descriptor, &user_name)
        .unwrap();
    assert_eq!(name, "ann");

    let error = JsonUnmarshaller::new()
        .unmarshal(&br#"{"displayName": "Ann"}"#[..], &descriptor, &user_name)
        .unwrap_err();
    assert!(matches!(error, ScimError::InvalidResource { .. }));
}
