//! Property tests: what a codec writes, it reads back unchanged.

use crate::common::{TEST_CORE, TEST_EXTENSION, overlapping_descriptor, user_descriptor};
use proptest::prelude::*;
use scim_sdk::marshal::{JsonMarshaller, JsonUnmarshaller, XmlMarshaller, XmlUnmarshaller};
use scim_sdk::resource::{Entry, GenericResource, Name, UserResource};
use scim_sdk::{Format, Marshaller, ScimAttribute, ScimObject, ScimResource, SimpleValue, Unmarshaller};
use std::sync::Arc;

fn text() -> impl Strategy<Value = String> {
    "[A-Za-z0-9@._&<> -]{1,24}"
}

fn email() -> impl Strategy<Value = Entry> {
    (text(), prop::option::of("work|home|other"), prop::option::of(any::<bool>())).prop_map(
        |(value, entry_type, primary)| Entry {
            value: Some(value),
            entry_type,
            primary,
            display: None,
            operation: None,
        },
    )
}

fn user() -> impl Strategy<Value = UserResource> {
    (
        text(),
        prop::option::of((text(), text())),
        prop::option::of(any::<bool>()),
        prop::collection::vec(email(), 0..4),
        prop::option::of(text()),
    )
        .prop_map(|(user_name, name, active, emails, department)| {
            let descriptor = user_descriptor();
            let mut user = UserResource::new(Arc::clone(&descriptor));
            user.set_user_name(&user_name).unwrap();
            if let Some((given, family)) = name {
                user.set_name(&Name::new_simple(given, family)).unwrap();
            }
            if let Some(active) = active {
                user.set_active(active).unwrap();
            }
            user.set_emails(&emails).unwrap();
            if let Some(department) = department {
                let attribute = descriptor
                    .get_attribute(scim_sdk::schema::SCHEMA_URI_ENTERPRISE_EXTENSION, "department")
                    .unwrap();
                user.scim_object_mut()
                    .add_attribute(
                        ScimAttribute::simple(Arc::clone(attribute), SimpleValue::string(department))
                            .unwrap(),
                    )
                    .unwrap();
            }
            user
        })
}

fn round_trip(format: Format, user: &UserResource) -> UserResource {
    let descriptor = user.descriptor();
    let mut bytes = Vec::new();
    match format {
        Format::Json => {
            JsonMarshaller::new().marshal(user, &mut bytes).unwrap();
            JsonUnmarshaller::new()
                .unmarshal(bytes.as_slice(), descriptor, &UserResource::from_parts)
                .unwrap()
        }
        Format::Xml => {
            XmlMarshaller::new().marshal(user, &mut bytes).unwrap();
            XmlUnmarshaller::new()
                .unmarshal(bytes.as_slice(), descriptor, &UserResource::from_parts)
                .unwrap()
        }
    }
}

proptest! {
    #[test]
    fn json_round_trip_preserves_user(user in user()) {
        prop_assert_eq!(round_trip(Format::Json, &user), user);
    }

    #[test]
    fn xml_round_trip_preserves_user(user in user()) {
        prop_assert_eq!(round_trip(Format::Xml, &user), user);
    }

    #[test]
    fn json_and_xml_read_the_same_user(user in user()) {
        let json = round_trip(Format::Json, &user);
        let xml = round_trip(Format::Xml, &user);
        prop_assert_eq!(json.scim_object(), xml.scim_object());
    }

    #[test]
    fn overlapping_names_stay_in_their_schema(core in text(), extension in text()) {
        let descriptor = overlapping_descriptor();
        let mut object = ScimObject::new();
        for (schema, value) in [(TEST_CORE, &core), (TEST_EXTENSION, &extension)] {
            let attribute = descriptor.get_attribute(schema, "title").unwrap();
            object
                .add_attribute(ScimAttribute::simple(Arc::clone(attribute), SimpleValue::string(value.as_str())).unwrap())
                .unwrap();
        }
        let resource = GenericResource::new(Arc::clone(&descriptor), object);

        for format in [Format::Json, Format::Xml] {
            let mut bytes = Vec::new();
            format.marshal(&resource, &mut bytes).unwrap();
            let read: GenericResource = format
                .unmarshal(bytes.as_slice(), &descriptor, &GenericResource::from_parts)
                .unwrap();
            prop_assert_eq!(&read, &resource);
        }
    }
}
