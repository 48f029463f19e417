//! Property tests for rendering determinism.

use proptest::prelude::*;

use nagstage::domain::entities::{FieldValue, ObjectCollection, ObjectKind, ObjectRecord};
use nagstage::domain::services::ConfigWriter;
use nagstage::infrastructure::LocalFs;

fn host_entries() -> impl Strategy<Value = Vec<(String, String)>> {
    proptest::collection::btree_map(
        proptest::string::string_regex("[a-z]{1,8}[0-9]{0,2}").unwrap(),
        proptest::string::string_regex("10\\.[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}").unwrap(),
        1..12,
    )
    .prop_map(|hosts| hosts.into_iter().collect())
}

fn collection(entries: &[(String, String)]) -> ObjectCollection {
    entries.iter().fold(ObjectCollection::new(ObjectKind::Host), |c, (name, address)| {
        c.with(
            name.clone(),
            ObjectRecord::new()
                .with("host_name", FieldValue::scalar(name.clone()))
                .with("address", FieldValue::scalar(address.clone())),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: host insertion order never changes the rendered bytes.
    #[test]
    fn property_host_rendering_ignores_insertion_order(entries in host_entries()) {
        let fs = LocalFs::new();
        let writer = ConfigWriter::new(&fs);

        let forward = writer.render(&collection(&entries)).unwrap();
        let reversed: Vec<_> = entries.iter().rev().cloned().collect();
        let backward = writer.render(&collection(&reversed)).unwrap();

        prop_assert_eq!(forward, backward);
    }

    /// PROPERTY: every host gets exactly one block and one default `use` line.
    #[test]
    fn property_one_block_per_host(entries in host_entries()) {
        let fs = LocalFs::new();
        let rendered = ConfigWriter::new(&fs).render(&collection(&entries)).unwrap();

        prop_assert_eq!(rendered.matches("define host {\n").count(), entries.len());
        prop_assert_eq!(rendered.matches("generic-server").count(), entries.len());
    }
}
