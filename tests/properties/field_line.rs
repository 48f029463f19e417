//! Property tests for attribute line formatting.

use proptest::prelude::*;

use nagstage::domain::services::writer::{field_line, VALUE_COLUMN};

fn short_key() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z_]{1,35}").unwrap()
}

fn long_key() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z_]{36,48}").unwrap()
}

fn value() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9!$.,_ -]{0,40}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: short keys put the value exactly at the value column.
    #[test]
    fn property_short_keys_align_values(key in short_key(), value in value()) {
        let line = field_line(&key, &value);

        prop_assert!(line.starts_with('\t'));
        prop_assert!(line.ends_with('\n'));
        prop_assert_eq!(&line[1 + VALUE_COLUMN..line.len() - 1], value.as_str());
    }

    /// PROPERTY: long keys are separated from the value by one tab.
    #[test]
    fn property_long_keys_use_tab(key in long_key(), value in value()) {
        let line = field_line(&key, &value);

        prop_assert_eq!(line, format!("\t{}\t{}\n", key, value));
    }
}
