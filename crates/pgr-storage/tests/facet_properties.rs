//! Facet formatting and parsing agree

use pgr_storage::{parse_store_type, MappingInfo, TypeMappingSource};
use proptest::prelude::*;

fn base_names() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("character varying"),
        Just("character"),
        Just("bit varying"),
        Just("numeric"),
        Just("timestamp with time zone"),
        Just("timestamp without time zone"),
        Just("time without time zone"),
        Just("interval"),
    ]
}

proptest! {
    #[test]
    fn resolved_facets_round_trip(base in base_names(), a in 1u32..1000, b in 0u32..20) {
        let source = TypeMappingSource::with_defaults();
        let plain = source.find_mapping_for_store_type(base).unwrap().unwrap();
        let scale = if base == "numeric" { Some(b) } else { None };
        let faceted = plain.with_facets(Some(a), Some(a), scale);

        let parsed = parse_store_type(faceted.store_type());
        prop_assert_eq!(parsed.base.as_str(), base);
        prop_assert_eq!(parsed.base.as_str(), faceted.store_type_base());

        // resolving the generated name yields the same facets
        let again = source
            .find_mapping(&MappingInfo::for_store_type(faceted.store_type()))
            .unwrap()
            .unwrap();
        prop_assert_eq!(again.store_type(), faceted.store_type());
        prop_assert_eq!(again.size(), faceted.size());
        prop_assert_eq!(again.precision(), faceted.precision());
        prop_assert_eq!(again.scale(), faceted.scale());
    }
}
