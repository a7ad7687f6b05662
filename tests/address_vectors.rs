use sitekey::{parse, routing_key, AddressBuilder, Key, KeyType, SiteKeyError};

const ROUTING: &str = "NfUYvxDwU9vqb2mh-qdT~DYJ6U0XNbxMGGoLe0aCHJs";
const CRYPTO: &str = "Miglsgix0VR56ZiPl4NgjnUd~UdrnHqIvXJ3KKHmxmI";
const EXTRA: &str = "AQACAAE";

const FIXED: &str = "SSK@NfUYvxDwU9vqb2mh-qdT~DYJ6U0XNbxMGGoLe0aCHJs,Miglsgix0VR56ZiPl4NgjnUd~UdrnHqIvXJ3KKHmxmI,AQACAAE/other-site/some/path.html";
const FIXED_FOLDED: &str = "SSK@NfUYvxDwU9vqb2mh-qdT~DYJ6U0XNbxMGGoLe0aCHJs,Miglsgix0VR56ZiPl4NgjnUd~UdrnHqIvXJ3KKHmxmI,AQACAAE/other-site-15/some/path.html";
const VERSIONED: &str = "USK@NfUYvxDwU9vqb2mh-qdT~DYJ6U0XNbxMGGoLe0aCHJs,Miglsgix0VR56ZiPl4NgjnUd~UdrnHqIvXJ3KKHmxmI,AQACAAE/other-site/15/some/path.html";

#[test]
fn builds_all_three_variants() {
    let builder = AddressBuilder::new(ROUTING, CRYPTO, EXTRA);
    let path = ["some", "path.html"];

    assert_eq!(
        builder.to_fixed_with_edition("other-site", 15, &path).unwrap(),
        FIXED_FOLDED
    );
    assert_eq!(builder.to_versioned("other-site", 15, &path).unwrap(), VERSIONED);
    assert_eq!(builder.to_fixed("other-site", &path).unwrap(), FIXED);
}

#[test]
fn fixed_address_round_trips() {
    for input in [FIXED, FIXED_FOLDED] {
        let key = parse(input).unwrap();
        let rebuilt = AddressBuilder::new(key.routing_key(), key.crypto_key(), key.extra())
            .to_fixed(key.site_name().unwrap(), key.path_segments())
            .unwrap();

        assert_eq!(rebuilt, input);
    }
}

#[test]
fn versioned_address_round_trips() {
    let key = parse(VERSIONED).unwrap();
    let edition = i64::try_from(key.edition().unwrap()).unwrap();

    let rebuilt = key
        .builder()
        .to_versioned(key.site_name().unwrap(), edition, key.path_segments())
        .unwrap();

    assert_eq!(rebuilt, VERSIONED);
}

#[test]
fn key_fields_identical_across_variants() {
    let key = parse(VERSIONED).unwrap();
    let builder = key.builder();
    let path = key.path_segments();

    let outputs = [
        builder.to_versioned("elsewhere", 3, path).unwrap(),
        builder.to_fixed("elsewhere", path).unwrap(),
        builder.to_fixed_with_edition("elsewhere", 3, path).unwrap(),
    ];

    for output in outputs {
        let reparsed = parse(&output).unwrap();
        assert_eq!(reparsed.routing_key(), key.routing_key());
        assert_eq!(reparsed.crypto_key(), key.crypto_key());
        assert_eq!(reparsed.extra(), key.extra());
    }
}

#[test]
fn folded_and_separate_editions_are_different_addresses() {
    let fixed = parse(FIXED_FOLDED).unwrap();
    let versioned = parse(VERSIONED).unwrap();

    assert_ne!(fixed, versioned);
    assert_eq!(fixed.key_type(), KeyType::Ssk);
    assert_eq!(fixed.site_name(), Some("other-site-15"));
    assert_eq!(fixed.edition(), None);
    assert_eq!(versioned.site_name(), Some("other-site"));
    assert_eq!(versioned.edition(), Some(15));

    assert_eq!(versioned.to_fixed_key().to_string(), FIXED_FOLDED);
    assert_eq!(fixed.to_versioned_key().unwrap().to_string(), VERSIONED);
}

#[test]
fn fast_path_agrees_with_full_parse() {
    for input in [FIXED, FIXED_FOLDED, VERSIONED] {
        assert_eq!(routing_key(input).unwrap(), parse(input).unwrap().routing_key());
    }
}

#[test]
fn malformed_addresses_never_produce_a_key() {
    let inputs = [
        "KSK@NfUYvxDwU9vqb2mh-qdT~DYJ6U0XNbxMGGoLe0aCHJs,Miglsgix0VR56ZiPl4NgjnUd~UdrnHqIvXJ3KKHmxmI,AQACAAE/other-site",
        "SSK@NfUYvxDwU9vqb2mh-qdT~DYJ6U0XNbxMGGoLe0aCHJs,Miglsgix0VR56ZiPl4NgjnUd~UdrnHqIvXJ3KKHmxmI/other-site",
        "SSK@NfUYvxDwU9vqb2mh-qdT~DYJ6U0XNbxMGGoLe0aCHJs/other-site",
        "USK@NfUYvxDwU9vqb2mh-qdT~DYJ6U0XNbxMGGoLe0aCHJs,Miglsgix0VR56ZiPl4NgjnUd~UdrnHqIvXJ3KKHmxmI,AQACAAE/other-site/fifteen",
        "",
    ];

    for input in inputs {
        assert!(
            matches!(parse(input), Err(SiteKeyError::MalformedAddress(_))),
            "{:?} should be malformed",
            input
        );
        assert!(input.parse::<Key>().is_err());
    }
}

#[test]
fn negative_edition_fails_construction() {
    let builder = AddressBuilder::new(ROUTING, CRYPTO, EXTRA);
    let path = ["index.html"];

    assert_eq!(
        builder.to_versioned("other-site", -15, &path),
        Err(SiteKeyError::InvalidEdition(-15))
    );
    assert_eq!(
        builder.to_fixed_with_edition("other-site", -15, &path),
        Err(SiteKeyError::InvalidEdition(-15))
    );
}

#[test]
fn keys_are_shareable_across_threads() {
    let key = parse(VERSIONED).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|edition| {
            let key = key.clone();
            std::thread::spawn(move || key.with_edition(edition).unwrap().to_string())
        })
        .collect();

    for (edition, handle) in handles.into_iter().enumerate() {
        assert!(handle
            .join()
            .unwrap()
            .ends_with(&format!("/other-site/{}/some/path.html", edition)));
    }
}

#[test]
fn largest_edition_round_trips() {
    let input = "USK@NfUYvxDwU9vqb2mh-qdT~DYJ6U0XNbxMGGoLe0aCHJs,Miglsgix0VR56ZiPl4NgjnUd~UdrnHqIvXJ3KKHmxmI,AQACAAE/site/9223372036854775807";
    let key = parse(input).unwrap();
    let edition = i64::try_from(key.edition().unwrap()).unwrap();
    let no_path: [&str; 0] = [];

    assert_eq!(
        key.builder()
            .to_versioned(key.site_name().unwrap(), edition, &no_path)
            .unwrap(),
        input
    );
}

#[test]
fn edition_past_signed_range_is_malformed() {
    let input = "USK@NfUYvxDwU9vqb2mh-qdT~DYJ6U0XNbxMGGoLe0aCHJs,Miglsgix0VR56ZiPl4NgjnUd~UdrnHqIvXJ3KKHmxmI,AQACAAE/site/9223372036854775808";
    assert!(matches!(parse(input), Err(SiteKeyError::MalformedAddress(_))));
}

#[test]
fn builder_rejects_site_name_that_spans_segments() {
    let builder = AddressBuilder::new(ROUTING, CRYPTO, EXTRA);

    assert!(matches!(
        builder.to_fixed("", &["index.html"]),
        Err(SiteKeyError::MalformedAddress(_))
    ));
    assert!(matches!(
        builder.to_fixed("a/b", &["index.html"]),
        Err(SiteKeyError::MalformedAddress(_))
    ));
}
