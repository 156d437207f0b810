//! Integration tests for PartType
//!
//! Tests keyword detection order and property extraction.

use mapline_query::PartType;

#[test]
fn longer_keywords_take_precedence() {
    let cases = [
        ("AgeLessThanEqual", PartType::LessThanEqual),
        ("AgeIsLessThan", PartType::LessThan),
        ("NameNotLike", PartType::NotLike),
        ("NameIsNotEmpty", PartType::IsNotEmpty),
        ("TagsNotContaining", PartType::NotContaining),
        ("TagsNotIn", PartType::NotIn),
        ("NameNot", PartType::NegatingSimpleProperty),
        ("NameEndsWith", PartType::EndingWith),
        ("NameMatches", PartType::Regex),
        ("ProfileExists", PartType::Exists),
        ("ActiveIsFalse", PartType::False),
    ];
    for (raw, expected) in cases {
        assert_eq!(PartType::from_property(raw), expected, "raw part {raw}");
    }
}

#[test]
fn plain_property_is_equality() {
    assert_eq!(PartType::from_property("Lastname"), PartType::SimpleProperty);
    assert_eq!(
        PartType::SimpleProperty.extract_property("LastnameIs"),
        "lastname"
    );
}

#[test]
fn extraction_strips_only_the_matched_keyword() {
    assert_eq!(
        PartType::LessThanEqual.extract_property("AgeIsLessThanEqual"),
        "age"
    );
    assert_eq!(
        PartType::Containing.extract_property("AddressCityContains"),
        "addressCity"
    );
}

#[test]
fn every_type_has_keywords() {
    for part_type in PartType::ALL {
        assert!(!part_type.keywords().is_empty(), "{part_type}");
        assert!(part_type.number_of_arguments() <= 2);
    }
    assert!(PartType::Near.is_geospatial());
    assert!(!PartType::Like.is_geospatial());
}
