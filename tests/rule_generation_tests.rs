//! Integration tests for rule enumeration and dependency neighborhoods

use std::sync::Arc;

use pretty_assertions::assert_eq;

use brill_templates::feature::extractors::{Tag, Word};
use brill_templates::{
    Feature, PropertyExtractor, Template, TemplateRegistry, Token,
};

fn sentence() -> Vec<Token> {
    vec![
        Token::new("the", "DT"),
        Token::new("cat", "NN"),
        Token::new("sat", "VB"),
        Token::new("down", "RB"),
    ]
}

fn tag_template(registry: &mut TemplateRegistry, positions: &[isize]) -> Template {
    Template::from_features(registry, vec![Feature::new(Arc::new(Tag), positions)]).unwrap()
}

#[test]
fn test_no_rules_when_tag_already_correct() {
    let mut registry = TemplateRegistry::new();
    let template = tag_template(&mut registry, &[-1]);

    assert!(template.applicable_rules(&sentence(), 1, "NN").is_empty());
}

#[test]
fn test_single_feature_rule_payload() {
    let mut registry = TemplateRegistry::new();
    let template = tag_template(&mut registry, &[-1]);

    let rules = template.applicable_rules(&sentence(), 2, "NN");
    assert_eq!(rules.len(), 1);

    let rule = &rules[0];
    assert_eq!(rule.template_id, "000");
    assert_eq!(rule.original_tag, "VB");
    assert_eq!(rule.replacement_tag, "NN");
    assert_eq!(rule.conditions.len(), 1);
    assert_eq!(rule.conditions[0].value, "NN");
    assert_eq!(rule.conditions[0].feature.positions(), &[-1]);
}

#[test]
fn test_multi_position_feature_yields_one_rule_per_position() {
    let mut registry = TemplateRegistry::new();
    let template = tag_template(&mut registry, &[-2, -1]);

    let rules = template.applicable_rules(&sentence(), 2, "NN");
    let values: Vec<&str> = rules
        .iter()
        .map(|r| r.conditions[0].value.as_str())
        .collect();
    assert_eq!(values, vec!["DT", "NN"]);
}

#[test]
fn test_cartesian_product_across_features() {
    let mut registry = TemplateRegistry::new();
    let template = Template::from_features(
        &mut registry,
        vec![
            Feature::new(Arc::new(Tag), &[-1]),
            Feature::new(Arc::new(Word), &[0, 1]),
        ],
    )
    .unwrap();

    let rules = template.applicable_rules(&sentence(), 1, "VB");
    // one tag condition x two word conditions
    assert_eq!(rules.len(), 2);
    for rule in &rules {
        assert_eq!(rule.conditions.len(), 2);
        // feature order is preserved within each rule
        assert_eq!(rule.conditions[0].feature.property_name(), "Tag");
        assert_eq!(rule.conditions[1].feature.property_name(), "Word");
        assert_eq!(rule.conditions[0].value, "DT");
    }
    assert_eq!(rules[0].conditions[1].value, "cat");
    assert_eq!(rules[1].conditions[1].value, "sat");
}

#[test]
fn test_out_of_bounds_positions_shorten_condition_list() {
    let mut registry = TemplateRegistry::new();
    let template = tag_template(&mut registry, &[-1, 0]);

    // At index 0, offset -1 falls off the front; only offset 0 contributes.
    let rules = template.applicable_rules(&sentence(), 0, "NN");
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].conditions[0].value, "DT");
}

#[test]
fn test_fully_out_of_bounds_feature_yields_no_rules() {
    let mut registry = TemplateRegistry::new();
    let template = Template::from_features(
        &mut registry,
        vec![
            Feature::new(Arc::new(Tag), &[-1]),
            Feature::new(Arc::new(Word), &[0]),
        ],
    )
    .unwrap();

    // The Tag feature's only offset is out of bounds at index 0, emptying its
    // condition list; the whole product collapses.
    let rules = template.applicable_rules(&sentence(), 0, "NN");
    assert!(rules.is_empty());
}

#[test]
fn test_neighborhood_of_zero_offset_template_is_identity() {
    let mut registry = TemplateRegistry::new();
    let template = tag_template(&mut registry, &[0]);

    let tokens = sentence();
    for index in 0..tokens.len() {
        let neighborhood = template.neighborhood(&tokens, index);
        assert_eq!(neighborhood.into_iter().collect::<Vec<_>>(), vec![index]);
    }
}

#[test]
fn test_neighborhood_spans_feature_offsets() {
    let mut registry = TemplateRegistry::new();
    let template = Template::from_features(
        &mut registry,
        vec![
            Feature::new(Arc::new(Tag), &[-2, -1]),
            Feature::new(Arc::new(Word), &[1]),
        ],
    )
    .unwrap();

    let tokens = vec![
        Token::new("a", "X"),
        Token::new("b", "X"),
        Token::new("c", "X"),
        Token::new("d", "X"),
        Token::new("e", "X"),
        Token::new("f", "X"),
    ];

    // offsets span [-2, 1]: position p is affected iff 3 is in [p-2, p+1]
    let neighborhood = template.neighborhood(&tokens, 3);
    assert_eq!(neighborhood.into_iter().collect::<Vec<_>>(), vec![2, 3, 4, 5]);
}

#[test]
fn test_neighborhood_is_clipped_to_sequence_bounds() {
    let mut registry = TemplateRegistry::new();
    let template = tag_template(&mut registry, &[-2, -1]);

    let tokens = sentence();
    let neighborhood = template.neighborhood(&tokens, 0);
    assert_eq!(neighborhood.into_iter().collect::<Vec<_>>(), vec![0, 1, 2]);

    let neighborhood = template.neighborhood(&tokens, 3);
    assert_eq!(neighborhood.into_iter().collect::<Vec<_>>(), vec![3]);
}

/// Crude word-shape extractor, standing in for the richer properties a
/// downstream tagger might condition on.
#[derive(Debug)]
struct Shape;

impl PropertyExtractor for Shape {
    fn property_name(&self) -> &str {
        "Shape"
    }

    fn serialization_tag(&self) -> String {
        "!sh".to_string()
    }

    fn extract(&self, tokens: &[Token], index: usize) -> String {
        if tokens[index].word.chars().next().is_some_and(|c| c.is_uppercase()) {
            "upper".to_string()
        } else {
            "lower".to_string()
        }
    }
}

#[test]
fn test_custom_extractor_with_overridden_serialization_tag() {
    let feature = Feature::new(Arc::new(Shape), &[0]);
    assert_eq!(feature.serialization_tag(), "!sh");

    let mut registry = TemplateRegistry::new();
    let template = Template::from_features(&mut registry, vec![feature]).unwrap();

    let tokens = vec![Token::new("Paris", "NN")];
    let rules = template.applicable_rules(&tokens, 0, "NNP");
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].conditions[0].value, "upper");
}
