//! Integration tests for the AI finder pipeline: agent reply in, display
//! results out.

#![allow(clippy::unwrap_used)]

use auralos_core::finder::{FALLBACK_REASONING, parse_candidates, reconcile};
use auralos_core::{Confidence, FinderError, FinderResults};
use auralos_integration_tests::bundled_resolver;
use rand::SeedableRng;
use rand::rngs::StdRng;

const AGENT_REPLY: &str = r#"Based on the photo, these are the closest items:

```json
[
  {"productName": "Tinsla (Bordo)", "score": 94, "reasoning": "Same burgundy knit upper", "pros": ["Lightweight"], "cons": ["Limited sizes"]},
  {"productName": "Noemia (Black)", "score": 71, "reasoning": "Similar silhouette", "pros": [], "cons": []},
  {"productName": "Velvet Mule (Emerald)", "score": 88, "reasoning": "Color match", "pros": [], "cons": []},
  {"productName": "Tinsla", "score": 65, "reasoning": "Same line", "pros": [], "cons": []},
  {"productName": "Kaydienh (Dark Brown)", "score": 80, "reasoning": "Heel height", "pros": [], "cons": []},
  {"productName": "tinsla (bordo)", "score": 50, "reasoning": "Repeat", "pros": [], "cons": []}
]
```"#;

#[test]
fn test_reply_to_results() {
    let resolver = bundled_resolver().unwrap();
    let records = parse_candidates(AGENT_REPLY).unwrap();
    assert_eq!(records.len(), 6);

    let matches = reconcile(&resolver, &records);
    let ids: Vec<i64> = matches.iter().map(|m| m.product.id.as_i64()).collect();
    assert_eq!(ids, vec![16, 1, 7]);

    let first = matches.first().unwrap();
    assert_eq!(first.reasoning, "Same burgundy knit upper");
    assert_eq!(first.pros, vec!["Lightweight".to_string()]);
    assert_eq!(first.cons, vec!["Limited sizes".to_string()]);

    let mut rng = StdRng::seed_from_u64(11);
    let results = FinderResults::build(matches, resolver.index(), 3, &mut rng);
    assert_eq!(results.confidence, Confidence::Matched);
    assert_eq!(results.total_matches, 3);
    assert_eq!(results.top_three.len(), 3);
    assert!(results.additional_results.is_empty());
}

#[test]
fn test_all_unmatched_reply_is_labeled_fallback() {
    let resolver = bundled_resolver().unwrap();
    let reply = r#"[{"productName": "Velvet Mule (Emerald)", "score": 90}, {"productName": "Tinsla", "score": 85}]"#;

    let matches = reconcile(&resolver, &parse_candidates(reply).unwrap());
    assert!(matches.is_empty());

    let mut rng = StdRng::seed_from_u64(5);
    let results = FinderResults::build(matches, resolver.index(), 3, &mut rng);

    assert_eq!(results.confidence, Confidence::LowConfidenceFallback);
    assert_eq!(results.total_matches, 0);
    assert_eq!(results.confirmed().count(), 0);
    assert_eq!(results.top_three.len(), 3);
    for suggestion in &results.top_three {
        assert_eq!(suggestion.reasoning, FALLBACK_REASONING);
        assert!(resolver.index().contains(suggestion.product.id));
    }

    let json = serde_json::to_value(&results).unwrap();
    assert_eq!(json["confidence"], "low_confidence_fallback");
}

#[test]
fn test_fallback_is_reproducible_with_seed() {
    let resolver = bundled_resolver().unwrap();
    let pick = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        FinderResults::build(Vec::new(), resolver.index(), 3, &mut rng)
            .top_three
            .into_iter()
            .map(|m| m.product.id)
            .collect::<Vec<_>>()
    };
    assert_eq!(pick(99), pick(99));
}

#[test]
fn test_reply_without_array_is_an_error() {
    assert!(matches!(
        parse_candidates("Sorry, I couldn't identify the product."),
        Err(FinderError::NoJsonArray)
    ));
}
