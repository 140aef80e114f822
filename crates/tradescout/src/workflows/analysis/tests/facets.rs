use super::common::{analyzer, job, painting_sample, request};
use crate::workflows::analysis::domain::{
    AnalysisFacet, DetailKeyword, DetailSeverity, JobSize, KnownDetails,
};
use crate::workflows::analysis::Confidence;

#[test]
fn facets_are_independent_sections() {
    let analyzer = analyzer(painting_sample());

    let mut req = request("paint walls and ceilings in the house");
    req.facets = vec![AnalysisFacet::PriceFactors];
    let result = analyzer.analyze(&req).expect("analysis succeeds");

    assert!(result.price_factors.is_some());
    assert!(result.next_question.is_none());
    assert!(result.classification.is_none());
    assert!(result.missing_details.is_none());
    assert!(result.completion_check.is_none());

    let mut req = request("paint walls and ceilings in the house");
    req.facets = vec![AnalysisFacet::Classification];
    let result = analyzer.analyze(&req).expect("analysis succeeds");

    assert!(result.classification.is_some());
    assert!(result.price_factors.is_none());
}

#[test]
fn default_facets_are_question_and_classification() {
    let analyzer = analyzer(painting_sample());
    let result = analyzer
        .analyze(&request("paint walls and ceilings please"))
        .expect("analysis succeeds");

    assert!(result.classification.is_some());
    // Either a question fired or nothing was worth asking; the price and
    // completion sections must stay out regardless.
    assert!(result.price_factors.is_none());
    assert!(result.completion_check.is_none());
    assert!(result.missing_details.is_none());
}

#[test]
fn room_count_overrides_sample_majority_size() {
    let analyzer = analyzer(painting_sample());

    let mut req = request("paint my 2 bedrooms");
    req.facets = vec![AnalysisFacet::Classification];
    let result = analyzer.analyze(&req).expect("analysis succeeds");

    let classification = result.classification.expect("classification requested");
    assert_eq!(classification.size, Some(JobSize::Medium));
    assert!(classification.size_from_room_count);

    let mut req = request("repaint just one room for us");
    req.facets = vec![AnalysisFacet::Classification];
    let result = analyzer.analyze(&req).expect("analysis succeeds");
    let classification = result.classification.expect("classification requested");
    assert_eq!(classification.size, Some(JobSize::Small));
}

#[test]
fn classification_falls_back_to_sample_majority() {
    let analyzer = analyzer(painting_sample());

    let mut req = request("freshen up the paint throughout");
    req.facets = vec![AnalysisFacet::Classification];
    let result = analyzer.analyze(&req).expect("analysis succeeds");

    let classification = result.classification.expect("classification requested");
    assert_eq!(classification.category.as_deref(), Some("painting"));
    assert_eq!(classification.category_confidence_pct, Some(100.0));
    assert_eq!(classification.size, Some(JobSize::Medium));
    assert!(!classification.size_from_room_count);
}

#[test]
fn next_question_asks_about_dominant_surfaces_first() {
    // Ceilings appear in every sampled job, well past the 70% bar.
    let analyzer = analyzer(painting_sample());

    let mut req = request("paint walls and ceilings somewhere");
    req.facets = vec![AnalysisFacet::NextQuestion];
    let result = analyzer.analyze(&req).expect("analysis succeeds");

    let question = result.next_question.expect("a rule fires");
    assert_eq!(question.topic, "surfaces");
}

#[test]
fn covered_details_suppress_their_question() {
    let analyzer = analyzer(painting_sample());

    let mut req = request("paint walls and ceilings somewhere");
    req.facets = vec![AnalysisFacet::NextQuestion];
    req.known_details = KnownDetails {
        surfaces: vec!["ceilings".to_string(), "trims".to_string()],
        ..KnownDetails::default()
    };
    let result = analyzer.analyze(&req).expect("analysis succeeds");

    let question = result.next_question.expect("later rule fires");
    assert_ne!(question.topic, "surfaces");
}

#[test]
fn missing_details_are_tiered_and_sorted() {
    let analyzer = analyzer(painting_sample());

    let mut req = request("paint walls and ceilings around the place");
    req.facets = vec![AnalysisFacet::MissingDetails];
    let result = analyzer.analyze(&req).expect("analysis succeeds");

    let details = result.missing_details.expect("details requested");
    assert!(!details.is_empty());

    let ceilings = details
        .iter()
        .find(|detail| detail.detail == DetailKeyword::Ceilings)
        .expect("ceilings dominate the sample");
    assert_eq!(ceilings.severity, DetailSeverity::Critical);

    for pair in details.windows(2) {
        assert!(pair[0].frequency_pct >= pair[1].frequency_pct);
    }
}

#[test]
fn known_details_drop_out_of_missing_details() {
    let analyzer = analyzer(painting_sample());

    let mut req = request("paint walls and ceilings around the place");
    req.facets = vec![AnalysisFacet::MissingDetails];
    req.known_details = KnownDetails {
        surfaces: vec!["ceilings".to_string()],
        ..KnownDetails::default()
    };
    let result = analyzer.analyze(&req).expect("analysis succeeds");

    let details = result.missing_details.expect("details requested");
    assert!(details
        .iter()
        .all(|detail| detail.detail != DetailKeyword::Ceilings));
}

#[test]
fn price_factors_report_range_and_average() {
    // Priced sample: 1000, 3000, 5000 (zero-priced rows are excluded).
    let analyzer = analyzer(painting_sample());

    let mut req = request("paint walls and ceilings everywhere");
    req.facets = vec![AnalysisFacet::PriceFactors];
    let result = analyzer.analyze(&req).expect("analysis succeeds");

    let price = result.price_factors.expect("priced jobs exist");
    assert_eq!(price.minimum, 1000.0);
    assert_eq!(price.maximum, 5000.0);
    assert_eq!(price.average, 3000.0);
    assert_eq!(price.range, "$1000 - $5000");
    assert!(price
        .factors
        .iter()
        .any(|factor| factor.contains("ceilings")));
}

#[test]
fn price_facet_is_omitted_without_priced_jobs() {
    let analyzer = analyzer(vec![
        job("a", JobSize::Small, "paint the laundry walls", None),
        job("b", JobSize::Small, "paint the hallway walls", Some(0.0)),
        job("c", JobSize::Small, "paint the lounge walls", None),
    ]);

    let mut req = request("paint some walls for me");
    req.facets = vec![AnalysisFacet::PriceFactors];
    let result = analyzer.analyze(&req).expect("analysis succeeds");

    assert!(result.price_factors.is_none());
}

#[test]
fn completion_check_requires_category_and_size() {
    let analyzer = analyzer(painting_sample());

    let mut req = request("paint walls and ceilings again");
    req.facets = vec![AnalysisFacet::CompletionCheck];
    let result = analyzer.analyze(&req).expect("analysis succeeds");

    let check = result.completion_check.expect("check requested");
    // Category and size both derive from the sample, so nothing required
    // is missing even with empty known details.
    assert!(check.ready);
    assert!(check.missing_required.is_empty());
    assert!(check.missing_nice_to_have.contains(&"timing"));
}

#[test]
fn completion_check_flags_missing_required_fields() {
    // An archive of unsized, category-less jobs gives the classifier
    // nothing to derive from.
    let analyzer = analyzer(vec![job(
        "vague",
        JobSize::NotApplicable,
        "general handyman visit",
        None,
    )]);

    let mut req = request("need some general help around");
    req.facets = vec![AnalysisFacet::CompletionCheck];
    let result = analyzer.analyze(&req).expect("analysis succeeds");

    let check = result.completion_check.expect("check requested");
    // Size still derives (NotApplicable counts); category derives from
    // the sample category, so the job is quotable.
    assert!(check.ready);
    assert_eq!(result.confidence, Confidence::Low);
}
