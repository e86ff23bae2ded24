use std::sync::Arc;
use std::thread;

use avenue_core::{
    map_duration, map_expected_return, Avenue, Dataset, DurationCategory, InvestorProfile,
    InvestorRecord, RecommendationEngine, ReturnCategory, RiskTier, ScoreMap, SegmentKind,
};

fn record(duration: DurationCategory, expect: ReturnCategory, scores: [f64; 7]) -> InvestorRecord {
    InvestorRecord::new(duration, expect, ScoreMap::new(scores))
}

/// Long-horizon segment whose means are Mutual 5.2, Equity 5.8, Gold 4.1.
fn survey() -> Dataset {
    Dataset::from_records(vec![
        record(
            DurationCategory::MoreThanFiveYears,
            ReturnCategory::TwentyToThirty,
            [5.0, 6.0, 3.0, 3.5, 4.0, 4.0, 4.0],
        ),
        record(
            DurationCategory::MoreThanFiveYears,
            ReturnCategory::TwentyToThirty,
            [5.4, 5.6, 3.0, 3.5, 4.0, 3.8, 4.2],
        ),
        record(
            DurationCategory::LessThanOneYear,
            ReturnCategory::TenToTwenty,
            [3.0, 2.0, 4.0, 4.5, 5.0, 4.8, 3.5],
        ),
        record(
            DurationCategory::OneToThreeYears,
            ReturnCategory::TwentyToThirty,
            [5.5, 4.5, 2.5, 3.0, 3.5, 3.0, 5.0],
        ),
    ])
}

fn engine() -> RecommendationEngine {
    RecommendationEngine::new(Arc::new(survey()))
}

fn approx(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}

#[test]
fn category_boundaries_are_exclusive_on_the_lower_side() {
    assert_eq!(map_duration(1.0), DurationCategory::OneToThreeYears);
    assert_eq!(map_duration(0.999), DurationCategory::LessThanOneYear);
    assert_eq!(map_expected_return(20.0), ReturnCategory::TwentyToThirty);
    assert_eq!(map_expected_return(19.999), ReturnCategory::TenToTwenty);
    assert_eq!(map_expected_return(30.0), ReturnCategory::ThirtyToForty);
}

#[test]
fn result_length_is_min_of_top_n_and_avenue_count() {
    let engine = engine();

    for top_n in [-3_i64, 0, 1, 3, 7, 8, 100] {
        let profile = InvestorProfile::new(2.0, 25.0).with_top_n(top_n);
        let ranked = engine.recommend(&profile, false).expect("recommendation").ranked;

        let expected = if top_n <= 0 { 0 } else { top_n.min(7) as usize };
        assert_eq!(ranked.len(), expected, "top_n = {top_n}");
        assert!(ranked.windows(2).all(|pair| pair[0].score >= pair[1].score));
    }
}

#[test]
fn unrecognized_risk_level_leaves_scores_untouched() {
    let engine = engine();

    for level in ["aggressive", "", "med", "LOW-ish"] {
        let profile = InvestorProfile::new(6.0, 25.0).with_risk_level(level);
        let recommendation = engine.recommend(&profile, false).expect("recommendation");

        assert_eq!(recommendation.risk_tier, None);
        assert_eq!(recommendation.adjusted_scores, recommendation.base_scores);
    }
}

#[test]
fn empty_exact_segment_falls_back_to_whole_dataset_mean() {
    let engine = engine();
    let profile = InvestorProfile::new(4.0, 35.0);

    let recommendation = engine.recommend(&profile, false).expect("recommendation");

    assert_eq!(recommendation.segment_kind, SegmentKind::Fallback);
    assert_eq!(recommendation.segment_size, 4);
    let rows = survey();
    for avenue in Avenue::ALL {
        let mean = rows.records().iter().map(|row| row.scores.get(avenue)).sum::<f64>() / 4.0;
        assert!(approx(recommendation.base_scores.get(avenue), mean), "{avenue}");
    }
}

#[test]
fn recommend_is_idempotent() {
    let engine = engine();
    let profile = InvestorProfile::new(2.5, 22.0).with_risk_level("medium").with_top_n(7);

    let first = engine.recommend(&profile, false).expect("first");
    let second = engine.recommend(&profile, true).expect("second");

    assert_eq!(first, second);
    for (a, b) in first.ranked.iter().zip(&second.ranked) {
        assert_eq!(a.score.to_bits(), b.score.to_bits());
    }
}

#[test]
fn high_risk_long_horizon_example() {
    let profile = InvestorProfile::new(6.0, 25.0).with_risk_level("high").with_top_n(3);

    let recommendation = engine().recommend(&profile, false).expect("recommendation");

    assert_eq!(recommendation.duration_category, DurationCategory::MoreThanFiveYears);
    assert_eq!(recommendation.return_category, ReturnCategory::TwentyToThirty);
    let ranked = &recommendation.ranked;
    assert_eq!(ranked[0].avenue, Avenue::EquityMarket);
    assert!(approx(ranked[0].score, 6.8));
    assert_eq!(ranked[1].avenue, Avenue::MutualFunds);
    assert!(approx(ranked[1].score, 5.9));
    assert_eq!(ranked[2].avenue, Avenue::Gold);
    assert!(approx(ranked[2].score, 4.6));
}

#[test]
fn low_risk_short_horizon_example() {
    let profile = InvestorProfile::new(0.5, 12.0).with_risk_level("low").with_top_n(3);

    let recommendation = engine().recommend(&profile, false).expect("recommendation");

    assert_eq!(recommendation.duration_category, DurationCategory::LessThanOneYear);
    assert_eq!(recommendation.return_category, ReturnCategory::TenToTwenty);
    assert_eq!(recommendation.risk_tier, Some(RiskTier::Low));
    let base = recommendation.base_scores;
    let adjusted = recommendation.adjusted_scores;
    assert!(approx(adjusted.get(Avenue::FixedDeposits), base.get(Avenue::FixedDeposits) + 1.0));
    assert!(approx(adjusted.get(Avenue::Ppf), base.get(Avenue::Ppf) + 1.0));
    assert!(approx(adjusted.get(Avenue::GovernmentBonds), base.get(Avenue::GovernmentBonds) + 0.7));
    let avenues: Vec<_> = recommendation.ranked.iter().map(|entry| entry.avenue).collect();
    assert_eq!(avenues, vec![Avenue::FixedDeposits, Avenue::Ppf, Avenue::GovernmentBonds]);
}

#[test]
fn engine_is_shared_across_threads_without_synchronization() {
    let engine = Arc::new(engine());
    let expected = engine
        .recommend(&InvestorProfile::new(6.0, 25.0).with_risk_level("high"), false)
        .expect("baseline");

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                engine.recommend(&InvestorProfile::new(6.0, 25.0).with_risk_level("high"), false)
            })
        })
        .collect();

    for handle in handles {
        let result = handle.join().expect("thread").expect("recommendation");
        assert_eq!(result, expected);
    }
}
