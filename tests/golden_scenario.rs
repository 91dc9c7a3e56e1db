use colon_des::{Arm, ColonModel, StatsError, DEFAULT_SEED};

const REPLICATIONS: usize = 1000;

// mean discounted cost, mean discounted QALYs for seed 12345, n = 1000
const GOLDEN: [(Arm, f64, f64); 3] = [
    (Arm::Observation, 21765.49502135766, 7.877169395884528),
    (Arm::Levamisole, 84726.12881039995, 7.4070653584747195),
    (Arm::LevamisoleFluorouracil, 123125.75779434951, 9.921038035619581),
];

fn within_one_percent(actual: f64, expected: f64) -> bool {
    ((actual - expected) / expected).abs() <= 0.01
}

fn run(arm: Arm) -> ColonModel {
    let mut model = ColonModel::new(arm, DEFAULT_SEED).unwrap();
    model.run_replications(REPLICATIONS);
    model
}

#[test]
fn arm_means_match_reference() {
    for (arm, cost, qalys) in GOLDEN {
        let model = run(arm);
        let mean_cost = model.mean_cost().unwrap();
        let mean_qalys = model.mean_utility().unwrap();
        assert!(
            within_one_percent(mean_cost, cost),
            "{arm}: mean cost {mean_cost} vs {cost}"
        );
        assert!(
            within_one_percent(mean_qalys, qalys),
            "{arm}: mean QALYs {mean_qalys} vs {qalys}"
        );
    }
}

#[test]
fn pairwise_icers_match_reference() {
    let observation = run(Arm::Observation);
    let lev = run(Arm::Levamisole);
    let lev_5fu = run(Arm::LevamisoleFluorouracil);

    let cases = [
        (lev.icer(&observation).unwrap(), -133929.1492494819),
        (lev_5fu.icer(&observation).unwrap(), 49592.35677011571),
        (lev_5fu.icer(&lev).unwrap(), 15274.481434523908),
    ];
    for (actual, expected) in cases {
        assert!(within_one_percent(actual, expected), "ICER {actual} vs {expected}");
    }
}

#[test]
fn same_seed_gives_identical_series() {
    for arm in Arm::ALL {
        let mut a = ColonModel::new(arm, 2024).unwrap();
        let mut b = ColonModel::new(arm, 2024).unwrap();
        a.run_replications(200);
        b.run_replications(200);
        assert_eq!(a.get_cost_series(), b.get_cost_series());
        assert_eq!(a.get_utility_series(), b.get_utility_series());
    }
}

#[test]
fn different_seeds_diverge() {
    let mut a = ColonModel::new(Arm::Observation, 1).unwrap();
    let mut b = ColonModel::new(Arm::Observation, 2).unwrap();
    a.run_replications(50);
    b.run_replications(50);
    assert_ne!(a.get_utility_series(), b.get_utility_series());
}

#[test]
fn totals_are_bounded_by_the_horizon() {
    // no flow can exceed disease-free utility for the full 55 years
    let ceiling = colon_des::discount::discount_interval(0.8, 0.0, 55.0, 0.015);
    for arm in Arm::ALL {
        let model = run(arm);
        assert_eq!(model.get_cost_series().len(), REPLICATIONS);
        assert_eq!(model.get_utility_series().len(), REPLICATIONS);
        for (&cost, &qalys) in model.get_cost_series().iter().zip(model.get_utility_series()) {
            assert!(cost >= 0.0 && cost.is_finite());
            assert!(qalys >= 0.0 && qalys <= ceiling + 1e-9);
        }
        let report = model.report().unwrap();
        assert_eq!(report.costs.n, REPLICATIONS);
        assert!(report.costs.se > 0.0);
    }
}

#[test]
fn observation_arm_never_pays_for_treatment() {
    let model = run(Arm::Observation);
    // patients without recurrence cost nothing; everyone else pays the
    // discounted advanced-disease cost, at most 40000
    for &cost in model.get_cost_series() {
        assert!(cost == 0.0 || (cost > 0.0 && cost <= 40000.0));
    }
}

#[test]
fn icer_against_itself_is_degenerate() {
    let a = run(Arm::Levamisole);
    assert!(matches!(
        a.icer(&a),
        Err(StatsError::DegenerateIcer { value, .. }) if value.is_nan()
    ));
}

// long-run means of the published model, seed 12345, n = 200000
const LONG_RUN: [(Arm, f64, f64); 3] = [
    (Arm::Observation, 22039.0, 7.708),
    (Arm::Levamisole, 83334.0, 7.693),
    (Arm::LevamisoleFluorouracil, 122550.0, 9.877),
];

#[test]
fn arm_means_agree_with_long_run_values() {
    for (arm, cost, qalys) in LONG_RUN {
        let mut model = ColonModel::new(arm, DEFAULT_SEED).unwrap();
        model.run_replications(20_000);
        let report = model.report().unwrap();
        assert!(
            (report.costs.mean - cost).abs() <= 4.0 * report.costs.se,
            "{arm}: mean cost {} (se {}) vs {cost}",
            report.costs.mean,
            report.costs.se
        );
        assert!(
            (report.qalys.mean - qalys).abs() <= 4.0 * report.qalys.se,
            "{arm}: mean QALYs {} (se {}) vs {qalys}",
            report.qalys.mean,
            report.qalys.se
        );
    }
}
