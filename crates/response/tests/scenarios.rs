use approx::{assert_abs_diff_eq, assert_relative_eq};
use lti_response::{
    Config, Damping, Error, InputSpec, MetricUnavailable, ModelSpec, Parameter,
    PerformanceMetrics, SettlingBand, simulate,
};

fn run(model: ModelSpec, input: InputSpec) -> lti_response::SimulationResult {
    simulate(&model, &input, &Config::default()).unwrap()
}

#[test]
fn first_order_step_settles_at_gain_times_amplitude() {
    let result = run(
        ModelSpec::first_order(2.0, 1.0).unwrap(),
        InputSpec::step(1.0).unwrap(),
    );

    let output = result.response.output();
    assert_abs_diff_eq!(output[output.len() - 1], 2.0, epsilon = 1e-3);

    let PerformanceMetrics::FirstOrder(metrics) = result.metrics else {
        panic!("expected first-order metrics");
    };
    assert_eq!(metrics.final_value, 2.0);

    let marker = metrics.tau_marker.unwrap();
    assert_relative_eq!(marker.time, 1.0, epsilon = 0.01);
    assert_relative_eq!(marker.value, 0.632 * 2.0, epsilon = 0.005);
}

#[test]
fn first_order_impulse_decays() {
    let result = run(
        ModelSpec::first_order(3.0, 0.5).unwrap(),
        InputSpec::impulse(2.0).unwrap(),
    );

    let output = result.response.output();
    assert_relative_eq!(output[0], 2.0 * 3.0 / 0.5);
    assert_abs_diff_eq!(output[output.len() - 1], 0.0, epsilon = 1e-6);
    assert!(output.windows(2).all(|w| w[1] < w[0]));
    assert_eq!(result.metrics.final_value(), 0.0);
    assert_eq!(result.response.input_signal()[0], 2.0);
}

#[test]
fn underdamped_step_matches_analytic_overshoot() {
    let result = run(
        ModelSpec::second_order(1.0, 0.3).unwrap(),
        InputSpec::step(1.0).unwrap(),
    );

    let PerformanceMetrics::Underdamped(metrics) = result.metrics else {
        panic!("expected underdamped metrics");
    };
    let overshoot = metrics.overshoot.unwrap();
    assert_relative_eq!(overshoot.percent, 37.2, epsilon = 0.1);
    assert_relative_eq!(
        overshoot.percent,
        metrics.analytic.overshoot_percent,
        max_relative = 0.02
    );
    assert_relative_eq!(metrics.analytic.settling_time.unwrap(), 13.33, epsilon = 0.01);
    assert!(metrics.settling(SettlingBand::TwoPercent).is_ok());
}

#[test]
fn overshoot_tracks_analytic_value_across_damping() {
    for (wn, zeta) in [(2.0, 0.2), (1.0, 0.1), (3.0, 0.5), (1.5, 0.7)] {
        let result = run(
            ModelSpec::second_order(wn, zeta).unwrap(),
            InputSpec::step(1.0).unwrap(),
        );
        let PerformanceMetrics::Underdamped(metrics) = result.metrics else {
            panic!("expected underdamped metrics");
        };

        let overshoot = metrics.overshoot.unwrap();
        assert!(overshoot.percent > 0.0);
        assert_relative_eq!(
            overshoot.percent,
            metrics.analytic.overshoot_percent,
            max_relative = 0.02
        );
    }
}

#[test]
fn damped_step_reports_only_final_value() {
    for zeta in [1.0, 1.5, 2.0] {
        let result = run(
            ModelSpec::second_order(2.0, zeta).unwrap(),
            InputSpec::step(4.0).unwrap(),
        );

        let PerformanceMetrics::Damped(metrics) = result.metrics else {
            panic!("expected damped metrics for zeta = {zeta}");
        };
        assert_eq!(metrics.final_value, 4.0);
        assert!(result.metrics.unavailable().is_empty());
    }
}

#[test]
fn overdamped_impulse_reports_zero_final_value_only() {
    let result = run(
        ModelSpec::second_order(2.0, 1.5).unwrap(),
        InputSpec::impulse(1.0).unwrap(),
    );

    let PerformanceMetrics::Damped(metrics) = result.metrics else {
        panic!("expected damped metrics");
    };
    assert_eq!(metrics.final_value, 0.0);
    assert_eq!(metrics.damping, Damping::Overdamped);
    assert!(result.metrics.unavailable().is_empty());

    let output = result.response.output();
    assert!(output.iter().all(|y| y.is_finite() && *y >= 0.0));
    assert_abs_diff_eq!(output[output.len() - 1], 0.0, epsilon = 1e-3);
}

#[test]
fn underdamped_impulse_has_no_overshoot_metrics() {
    let result = run(
        ModelSpec::second_order(1.0, 0.3).unwrap(),
        InputSpec::impulse(1.0).unwrap(),
    );

    let missing = result.metrics.unavailable();
    assert!(missing.contains(&("overshoot", MetricUnavailable::ZeroFinalValue)));
    assert!(missing.contains(&("settling_2pct", MetricUnavailable::ZeroFinalValue)));
    assert!(missing.contains(&("settling_5pct", MetricUnavailable::ZeroFinalValue)));
}

#[test]
fn repeated_calls_are_bit_identical() {
    let model = ModelSpec::second_order(2.0, 0.2).unwrap();
    let input = InputSpec::step(1.5).unwrap();
    let first = run(model, input);
    let second = run(model, input);

    let bits = |values: &[f64]| values.iter().map(|v| v.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(first.response.time()), bits(second.response.time()));
    assert_eq!(bits(first.response.output()), bits(second.response.output()));
}

#[test]
fn time_axis_covers_horizon() {
    let config = Config {
        horizon: 5.0,
        samples: 37,
        ..Config::default()
    };
    let result = simulate(
        &ModelSpec::first_order(1.0, 1.0).unwrap(),
        &InputSpec::step(1.0).unwrap(),
        &config,
    )
    .unwrap();

    let time = result.response.time();
    assert_eq!(time.len(), 37);
    assert_eq!(time[0], 0.0);
    assert_eq!(time[36], 5.0);
    assert!(time.windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn invalid_models_are_rejected_before_sampling() {
    let err = ModelSpec::first_order(1.0, 0.0).unwrap_err();
    assert_eq!(err.parameter, Parameter::TimeConstant);

    let err = ModelSpec::second_order(-1.0, 0.5).unwrap_err();
    assert_eq!(err.parameter, Parameter::NaturalFrequency);

    let err = Error::from(err);
    assert!(matches!(err, Error::InvalidModel(_)));
}

#[test]
fn transfer_functions_for_display() {
    let result = run(
        ModelSpec::second_order(1.0, 0.5).unwrap(),
        InputSpec::step(1.0).unwrap(),
    );

    assert_eq!(result.transfer_function.to_string(), "(1) / (1 s^2 + 1 s^1 + 1)");
    assert_eq!(
        result.output_transform().to_string(),
        "(1) / (1 s^3 + 1 s^2 + 1 s^1 + 0)"
    );
}
