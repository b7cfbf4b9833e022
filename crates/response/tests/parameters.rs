use approx::assert_relative_eq;
use lti_response::{
    Config, InputSpec, Method, ModelSpec, Parameters, PerformanceMetrics,
};

#[test]
fn load_toml_document() {
    let params: Parameters = toml::from_str(
        r#"
        [model]
        order = 2
        wn = 1.0
        zeta = 0.3

        [input]
        kind = "step"
        amplitude = 1.0

        [sampling]
        horizon = 20.0
        samples = 2000
        method = { kind = "state_space", substeps = 2 }
        "#,
    )
    .unwrap();

    assert_eq!(params.model, ModelSpec::second_order(1.0, 0.3).unwrap());
    assert_eq!(params.input, InputSpec::step(1.0).unwrap());
    assert_eq!(
        params.sampling,
        Config {
            horizon: 20.0,
            samples: 2000,
            method: Method::StateSpace { substeps: 2 },
        }
    );

    let result = params.simulate().unwrap();
    let PerformanceMetrics::Underdamped(metrics) = result.metrics else {
        panic!("expected underdamped metrics");
    };
    assert_relative_eq!(metrics.overshoot.unwrap().percent, 37.23, epsilon = 0.05);
}

#[test]
fn load_json_document_with_default_sampling() {
    let params: Parameters = serde_json::from_str(
        r#"{
            "model": { "order": 1, "k": 2.0, "tau": 1.0 },
            "input": { "type": "impulse", "amplitude": 0.5 }
        }"#,
    )
    .unwrap();

    assert_eq!(params.sampling, Config::default());
    assert_eq!(params.scenario().model, ModelSpec::first_order(2.0, 1.0).unwrap());
    assert_eq!(params.input, InputSpec::impulse(0.5).unwrap());
}

#[test]
fn amplitude_defaults_to_one() {
    let input: InputSpec = serde_json::from_str(r#"{ "kind": "step" }"#).unwrap();
    assert_eq!(input, InputSpec::step(1.0).unwrap());
}

#[test]
fn invalid_documents_are_rejected() {
    let err = toml::from_str::<Parameters>(
        r#"
        [model]
        order = 1
        k = 1.0
        tau = -2.0

        [input]
        kind = "step"
        "#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("time constant (tau)"));

    let err = serde_json::from_str::<ModelSpec>(r#"{ "order": 2, "wn": 1.0 }"#).unwrap_err();
    assert!(err.to_string().contains("requires damping ratio (zeta)"));

    let err = serde_json::from_str::<ModelSpec>(r#"{ "order": 3 }"#).unwrap_err();
    assert!(err.to_string().contains("unsupported model order 3"));

    let err = serde_json::from_str::<Config>(r#"{ "horizon": 1.0, "steps": 5 }"#).unwrap_err();
    assert!(err.to_string().contains("unknown field"));
}
