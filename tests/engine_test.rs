use ncd_cie::clinical::demo_patient;
use ncd_cie::{CausalEngine, Covariate, EngineConfig, EngineError, Interventions, RiskLevel};
use std::io::Write;

#[test]
fn test_engine_from_yaml_config() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "cascade:\n  gamma: 0.5\n  max_depth: 2\nrisk_thresholds:\n  moderate: 0.05\n  high: 0.15\n  very_high: 0.25\n"
    )
    .unwrap();

    let config = EngineConfig::from_path(file.path()).unwrap();
    let engine = CausalEngine::new(config).unwrap();

    assert_eq!(engine.get_depth("diet", "hdl"), 2);
    assert_eq!(engine.get_depth("cad", "ldl"), 3);
    assert_eq!(engine.risk_level(0.07), RiskLevel::Moderate);

    let patient = demo_patient("demo-moderate").unwrap();
    let result = engine.what_if(&patient.covariates, &Interventions::new().with(Covariate::Statin, 1.0));
    assert!((result.delta("ldl").unwrap() + 0.35 * 0.5).abs() < 1e-9);
}

#[test]
fn test_engine_from_dataset_path() {
    let mut dataset = tempfile::NamedTempFile::new().unwrap();
    write!(
        dataset,
        r#"{{
            "nodes": [
                {{"id": "exercise", "label": "Exercise", "domain": "Lifestyle", "type": "lifestyle", "description": ""}},
                {{"id": "t2dm", "label": "T2DM", "domain": "Disease Endpoints", "type": "disease", "description": ""}}
            ],
            "edges": [
                {{"id": "x1", "source": "exercise", "target": "t2dm", "weight": -0.3, "ci": [-0.4, -0.2],
                  "evidence_grade": "B", "domain": "Lifestyle", "description": ""}}
            ]
        }}"#
    )
    .unwrap();

    let config = EngineConfig {
        dataset_path: Some(dataset.path().to_path_buf()),
        ..Default::default()
    };
    let engine = CausalEngine::new(config).unwrap();
    assert_eq!(engine.graph().edge_count(), 1);

    let patient = demo_patient("demo-moderate").unwrap();
    let sedentary = engine.risk(&patient.covariates.with(Covariate::Exercise, 0.0), "t2dm");
    let active = engine.risk(&patient.covariates.with(Covariate::Exercise, 7.0), "t2dm");
    assert!(active.value < sedentary.value);
    // No edges into CAD in this graph
    assert_eq!(engine.contributions(&patient.covariates, "cad").len(), 0);
}

#[test]
fn test_invalid_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "cascade:\n  max_depth: 0\n").unwrap();

    let err = EngineConfig::from_path(file.path()).unwrap_err();
    assert!(err.to_string().contains("max_depth"));
}

#[test]
fn test_unknown_covariate_at_api_edge() {
    let err: EngineError = Interventions::from_pairs([("ldl", 100.0), ("cholesterol", 200.0)])
        .unwrap_err()
        .into();
    assert!(matches!(err, EngineError::UnknownCovariate(_)));
    assert_eq!(err.to_string(), "Unknown covariate: cholesterol");
}

#[test]
fn test_results_serialize() {
    let engine = CausalEngine::reference().unwrap();
    let patient = demo_patient("demo-high").unwrap();
    let comparison = engine.compare(&patient.covariates, &Interventions::new().with(Covariate::Smoking, 0.0));

    let json = serde_json::to_value(&comparison).unwrap();
    assert!(json["baseline"]["cad"]["value"].is_f64());
    assert!(json["scenario"]["deltas"]["smoking"].as_f64().unwrap() < 0.0);
    assert!(json["scenario"]["activated_edges"].as_array().unwrap().iter().any(|e| e == "e21"));
    assert_eq!(json["changes"].as_array().unwrap().len(), 9);
    assert_eq!(json["changes"][0]["key"], "cad");
}
