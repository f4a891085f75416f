use std::env;
use minitrees::prelude::*;
use minitrees::research::HoldoutConfig;


fn weather() -> Dataset {
    let mut path = env::current_dir().unwrap();
    path.push("tests/dataset/weather.arff");
    DatasetReader::default()
        .file(path)
        .class_attribute("play")
        .read()
        .unwrap()
}


/// Tests for `Experiment`.
#[cfg(test)]
pub mod experiment_tests {
    use super::*;

    #[test]
    fn default_experiment_on_weather() {
        let data = weather();
        let report = Experiment::new(ExperimentConfig::default())
            .run(&data)
            .unwrap();

        assert_eq!(report.n_instances, 14);
        assert_eq!(report.n_attributes, 5);
        assert_eq!(report.class_index, 4);
        assert_eq!(
            report.class_distribution,
            vec![("yes".to_string(), 9), ("no".to_string(), 5)]
        );

        assert_eq!(report.holdouts.len(), 2);
        let m1 = &report.holdouts[0];
        assert_eq!(m1.config.name, "M1");
        assert_eq!((m1.n_train, m1.n_test), (10, 4));
        assert_eq!(m1.evaluation.n_instances(), 4);
        assert_eq!(m1.title(), "M1 (70% train / 30% test)");

        let m2 = &report.holdouts[1];
        assert_eq!((m2.n_train, m2.n_test), (7, 7));

        assert_eq!(report.cross_validation.n_folds(), 10);
        assert_eq!(report.cross_validation.evaluation.n_instances(), 14);
        assert!(report.best_holdout().is_some());
    }

    #[test]
    fn report_has_every_section() {
        let data = weather();
        let report = Experiment::default().run(&data).unwrap();
        let text = report.to_string();

        for section in [
            "=== weather.symbolic Dataset Summary ===",
            "=== Class Distribution ===",
            "  yes: 9 (64.29%)",
            "=== Model M1 (70% train / 30% test) ===",
            "=== M1 Summary ===",
            "=== M2 Detailed Accuracy By Class ===",
            "=== M2 Confusion Matrix ===",
            "=== 10-Fold CV ===",
            "=== Comparison ===",
            "=== Decision Tree for M1 (Textual Representation) ===",
            "=== Decision Tree for M2 (DOT Format) ===",
            "digraph DecisionTree {",
        ] {
            assert!(text.contains(section), "missing `{section}`");
        }

        let comparison = report.comparison_string();
        assert_eq!(comparison.lines().count(), 4);
        assert!(comparison.contains("M1 - 70/30"));
        assert!(comparison.contains("10-Fold CV"));
    }

    #[test]
    fn same_configuration_same_report() {
        let data = weather();
        let config = ExperimentConfig {
            holdouts: vec![HoldoutConfig::new("half", 0.5, 11)],
            n_folds: 7,
            ..ExperimentConfig::default()
        };
        let a = Experiment::new(config.clone()).run(&data).unwrap();
        let b = Experiment::new(config).run(&data).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn configuration_is_validated_before_training() {
        let data = weather();

        let config = ExperimentConfig { n_folds: 15, ..ExperimentConfig::default() };
        let err = Experiment::new(config).run(&data).unwrap_err();
        assert!(matches!(err, TreeError::TooFewInstancesForFolds { .. }));

        let config = ExperimentConfig {
            holdouts: vec![HoldoutConfig::new("all", 1.0, 1)],
            ..ExperimentConfig::default()
        };
        let err = Experiment::new(config).run(&data).unwrap_err();
        assert!(matches!(err, TreeError::InvalidTrainFraction { .. }));

        let config = ExperimentConfig { confidence: 0.0, ..ExperimentConfig::default() };
        let err = Experiment::new(config).run(&data).unwrap_err();
        assert!(matches!(err, TreeError::InvalidConfidence { .. }));
    }

    #[test]
    fn configuration_from_json() {
        let json = r#"{
            "holdouts": [{"name": "M3", "train_fraction": 0.8, "seed": 5}],
            "n_folds": 4,
            "cv_seed": 9
        }"#;
        let config = ExperimentConfig::from_json(json).unwrap();
        assert_eq!(config.holdouts, vec![HoldoutConfig::new("M3", 0.8, 5)]);
        assert_eq!(config.n_folds, 4);
        assert_eq!(config.cv_seed, 9);
        assert_eq!(config.min_leaf_size, 2);
        assert!(config.stratified);

        let err = ExperimentConfig::from_json("{\"n_folds\": \"ten\"}").unwrap_err();
        assert!(matches!(err, TreeError::Serialize { .. }));
    }
}
