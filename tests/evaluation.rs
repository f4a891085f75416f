use std::env;
use minitrees::prelude::*;


fn weather() -> Dataset {
    let mut path = env::current_dir().unwrap();
    path.push("tests/dataset/weather.arff");
    DatasetReader::default()
        .file(path)
        .class_attribute("play")
        .read()
        .unwrap()
}


/// Tests for `evaluate`.
#[cfg(test)]
pub mod evaluation_tests {
    use super::*;

    #[test]
    fn row_sums_are_class_counts() {
        let data = weather();
        let (train, test) = HoldoutSplit::new(0.5).seed(2).split(&data).unwrap();
        let model = DecisionTreeBuilder::new().build(&train).unwrap();
        let result = evaluate(&model, &test).unwrap();

        let matrix = result.confusion_matrix();
        let counts = test.class_counts();
        assert_eq!(matrix.total(), test.len());
        for c in 0..2 {
            assert_eq!(matrix.actual_total(c), counts[c]);
        }

        let accuracy = result.accuracy();
        assert!((0f64..=1f64).contains(&accuracy));
        assert!((0f64..=1f64).contains(&result.weighted_f1()));
        assert!((result.pct_correct() - accuracy * 100f64).abs() < 1e-12);
    }

    #[test]
    fn training_accuracy_of_the_weather_tree() {
        let data = weather();
        let model = DecisionTreeBuilder::new().build(&data).unwrap();
        let result = evaluate(&model, &data).unwrap();
        assert_eq!(result.correct(), 14);
        assert_eq!(result.kappa(), 1f64);

        let summary = result.summary_string("=== Summary ===");
        assert!(summary.contains("Total Number of Instances"));
        assert!(summary.contains("100.0000 %"));
    }

    #[test]
    fn class_never_seen_in_training() {
        let data = weather();
        // Keep only the `yes` instances for training.
        let yes = (0..data.len())
            .filter(|&i| data.class_value(i) == 0)
            .collect::<Vec<_>>();
        let train = data.select(&yes);
        let model = DecisionTreeBuilder::new().build(&train).unwrap();
        assert!(model.root().is_leaf());

        let result = evaluate(&model, &data).unwrap();
        let matrix = result.confusion_matrix();
        assert_eq!(matrix.as_rows(), &[vec![9, 0], vec![5, 0]]);

        let metrics = result.class_metrics();
        assert_eq!(metrics[1].label, "no");
        assert_eq!(metrics[1].precision, 0f64);
        assert_eq!(metrics[1].recall, 0f64);
        assert_eq!(metrics[1].f1, 0f64);
        assert!((result.accuracy() - 9f64 / 14f64).abs() < 1e-12);
    }

    #[test]
    fn empty_dataset_is_nan() {
        let data = weather();
        let model = DecisionTreeBuilder::new().build(&data).unwrap();
        let empty = data.range(0, 0);
        let result = evaluate(&model, &empty).unwrap();
        assert_eq!(result.n_instances(), 0);
        assert!(result.accuracy().is_nan());
        assert!(result.weighted_f1().is_nan());
    }

    #[test]
    fn foreign_catalog_is_rejected() {
        let data = weather();
        let model = DecisionTreeBuilder::new().build(&data).unwrap();

        let text = "\
@relation other
@attribute outlook {sunny, overcast}
@attribute play {yes, no}
@data
sunny,no
";
        let other = Dataset::from_arff_str(text, None).unwrap();
        let err = evaluate(&model, &other).unwrap_err();
        assert!(matches!(err, TreeError::CatalogMismatch { .. }));
    }

    #[test]
    fn report_blocks() {
        let data = weather();
        let model = DecisionTreeBuilder::new().build(&data).unwrap();
        let result = evaluate(&model, &data).unwrap();

        let details = result.class_details_string("=== Detailed Accuracy By Class ===");
        assert!(details.contains("TP Rate"));
        assert!(details.contains("Weighted Avg."));

        let matrix = result.matrix_string("=== Confusion Matrix ===");
        let expected = "\
=== Confusion Matrix ===

  a  b   <-- classified as
  9  0 |  a = yes
  0  5 |  b = no
";
        assert_eq!(matrix, expected);
    }
}
