use std::env;
use minitrees::prelude::*;
use minitrees::Splitter;


fn weather() -> Dataset {
    let mut path = env::current_dir().unwrap();
    path.push("tests/dataset/weather.arff");
    DatasetReader::default()
        .file(path)
        .class_attribute("play")
        .read()
        .unwrap()
}


/// 12 instances over A in {x, y}, B in {p, q};
/// class = yes iff A = x.
fn two_attributes() -> Dataset {
    let attrs = vec![
        Attribute::new("A", ["x", "y"]),
        Attribute::new("B", ["p", "q"]),
        Attribute::new("class", ["yes", "no"]),
    ];
    let catalog = FeatureCatalog::new("two attributes", attrs, 2).unwrap();
    let rows = [
        ["x", "p", "yes"], ["x", "p", "yes"], ["x", "q", "yes"],
        ["x", "q", "yes"], ["x", "p", "yes"], ["x", "q", "yes"],
        ["y", "p", "no"],  ["y", "q", "no"],  ["y", "q", "no"],
        ["y", "q", "no"],  ["y", "p", "no"],  ["y", "q", "no"],
    ];
    let instances = rows.iter()
        .enumerate()
        .map(|(i, row)| Instance::from_labels(&catalog, row, i).unwrap())
        .collect();
    Dataset::new(catalog, instances).unwrap()
}


/// Tests for `DecisionTreeBuilder`.
#[cfg(test)]
pub mod tree_tests {
    use super::*;

    #[test]
    fn determining_attribute_is_chosen() {
        let data = two_attributes();
        let rows = (0..data.len()).collect::<Vec<_>>();
        let splitter = Splitter::new();

        let a = splitter.score(&data, &rows, 0);
        let b = splitter.score(&data, &rows, 1);
        assert!(a.gain_ratio > 0f64);
        assert!(a.gain_ratio > b.gain_ratio);

        let best = splitter.best_split(&data, &rows, [0, 1]).unwrap();
        assert_eq!(best.attribute, 0);
    }

    #[test]
    fn unpruned_tree_fits_the_training_data() {
        let data = two_attributes();
        let model = DecisionTreeBuilder::new()
            .pruning(false)
            .build(&data)
            .unwrap();

        match model.root() {
            Node::Split { attribute, .. } => assert_eq!(*attribute, 0),
            leaf => panic!("expected a split on `A`, got {leaf:?}"),
        }

        let result = evaluate(&model, &data).unwrap();
        assert_eq!(result.accuracy(), 1f64);
        assert_eq!(result.weighted_f1(), 1f64);
        assert_eq!(model.predict_all(&data), data.target());
    }

    #[test]
    fn weather_tree_text() {
        let model = DecisionTreeBuilder::new()
            .build(&weather())
            .unwrap();

        let expected = "\
outlook = sunny
|   humidity = high: no (3)
|   humidity = normal: yes (2)
outlook = overcast: yes (4)
outlook = rainy
|   windy = TRUE: no (2)
|   windy = FALSE: yes (3)";
        assert_eq!(model.to_text(), expected);
        assert_eq!(model.num_leaves(), 5);
        assert_eq!(model.size(), 8);

        let report = model.to_string();
        assert!(report.contains("Number of Leaves  : \t5"));
        assert!(report.contains("Size of the tree : \t8"));
    }

    #[test]
    fn weather_tree_dot() {
        let model = DecisionTreeBuilder::new()
            .build(&weather())
            .unwrap();
        let dot = model.to_dot();

        assert!(dot.starts_with("digraph DecisionTree {\n"));
        assert!(dot.ends_with("}\n"));
        assert!(dot.contains("N0 [label=\"outlook\" ]\n"));
        assert!(dot.contains("N0->N1 [label=\"= sunny\"]\n"));
        assert!(dot.contains("N1 [label=\"humidity\" ]\n"));
        assert!(dot.contains("N2 [label=\"no (3)\" shape=box style=filled ]\n"));
        assert!(dot.contains("N0->N4 [label=\"= overcast\"]\n"));
        assert!(dot.contains("N4 [label=\"yes (4)\" shape=box style=filled ]\n"));

        let vertices = dot.lines().filter(|l| l.contains(" [label=") && !l.contains("->")).count();
        let edges = dot.lines().filter(|l| l.contains("->")).count();
        assert_eq!(vertices, model.size());
        assert_eq!(edges, model.size() - 1);
    }

    #[test]
    fn building_is_deterministic() {
        let data = weather();
        let builder = DecisionTreeBuilder::new();
        let a = builder.build(&data).unwrap();
        let b = builder.build(&data).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
    }

    #[test]
    fn pruning_never_grows_the_tree() {
        let data = weather();
        let full = DecisionTreeBuilder::new().pruning(false).build(&data).unwrap();
        for confidence in [0.5, 0.25, 0.1, 0.01] {
            let pruned = DecisionTreeBuilder::new()
                .confidence(confidence)
                .build(&data)
                .unwrap();
            assert!(pruned.size() <= full.size());

            let before = full.estimated_errors(confidence);
            let after = pruned.estimated_errors(confidence);
            assert!(after <= before + 1e-6 * full.size() as f64);
        }
    }

    #[test]
    fn missing_value_falls_back_to_the_majority() {
        let model = DecisionTreeBuilder::new()
            .build(&weather())
            .unwrap();
        let catalog = model.catalog();

        // `outlook` is missing, so the root majority (`yes`) is returned.
        let x = Instance::from_labels(catalog, &["?", "hot", "high", "TRUE", "no"], 0)
            .unwrap();
        assert_eq!(model.predict_label(&x), "yes");
        assert_eq!(model.class_distribution(&x).as_slice(), &[9, 5]);

        // `humidity` is missing below `outlook = sunny` (2 yes, 3 no).
        let x = Instance::from_labels(catalog, &["sunny", "hot", "?", "TRUE", "no"], 0)
            .unwrap();
        assert_eq!(model.predict_label(&x), "no");
    }

    #[test]
    fn model_survives_a_file_round_trip() {
        let data = weather();
        let model = DecisionTreeBuilder::new().build(&data).unwrap();

        let mut path = env::temp_dir();
        path.push(format!("minitrees-weather-{}.json", std::process::id()));
        model.save(&path).unwrap();
        let loaded = DecisionTreeModel::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(model, loaded);
        assert_eq!(loaded.predict_all(&data), model.predict_all(&data));
        assert_eq!(loaded.to_text(), model.to_text());
    }

    #[test]
    fn tampered_model_is_rejected_on_load() {
        let data = weather();
        let json = DecisionTreeBuilder::new()
            .build(&data)
            .unwrap()
            .to_json()
            .unwrap();

        // Class 7 does not exist in {yes, no}.
        let tampered = json.replacen("\"class\":0", "\"class\":7", 1);
        assert_ne!(tampered, json);
        let err = DecisionTreeModel::from_json(&tampered).unwrap_err();
        assert!(matches!(err, TreeError::InvalidModel { .. }));

        let tampered = json.replace("\"class_index\":4", "\"class_index\":9");
        assert_ne!(tampered, json);
        assert!(DecisionTreeModel::from_json(&tampered).is_err());
    }

    #[test]
    fn loading_a_missing_file_fails() {
        let err = DecisionTreeModel::load("/no/such/dir/model.json").unwrap_err();
        assert!(matches!(err, TreeError::Io { .. }));
    }
}
