use minitrees::prelude::*;


const BUYING: [&str; 4] = ["vhigh", "high", "med", "low"];
const DOORS: [&str; 4] = ["2", "3", "4", "5more"];
const PERSONS: [&str; 3] = ["2", "4", "more"];
const LUG_BOOT: [&str; 3] = ["small", "med", "big"];
const SAFETY: [&str; 3] = ["low", "med", "high"];
const CLASS: [&str; 4] = ["unacc", "acc", "good", "vgood"];


/// Every combination of the six car attributes (4 * 4 * 4 * 3 * 3 * 3)
/// labelled by a fixed rule.
fn car() -> Dataset {
    let attrs = vec![
        Attribute::new("buying", BUYING),
        Attribute::new("maint", BUYING),
        Attribute::new("doors", DOORS),
        Attribute::new("persons", PERSONS),
        Attribute::new("lug_boot", LUG_BOOT),
        Attribute::new("safety", SAFETY),
        Attribute::new("class", CLASS),
    ];
    let catalog = FeatureCatalog::new("car", attrs, 6).unwrap();

    let mut instances = Vec::new();
    for buying in 0..4 {
        for maint in 0..4 {
            for doors in 0..4 {
                for persons in 0..3 {
                    for lug_boot in 0..3 {
                        for safety in 0..3 {
                            let class = rule(buying, maint, persons, lug_boot, safety);
                            let values = [buying, maint, doors, persons, lug_boot, safety, class]
                                .into_iter()
                                .map(Some)
                                .collect();
                            instances.push(Instance::new(values));
                        }
                    }
                }
            }
        }
    }
    Dataset::new(catalog, instances).unwrap()
}


fn rule(buying: usize, maint: usize, persons: usize, lug_boot: usize, safety: usize)
    -> usize
{
    if safety == 0 || persons == 0 { return 0; }
    let price = buying + maint;
    if price <= 1 { return 0; }
    if safety == 2 && price >= 5 {
        return if lug_boot >= 1 { 3 } else { 2 };
    }
    if price >= 4 { 2 } else { 1 }
}


/// Tests for `CrossValidation`.
#[cfg(test)]
pub mod cross_validation_tests {
    use super::*;

    #[test]
    fn ten_folds_over_1728_instances() {
        let data = car();
        assert_eq!(data.len(), 1728);

        let sizes = CrossValidation::new(10)
            .seed(1)
            .folds(&data)
            .unwrap()
            .map(|(train, test)| {
                assert_eq!(train.len() + test.len(), 1728);
                test.len()
            })
            .collect::<Vec<_>>();
        assert_eq!(sizes.len(), 10);
        assert!(sizes.iter().all(|s| *s == 172 || *s == 173));

        let result = CrossValidation::new(10).seed(1).run(&data).unwrap();
        let cells = result.evaluation
            .confusion_matrix()
            .as_rows()
            .iter()
            .flatten()
            .sum::<usize>();
        assert_eq!(cells, 1728);
        assert_eq!(result.folds.iter().map(|f| f.n_test).collect::<Vec<_>>(), sizes);
    }

    #[test]
    fn pruning_never_raises_the_estimated_errors() {
        let data = car();
        let full = DecisionTreeBuilder::new()
            .pruning(false)
            .build(&data)
            .unwrap();
        for confidence in [0.05, 0.1, 0.25, 0.5] {
            let pruned = DecisionTreeBuilder::new()
                .confidence(confidence)
                .build(&data)
                .unwrap();
            let before = full.estimated_errors(confidence);
            let after = pruned.estimated_errors(confidence);
            assert!(after <= before + 1e-6 * full.size() as f64);
            assert!(pruned.num_leaves() <= full.num_leaves());
        }
    }

    #[test]
    fn rule_is_learnt() {
        let evaluation = cross_validate(&car(), 10, 1).unwrap();
        assert!(evaluation.accuracy() > 0.95);
        assert!(evaluation.weighted_f1() > 0.95);
        assert!(evaluation.weighted_f1() <= 1f64);
    }

    #[test]
    fn row_sums_are_class_counts() {
        let data = car();
        let result = CrossValidation::new(5).seed(7).run(&data).unwrap();
        let matrix = result.evaluation.confusion_matrix();
        let counts = data.class_counts();
        for c in 0..CLASS.len() {
            assert_eq!(matrix.actual_total(c), counts[c]);
        }
    }

    #[test]
    fn same_seed_same_result() {
        let data = car();
        let cv = CrossValidation::new(10).seed(3);
        let a = cv.run(&data).unwrap();
        let b = cv.run(&data).unwrap();
        assert_eq!(a, b);

        let unstratified = CrossValidation::new(10).seed(3).stratified(false);
        let c = unstratified.run(&data).unwrap();
        let d = unstratified.run(&data).unwrap();
        assert_eq!(c, d);
    }

    #[test]
    fn folds_depend_on_the_seed() {
        let data = car();
        let first_test = |seed: u64| {
            let (_, test) = CrossValidation::new(10)
                .seed(seed)
                .folds(&data)
                .unwrap()
                .next()
                .unwrap();
            test.iter()
                .map(|(x, _)| x.values().to_vec())
                .collect::<Vec<_>>()
        };
        assert_eq!(first_test(1), first_test(1));
        assert_ne!(first_test(1), first_test(2));
    }

    #[test]
    fn configuration_errors_come_first() {
        let data = car();
        let err = CrossValidation::new(1).run(&data).unwrap_err();
        assert!(matches!(err, TreeError::InvalidFoldCount { n_folds: 1 }));

        let small = data.range(0, 5);
        let err = cross_validate(&small, 10, 1).unwrap_err();
        assert!(matches!(
            err,
            TreeError::TooFewInstancesForFolds { n_folds: 10, n_instances: 5 }
        ));

        let err = CrossValidation::new(10)
            .builder(DecisionTreeBuilder::new().confidence(0.9))
            .run(&data)
            .unwrap_err();
        assert!(matches!(err, TreeError::InvalidConfidence { .. }));
    }
}
