use colored::Colorize;
use rand::prelude::*;
use rayon::prelude::*;
use serde::{Serialize, Deserialize};
use tracing::{info, instrument};

use crate::TreeError;
use crate::common::checker;
use crate::dataset::Dataset;
use crate::evaluation::{
    evaluate,
    evaluator::class_labels,
    ConfusionMatrix,
    EvaluationResult,
};
use crate::tree::DecisionTreeBuilder;


const WIDTH: usize = 9;


/// k-fold cross validation of a [`DecisionTreeBuilder`].
///
/// The dataset is shuffled with the seed and, if stratified,
/// reordered so that each fold gets about the same class distribution.
/// Fold `i` is then the `i`-th contiguous block of that order;
/// the first `n mod k` folds get one extra instance.
/// Each fold trains a tree on the other folds and evaluates it on
/// the held-out fold. The folds run in parallel and their confusion
/// matrices are summed once all of them finish.
///
/// # Example
/// ```no_run
/// use minitrees::prelude::*;
///
/// let data = DatasetReader::default()
///     .file("/path/to/car.arff")
///     .class_attribute("class")
///     .read()
///     .unwrap();
///
/// let result = CrossValidation::new(10)
///     .seed(1)
///     .verbose(true)
///     .builder(DecisionTreeBuilder::new().confidence(0.25))
///     .run(&data)
///     .unwrap();
///
/// println!("{}", result.evaluation.summary_string("=== 10-fold CV ==="));
///
/// // The (train, test) pairs are also available.
/// let cv = CrossValidation::new(5);
/// for (train, test) in cv.folds(&data).unwrap() {
///     println!("[train: {}] [test: {}]", train.len(), test.len());
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossValidation {
    n_folds: usize,
    seed: u64,
    stratified: bool,
    verbose: bool,
    builder: DecisionTreeBuilder,
}


/// Size and accuracy of a single fold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoldSummary {
    /// Number of training instances.
    pub n_train: usize,
    /// Number of test instances.
    pub n_test: usize,
    /// Accuracy on the test instances.
    pub accuracy: f64,
}


/// Results of k-fold cross validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossValidationResult {
    /// Evaluation over the summed confusion matrix of all folds.
    pub evaluation: EvaluationResult,
    /// Per-fold summaries, in fold order.
    pub folds: Vec<FoldSummary>,
    /// Seed of the shuffle.
    pub seed: u64,
    /// Whether the folds were stratified.
    pub stratified: bool,
}


impl CrossValidationResult {
    /// Returns the number of folds.
    pub fn n_folds(&self) -> usize {
        self.folds.len()
    }


    /// Mean of the fold accuracies.
    pub fn mean_accuracy(&self) -> f64 {
        let n = self.folds.len() as f64;
        self.folds.iter().map(|f| f.accuracy).sum::<f64>() / n
    }


    /// Sample standard deviation of the fold accuracies.
    pub fn std_accuracy(&self) -> f64 {
        let n = self.folds.len();
        if n < 2 { return 0f64; }
        let mean = self.mean_accuracy();
        let var = self.folds.iter()
            .map(|f| (f.accuracy - mean).powi(2))
            .sum::<f64>()
            / (n - 1) as f64;
        var.sqrt()
    }
}


impl CrossValidation {
    /// Construct a new instance of `CrossValidation`
    /// with `n_folds` folds, seed `1`, stratification on,
    /// and the default [`DecisionTreeBuilder`].
    #[inline]
    pub fn new(n_folds: usize) -> Self {
        Self {
            n_folds,
            seed: 1,
            stratified: true,
            verbose: false,
            builder: DecisionTreeBuilder::default(),
        }
    }


    /// Set the seed of the randomness for shuffling.
    /// Default value is `1.`
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Set whether the folds are stratified by class.
    /// Default value is `true.`
    #[inline]
    pub fn stratified(mut self, stratified: bool) -> Self {
        self.stratified = stratified;
        self
    }


    /// Set the verbose parameter.
    /// If `true`, `CrossValidation` prints one line per fold.
    /// Default value is `false.`
    #[inline]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }


    /// Set the builder that trains a tree on each fold.
    #[inline]
    pub fn builder(mut self, builder: DecisionTreeBuilder) -> Self {
        self.builder = builder;
        self
    }


    /// Returns an iterator over the `(train, test)` pairs.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`TreeError::InvalidFoldCount`] | `n_folds < 2` |
    /// | [`TreeError::TooFewInstancesForFolds`] | `n_folds > data.len()` |
    pub fn folds<'a>(&self, data: &'a Dataset) -> Result<Folds<'a>, TreeError> {
        self.folds_with(data, self.verbose)
    }


    fn folds_with<'a>(&self, data: &'a Dataset, verbose: bool)
        -> Result<Folds<'a>, TreeError>
    {
        checker::check_folds(self.n_folds, data.len())?;

        let mut ix = (0..data.len()).collect::<Vec<_>>();
        let mut rng = StdRng::seed_from_u64(self.seed);
        ix.shuffle(&mut rng);

        if self.stratified {
            ix = stratify(data, ix, self.n_folds);
        }

        Ok(Folds {
            data,
            ix,
            n_folds: self.n_folds,
            current_fold: 0,
            verbose,
        })
    }


    /// Runs the cross validation.
    ///
    /// # Errors
    /// The fold-count errors of [`CrossValidation::folds`],
    /// and any error of the builder.
    /// A failed fold aborts the run.
    #[instrument(
        skip_all,
        fields(
            n_folds = self.n_folds,
            n_instances = data.len(),
            seed = self.seed,
        )
    )]
    pub fn run(&self, data: &Dataset) -> Result<CrossValidationResult, TreeError> {
        let folds = self.folds_with(data, false)?.collect::<Vec<_>>();
        let builder = self.builder;

        let outcomes = folds.into_par_iter()
            .enumerate()
            .map(|(i, (train, test))| -> Result<_, TreeError> {
                let model = builder.build(&train)?;
                let evaluation = evaluate(&model, &test)?;
                info!(
                    fold = i + 1,
                    n_train = train.len(),
                    n_test = test.len(),
                    accuracy = evaluation.accuracy(),
                    "fold finished"
                );
                Ok((train.len(), evaluation))
            })
            .collect::<Result<Vec<_>, TreeError>>()?;

        let mut matrix = ConfusionMatrix::new(data.catalog().n_classes());
        let mut summaries = Vec::with_capacity(outcomes.len());
        for (i, (n_train, evaluation)) in outcomes.into_iter().enumerate() {
            matrix += evaluation.confusion_matrix();
            let summary = FoldSummary {
                n_train,
                n_test: evaluation.n_instances(),
                accuracy: evaluation.accuracy(),
            };
            if self.verbose {
                print_fold(i + 1, &summary);
            }
            summaries.push(summary);
        }

        let evaluation = EvaluationResult::from_matrix(matrix, class_labels(data));
        info!(
            accuracy = evaluation.accuracy(),
            weighted_f1 = evaluation.weighted_f1(),
            "cross validation finished"
        );

        Ok(CrossValidationResult {
            evaluation,
            folds: summaries,
            seed: self.seed,
            stratified: self.stratified,
        })
    }
}


/// Runs `n_folds`-fold cross validation of the default builder
/// and returns the combined evaluation.
pub fn cross_validate(data: &Dataset, n_folds: usize, seed: u64)
    -> Result<EvaluationResult, TreeError>
{
    CrossValidation::new(n_folds)
        .seed(seed)
        .run(data)
        .map(|result| result.evaluation)
}


/// An iterator over the `(train, test)` pairs of a cross validation.
pub struct Folds<'a> {
    data: &'a Dataset,
    ix: Vec<usize>,
    n_folds: usize,
    current_fold: usize,
    verbose: bool,
}


impl<'a> Folds<'a> {
    /// Returns the half-open range of fold `i` in the fold order.
    pub fn bounds(&self, i: usize) -> (usize, usize) {
        let n = self.ix.len();
        let base = n / self.n_folds;
        let extra = n % self.n_folds;
        let start = i * base + i.min(extra);
        let size = base + usize::from(i < extra);
        (start, start + size)
    }


    /// Returns the training/test sample for `i`th fold.
    #[inline]
    fn fold_at(&self, i: usize) -> (Dataset, Dataset) {
        let (start, end) = self.bounds(i);
        let test = self.data.select(&self.ix[start..end]);
        let train_ix = self.ix[..start].iter()
            .chain(self.ix[end..].iter())
            .copied()
            .collect::<Vec<_>>();
        let train = self.data.select(&train_ix[..]);
        (train, test)
    }
}


impl<'a> Iterator for Folds<'a> {
    type Item = (Dataset, Dataset);
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_fold >= self.n_folds { return None; }

        let output = self.fold_at(self.current_fold);
        self.current_fold += 1;

        if self.verbose {
            println!(
                "{}    {}    {}",
                format!("  [{: >3}'th fold]", self.current_fold).bold().red(),
                format!("[TRAIN {:>WIDTH$}]", output.0.len()).bold().green(),
                format!("[TEST {:>WIDTH$}]", output.1.len()).bold().yellow(),
            );
        }

        Some(output)
    }
}


fn print_fold(fold: usize, summary: &FoldSummary) {
    println!(
        "{}    {}    {}    {}",
        format!("  [{: >3}'th fold]", fold).bold().red(),
        format!("[TRAIN {:>WIDTH$}]", summary.n_train).bold().green(),
        format!("[TEST {:>WIDTH$}]", summary.n_test).bold().yellow(),
        format!("[ACC {:>WIDTH$.4}]", summary.accuracy).bold().cyan(),
    );
}


/// Groups `ix` by class, in order of first appearance,
/// then deals the grouped order out with stride `n_folds`.
fn stratify(data: &Dataset, ix: Vec<usize>, n_folds: usize) -> Vec<usize> {
    let mut group_of: Vec<Option<usize>> = vec![None; data.catalog().n_classes()];
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for p in ix {
        let class = data.class_value(p);
        let g = match group_of[class] {
            Some(g) => g,
            None => {
                groups.push(Vec::new());
                group_of[class] = Some(groups.len() - 1);
                groups.len() - 1
            },
        };
        groups[g].push(p);
    }

    let grouped = groups.concat();
    let n = grouped.len();
    (0..n_folds)
        .flat_map(|start| (start..n).step_by(n_folds))
        .map(|j| grouped[j])
        .collect()
}
