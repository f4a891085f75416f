//! This file defines some functions that checks
//! the parameters given by the user.
use crate::TreeError;


/// Check whether the pruning confidence lies in `(0, 0.5]`.
#[inline(always)]
pub(crate) fn check_confidence(confidence: f64) -> Result<(), TreeError> {
    if confidence > 0f64 && confidence <= 0.5 {
        Ok(())
    } else {
        Err(TreeError::InvalidConfidence { confidence })
    }
}


/// Check whether the minimum leaf size is positive.
#[inline(always)]
pub(crate) fn check_min_leaf_size(min_leaf_size: usize)
    -> Result<(), TreeError>
{
    if min_leaf_size == 0 {
        return Err(TreeError::InvalidMinLeafSize { min_leaf_size });
    }
    Ok(())
}


/// Check whether `n_instances` instances can be split into `n_folds` folds.
#[inline(always)]
pub(crate) fn check_folds(n_folds: usize, n_instances: usize)
    -> Result<(), TreeError>
{
    if n_folds < 2 {
        return Err(TreeError::InvalidFoldCount { n_folds });
    }
    if n_instances < n_folds {
        return Err(TreeError::TooFewInstancesForFolds {
            n_folds, n_instances,
        });
    }
    Ok(())
}


/// Check whether the train fraction lies in `(0, 1)`.
#[inline(always)]
pub(crate) fn check_train_fraction(fraction: f64) -> Result<(), TreeError> {
    if fraction > 0f64 && fraction < 1f64 {
        Ok(())
    } else {
        Err(TreeError::InvalidTrainFraction { fraction })
    }
}
