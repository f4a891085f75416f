//! Pessimistic error-based pruning.
//!
//! A node covering `n` training instances, `e` of which are
//! misclassified by its majority class, is charged
//! `e + extra_errors(n, e, cf)` errors, where `extra_errors` is the gap
//! between `e` and the upper confidence limit of the binomial error
//! at confidence `cf`.
//! A subtree is replaced by a leaf when the leaf is charged
//! no more errors than the subtree.
use tracing::trace;

use crate::common::utils::normal_inverse;
use super::node::Node;


/// Slack for the leaf-versus-subtree comparison.
const PRUNE_TOLERANCE: f64 = 1e-6;


/// Prunes `node` in place, bottom-up.
/// Returns the estimated number of errors of the pruned subtree.
pub(crate) fn prune(node: &mut Node, confidence: f64) -> f64 {
    let z = normal_inverse(1f64 - confidence);
    prune_with(node, confidence, z)
}


fn prune_with(node: &mut Node, cf: f64, z: f64) -> f64 {
    let (subtree, as_leaf) = match node {
        Node::Leaf { class, counts } => {
            let n = counts.total();
            let errors = n - counts.get(*class);
            return estimated_errors(n as f64, errors as f64, cf, z);
        },
        Node::Split { children, counts, .. } => {
            let subtree = children.iter_mut()
                .map(|child| prune_with(child, cf, z))
                .sum::<f64>();
            let as_leaf = estimated_errors(
                counts.total() as f64, counts.errors() as f64, cf, z
            );
            (subtree, as_leaf)
        },
    };

    if as_leaf <= subtree + PRUNE_TOLERANCE {
        let counts = node.counts().clone();
        trace!(
            n_instances = counts.total(),
            as_leaf,
            subtree,
            "collapse subtree"
        );
        *node = Node::leaf(counts);
        as_leaf
    } else {
        subtree
    }
}


/// Sums the estimated errors of the leaves under `node`.
/// For a tree returned by [`prune`] this is the value `prune` returned.
pub(crate) fn leaf_estimate(node: &Node, confidence: f64) -> f64 {
    let z = normal_inverse(1f64 - confidence);
    leaf_estimate_with(node, confidence, z)
}


fn leaf_estimate_with(node: &Node, cf: f64, z: f64) -> f64 {
    match node {
        Node::Leaf { class, counts } => {
            let n = counts.total();
            let errors = n - counts.get(*class);
            estimated_errors(n as f64, errors as f64, cf, z)
        },
        Node::Split { children, .. } => {
            children.iter()
                .map(|child| leaf_estimate_with(child, cf, z))
                .sum()
        },
    }
}


/// Observed plus extra errors of a node covering `n` instances.
/// A node that covers nothing is charged nothing.
#[inline]
fn estimated_errors(n: f64, e: f64, cf: f64, z: f64) -> f64 {
    if n <= 0f64 { return 0f64; }
    e + extra_errors(n, e, cf, z)
}


/// The number of errors to add to the observed `e` errors out of `n`
/// so that the total is the upper confidence limit at level `cf`.
/// `z` must be the standard normal quantile of `1 - cf`.
pub(crate) fn extra_errors(n: f64, e: f64, cf: f64, z: f64) -> f64 {
    if n <= 0f64 { return 0f64; }

    // Exact binomial bound for no error, interpolated below one error.
    if e < 1f64 {
        let base = n * (1f64 - cf.powf(1f64 / n));
        if e <= 0f64 { return base; }
        return base + e * (extra_errors(n, 1f64, cf, z) - base);
    }

    if e + 0.5 >= n {
        return (n - e).max(0f64);
    }

    // Normal approximation with continuity correction.
    let zz = z * z;
    let f = (e + 0.5) / n;
    let r = (f + zz / (2f64 * n)
        + z * (f / n - f * f / n + zz / (4f64 * n * n)).sqrt())
        / (1f64 + zz / n);

    r * n - e
}
