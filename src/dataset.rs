//! Struct `Dataset` represents a batch of categorical instances
//! described by a [`FeatureCatalog`].

// Provides the attribute struct.
pub(crate) mod attribute;
// Provides the catalog struct.
pub(crate) mod catalog;
// Provides the per-class counter.
pub(crate) mod class_counts;
// Provides the instance struct.
pub(crate) mod instance;
// Provides the dataset struct.
pub(crate) mod dataset_struct;

// Provides a struct that reads an ARFF file.
pub(crate) mod reader;


pub use attribute::Attribute;
pub use catalog::FeatureCatalog;
pub use class_counts::ClassCounts;
pub use instance::{Instance, MISSING};
pub use dataset_struct::Dataset;
pub use reader::DatasetReader;
