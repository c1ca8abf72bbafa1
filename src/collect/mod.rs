mod corpus;
mod native;
mod resources;

pub use corpus::{Corpus, CorpusBuilder};
pub use native::{collect_native_libs, NativeLibraryEntry};
pub use resources::{
    DensityBucket, ResourceCategory, ResourceCollector, ResourceFile, ResourceScan,
};
