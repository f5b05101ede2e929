//! Selector-to-column mappings: positional generation, validation, row
//! application, similarity-based auto-mapping and persistence.

pub mod auto_map;
pub mod error;
pub mod mapping;
pub mod persistence;
pub mod similarity;
pub mod store;
pub mod tokenize;

pub use auto_map::{AutoMapOptions, DEFAULT_THRESHOLD, auto_map};
pub use error::{MappingError, PersistenceError, StorageError};
pub use mapping::{
    Mapping, RowData, SelectorValueMap, apply_mapping, generate_mapping, validate_mapping,
    validate_pairs,
};
pub use persistence::{MappingRepository, mapping_key};
pub use similarity::{Scorer, ScorerKind};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use tokenize::{TokenSet, tokenize};
