//! # sqlweave-repo
//!
//! Insert-if-absent, update-or-insert and bulk delete on top of
//! `sqlweave-core` statements, for back-ends without native upsert.
//!
//! The crate only renders and sequences statements. Running them is the job
//! of an [`Executor`]; recognizing uniqueness violations is the job of a
//! [`DuplicateKeyClassifier`].
//!
//! ```ignore
//! use sqlweave_repo::{KeyColumns, RecordMapper, Repository, RepositoryOptions};
//!
//! let mut repo = Repository::new(executor, RecordMapper::default(), KeyColumns::new(&["email"]))
//!     .with_options(RepositoryOptions::new().with_transactional(true))
//!     .with_classifier(classifier);
//!
//! // Ok(1) the first time, Err(RepoError::DuplicatedEntry) afterwards.
//! repo.create(None, "users", &record).await?;
//!
//! // Updates in place, or inserts when nothing matched.
//! repo.save(None, "users", &record).await?;
//! ```

pub mod classifier;
pub mod context;
pub mod error;
pub mod executor;
pub mod filter;
pub mod mapper;
pub mod options;
pub mod repository;

pub use classifier::{DuplicateKeyClassifier, NeverDuplicate};
pub use context::Context;
pub use error::{BoxError, RepoError, Result};
pub use executor::Executor;
pub use filter::filter_from_json;
pub use mapper::{FilterFactory, KeyColumns, RecordMapper, RowMapper, SerdeMapper};
pub use options::{ExistingRowPolicy, IsolationLevel, RepositoryOptions};
pub use repository::{Query, Repository};
