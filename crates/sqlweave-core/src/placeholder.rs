//! Parameter marker strategies.
//!
//! Each dialect binds parameters with its own marker syntax. A
//! [`PlaceholderStrategy`] is a factory: every statement build asks it for a
//! fresh [`Placeholder`] generator, so numbering always restarts at 1 and two
//! builds never share a counter.
//!
//! ```rust
//! use sqlweave_core::placeholder::PlaceholderStrategy;
//!
//! let strategy = PlaceholderStrategy::dollar();
//! let mut gen = strategy.generator();
//! assert_eq!(gen.next_marker("id"), "$1");
//! assert_eq!(gen.next_marker("name"), "$2");
//!
//! // A new generator starts over.
//! assert_eq!(strategy.generator().next_marker("id"), "$1");
//! ```

use std::fmt;
use std::sync::Arc;

/// A stateful marker generator scoped to a single statement build.
///
/// `field` is the column the marker binds to. None of the built-in
/// strategies use it, but custom strategies may (e.g. named parameters).
pub trait Placeholder: Send {
    /// Returns the marker for the next bound value.
    fn next_marker(&mut self, field: &str) -> String;
}

impl<F> Placeholder for F
where
    F: FnMut(&str) -> String + Send,
{
    fn next_marker(&mut self, field: &str) -> String {
        self(field)
    }
}

/// Returns the same token for every call.
#[derive(Debug, Clone)]
pub struct Unnumbered {
    token: &'static str,
}

impl Unnumbered {
    /// Creates a generator that always yields `token`.
    #[must_use]
    pub const fn new(token: &'static str) -> Self {
        Self { token }
    }
}

impl Placeholder for Unnumbered {
    fn next_marker(&mut self, _field: &str) -> String {
        String::from(self.token)
    }
}

/// Yields `<prefix><n>` with `n` starting at 1.
#[derive(Debug, Clone)]
pub struct Numbered {
    prefix: &'static str,
    count: usize,
}

impl Numbered {
    /// Creates a generator for `prefix` with the counter at 0.
    #[must_use]
    pub const fn new(prefix: &'static str) -> Self {
        Self { prefix, count: 0 }
    }
}

impl Placeholder for Numbered {
    fn next_marker(&mut self, _field: &str) -> String {
        self.count += 1;
        format!("{}{}", self.prefix, self.count)
    }
}

type Factory = dyn Fn() -> Box<dyn Placeholder> + Send + Sync;

/// A factory producing independent [`Placeholder`] generators.
///
/// Cloning a strategy shares the factory, never a counter.
#[derive(Clone)]
pub struct PlaceholderStrategy {
    name: &'static str,
    factory: Arc<Factory>,
}

impl PlaceholderStrategy {
    /// `?` for every parameter (generic drivers, `MySQL`, `SQLite`).
    #[must_use]
    pub fn question() -> Self {
        Self::from_fn("question", || Box::new(Unnumbered::new("?")))
    }

    /// `$1`, `$2`, ... (`PostgreSQL`).
    #[must_use]
    pub fn dollar() -> Self {
        Self::from_fn("dollar", || Box::new(Numbered::new("$")))
    }

    /// `:1`, `:2`, ... (Oracle).
    #[must_use]
    pub fn colon() -> Self {
        Self::from_fn("colon", || Box::new(Numbered::new(":")))
    }

    /// `@p1`, `@p2`, ... (SQL Server, document stores).
    #[must_use]
    pub fn at_p() -> Self {
        Self::from_fn("at_p", || Box::new(Numbered::new("@p")))
    }

    /// Wraps a custom factory.
    ///
    /// The closure is invoked once per statement build and must return a new
    /// generator each time.
    #[must_use]
    pub fn from_fn<F>(name: &'static str, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Placeholder> + Send + Sync + 'static,
    {
        Self {
            name,
            factory: Arc::new(factory),
        }
    }

    /// Returns a fresh generator.
    #[must_use]
    pub fn generator(&self) -> Box<dyn Placeholder> {
        (self.factory)()
    }

    /// Returns the strategy name, for diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for PlaceholderStrategy {
    fn default() -> Self {
        Self::question()
    }
}

impl fmt::Debug for PlaceholderStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaceholderStrategy")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
