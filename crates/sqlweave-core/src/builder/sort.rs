//! ORDER BY specifications.

use super::expr::RenderOptions;

/// Sort direction for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// No keyword is emitted; the back-end default applies.
    #[default]
    Unspecified,
    /// `ASC`
    Asc,
    /// `DESC`
    Desc,
}

impl Direction {
    /// Parses a direction token.
    ///
    /// An empty token is [`Direction::Unspecified`]; `desc` in any case is
    /// descending; anything else falls back to ascending.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        if token.is_empty() {
            Self::Unspecified
        } else if token.eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    const fn keyword(self) -> &'static str {
        match self {
            Self::Unspecified => "",
            Self::Asc => " ASC",
            Self::Desc => " DESC",
        }
    }
}

/// An ordered list of `(field, direction)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sorting {
    fields: Vec<(String, Direction)>,
}

impl Sorting {
    /// Creates an empty specification.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field with an explicit direction.
    #[must_use]
    pub fn by(mut self, field: &str, direction: Direction) -> Self {
        self.fields.push((String::from(field), direction));
        self
    }

    /// Appends an ascending field.
    #[must_use]
    pub fn asc(self, field: &str) -> Self {
        self.by(field, Direction::Asc)
    }

    /// Appends a descending field.
    #[must_use]
    pub fn desc(self, field: &str) -> Self {
        self.by(field, Direction::Desc)
    }

    /// Builds a specification from `(field, token)` pairs, see
    /// [`Direction::parse`].
    #[must_use]
    pub fn from_tokens<I, F, D>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (F, D)>,
        F: AsRef<str>,
        D: AsRef<str>,
    {
        pairs.into_iter().fold(Self::new(), |sorting, (field, token)| {
            sorting.by(field.as_ref(), Direction::parse(token.as_ref()))
        })
    }

    /// Parses `"a DESC, b, c asc"`.
    #[must_use]
    pub fn parse(spec: &str) -> Self {
        Self::from_tokens(spec.split(',').filter_map(|part| {
            let mut words = part.split_whitespace();
            let field = words.next()?;
            Some((field, words.next().unwrap_or("")))
        }))
    }

    /// Returns true when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the fields in order.
    #[must_use]
    pub fn fields(&self) -> &[(String, Direction)] {
        &self.fields
    }

    /// Renders the clause body (without `ORDER BY`).
    #[must_use]
    pub fn build(&self, opts: &RenderOptions) -> String {
        self.fields
            .iter()
            .map(|(field, direction)| format!("{}{}", opts.qualify(field), direction.keyword()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
