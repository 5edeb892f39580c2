//! Typeahead search terms.
//!
//! Lookup fields (patient search, registration search) only query the
//! backend once the operator has typed at least two characters; anything
//! shorter would flood the backend with single-character queries. The gate
//! lives in the type: a [`SearchTerm`] in hand is always long enough to send.

/// Minimum number of characters before a typeahead query is issued.
pub const MIN_SEARCH_CHARS: usize = 2;

/// Errors that can occur when creating a search term.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SearchTermError {
    /// The trimmed input is shorter than [`MIN_SEARCH_CHARS`].
    #[error("search terms need at least {MIN_SEARCH_CHARS} characters")]
    TooShort,
}

/// A trimmed lookup query of at least [`MIN_SEARCH_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Creates a search term from operator input.
    ///
    /// The input is trimmed first; length is counted in characters, not
    /// bytes, so two-character non-ASCII names pass the gate.
    ///
    /// # Errors
    ///
    /// Returns [`SearchTermError::TooShort`] when the trimmed input has
    /// fewer than [`MIN_SEARCH_CHARS`] characters.
    pub fn new(input: impl AsRef<str>) -> Result<Self, SearchTermError> {
        let trimmed = input.as_ref().trim();
        if trimmed.chars().count() < MIN_SEARCH_CHARS {
            return Err(SearchTermError::TooShort);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the term as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SearchTerm {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_characters_pass_the_gate() {
        assert_eq!(SearchTerm::new("an").unwrap().as_str(), "an");
    }

    #[test]
    fn one_character_is_too_short() {
        assert_eq!(SearchTerm::new("a"), Err(SearchTermError::TooShort));
    }

    #[test]
    fn whitespace_does_not_count() {
        assert_eq!(SearchTerm::new("  a  "), Err(SearchTermError::TooShort));
        assert_eq!(SearchTerm::new(" an "), Ok(SearchTerm::new("an").unwrap()));
    }

    #[test]
    fn length_is_counted_in_characters() {
        // Two characters, three bytes.
        assert!(SearchTerm::new("än").is_ok());
    }
}
