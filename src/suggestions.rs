use std::sync::Arc;

/// Derives suggestions from the popular-search list.
#[derive(Debug, Clone)]
pub struct SuggestionGenerator {
    popular: Arc<[String]>,
}

impl SuggestionGenerator {
    pub fn new(popular: Arc<[String]>) -> Self {
        Self { popular }
    }

    /// Lazily yields the entries containing `query`, case-insensitively, in
    /// list order. Nothing is yielded for an empty query. Calling again
    /// restarts from the top.
    pub fn iter<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a str> + 'a {
        let needle = (!query.is_empty()).then(|| query.to_lowercase());
        self.popular
            .iter()
            .filter(move |entry| match &needle {
                Some(needle) => entry.to_lowercase().contains(needle.as_str()),
                None => false,
            })
            .map(String::as_str)
    }

    pub fn suggest(&self, query: &str) -> Vec<String> {
        self.iter(query).map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::POPULAR_SEARCHES;

    fn generator() -> SuggestionGenerator {
        SuggestionGenerator::new(POPULAR_SEARCHES.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_empty_query_has_no_suggestions() {
        assert!(generator().suggest("").is_empty());
    }

    #[test]
    fn test_case_insensitive_substring_in_order() {
        assert_eq!(generator().suggest("DOG"), vec!["Dog grooming", "Dog trainer"]);
        assert_eq!(
            generator().suggest("pet"),
            vec!["Lost pets nearby", "Pet sitter"]
        );
        assert_eq!(generator().suggest("vet"), vec!["Veterinarian"]);
    }

    #[test]
    fn test_no_match() {
        assert!(generator().suggest("hamster").is_empty());
    }

    #[test]
    fn test_iter_is_restartable() {
        let generator = generator();
        let first: Vec<_> = generator.iter("dog").collect();
        let second: Vec<_> = generator.iter("dog").collect();
        assert_eq!(first, second);
        assert_eq!(generator.iter("dog").next(), Some("Dog grooming"));
    }
}
