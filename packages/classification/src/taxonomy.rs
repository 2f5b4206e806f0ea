//! The closed set of permissible classification labels.
//!
//! Order matters for prompt construction (the classifier sees the
//! labels in sequence), membership checks are set-based.

use std::collections::HashSet;

use crate::error::{PipelineError, Result};

/// A fixed, ordered set of distinct category labels.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    labels: Vec<String>,
    index: HashSet<String>,
}

impl Taxonomy {
    /// Create a taxonomy from an ordered label list.
    ///
    /// Rejects empty lists, blank labels, and duplicates.
    pub fn new(labels: impl IntoIterator<Item = impl Into<String>>) -> Result<Self> {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();

        if labels.is_empty() {
            return Err(PipelineError::InvalidTaxonomy {
                reason: "label list is empty".into(),
            });
        }

        let mut index = HashSet::with_capacity(labels.len());
        for label in &labels {
            if label.trim().is_empty() {
                return Err(PipelineError::InvalidTaxonomy {
                    reason: "blank label".into(),
                });
            }
            if !index.insert(label.clone()) {
                return Err(PipelineError::InvalidTaxonomy {
                    reason: format!("duplicate label: {label}"),
                });
            }
        }

        Ok(Self { labels, index })
    }

    /// The ten labels of the original Korean hate-speech deployment:
    /// eight hate categories, one profanity bucket, and `clean`.
    pub fn korean_hate_speech() -> Self {
        Self::new([
            "여성/가족",
            "남성",
            "성소수자",
            "인종/국적",
            "연령",
            "지역",
            "종교",
            "기타 혐오",
            "악플/욕설",
            "clean",
        ])
        .expect("built-in label set is valid")
    }

    /// Exact membership test.
    pub fn contains(&self, label: &str) -> bool {
        self.index.contains(label)
    }

    /// Labels in prompt order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false; the constructor rejects empty label lists.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Comma-joined label list for embedding in a prompt.
    pub fn prompt_list(&self) -> String {
        self.labels.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_order_and_membership() {
        let taxonomy = Taxonomy::new(["b", "a", "c"]).unwrap();
        assert_eq!(taxonomy.labels(), ["b", "a", "c"]);
        assert!(taxonomy.contains("a"));
        assert!(!taxonomy.contains("d"));
        assert_eq!(taxonomy.prompt_list(), "b, a, c");
    }

    #[test]
    fn test_rejects_empty() {
        let err = Taxonomy::new(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidTaxonomy { .. }));
    }

    #[test]
    fn test_rejects_duplicates() {
        let err = Taxonomy::new(["a", "b", "a"]).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidTaxonomy { .. }));
    }

    #[test]
    fn test_rejects_blank_label() {
        let err = Taxonomy::new(["a", "  "]).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidTaxonomy { .. }));
    }

    #[test]
    fn test_korean_hate_speech_defaults() {
        let taxonomy = Taxonomy::korean_hate_speech();
        assert_eq!(taxonomy.len(), 10);
        assert!(taxonomy.contains("clean"));
        assert!(taxonomy.contains("악플/욕설"));
    }

    #[test]
    fn test_membership_is_exact() {
        let taxonomy = Taxonomy::korean_hate_speech();
        assert!(!taxonomy.contains("Clean"));
        assert!(!taxonomy.contains(" clean"));
    }
}
