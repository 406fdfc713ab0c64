use crate::error::{AppError, Result};
use std::path::Path;

/// Ordered label file: one label per line, line index is the class id.
///
/// Serves both directions of the mapping. The image classifier resolves a
/// predicted class index to its label; the appliance encoder resolves an
/// appliance name to the integer id the regression model was trained with.
#[derive(Debug, Clone)]
pub struct LabelSet {
    labels: Vec<String>,
}

impl LabelSet {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::Artifact(format!("failed to read label file {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let labels: Vec<String> = content
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        if labels.is_empty() {
            return Err(AppError::Artifact(
                "label file contains no labels".to_string(),
            ));
        }

        Ok(Self { labels })
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_line_order() {
        let labels = LabelSet::parse("apple\nbanana\ncarrot\n").unwrap();

        assert_eq!(labels.len(), 3);
        assert_eq!(labels.get(0), Some("apple"));
        assert_eq!(labels.get(1), Some("banana"));
        assert_eq!(labels.get(2), Some("carrot"));
    }

    #[test]
    fn test_index_of_known_and_unknown() {
        let labels = LabelSet::parse("Fridge\nWasher\nHeater\n").unwrap();

        assert_eq!(labels.index_of("Washer"), Some(1));
        assert_eq!(labels.index_of("Toaster"), None);
    }

    #[test]
    fn test_parse_skips_blank_lines_and_trims() {
        let labels = LabelSet::parse("apple\r\n\nbanana  \n\n").unwrap();

        assert_eq!(labels.labels(), &["apple".to_string(), "banana".to_string()]);
    }

    #[test]
    fn test_parse_empty_content_is_an_error() {
        let result = LabelSet::parse("\n\n");

        assert!(result.is_err());
    }

    #[test]
    fn test_get_out_of_range() {
        let labels = LabelSet::parse("apple\n").unwrap();

        assert_eq!(labels.get(5), None);
    }

    #[test]
    fn test_from_file_missing_file() {
        let result = LabelSet::from_file("/nonexistent/labels.txt");

        assert!(result.is_err());
    }
}
