use serde::Deserialize;
use thiserror::Error;

/// Pages shipped with the binary.
pub const BUILTIN_PAGES: &str = include_str!("../pages.yaml");

#[derive(Debug, Deserialize)]
pub struct PageFile {
    pub pages: Vec<Page>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Page {
    pub title: String,

    /// Body text, may carry `{marker}` styling (see `markup`).
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse pages: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("pages file must contain at least one page")]
    Empty,

    #[error("page {index} has an empty title")]
    BlankTitle { index: usize },

    #[error("page {index} is out of range (catalog has {len} pages)")]
    OutOfRange { index: usize, len: usize },
}

/// Ordered, non-empty, read-only sequence of pages.
#[derive(Debug, Clone)]
pub struct Catalog {
    pages: Vec<Page>,
}

impl Catalog {
    pub fn new(pages: Vec<Page>) -> Result<Self, CatalogError> {
        let catalog = Self { pages };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let file: PageFile = serde_yaml::from_str(yaml)?;
        Self::new(file.pages)
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml_str(BUILTIN_PAGES)
    }

    pub fn page_at(&self, index: usize) -> Result<&Page, CatalogError> {
        self.pages.get(index).ok_or(CatalogError::OutOfRange {
            index,
            len: self.pages.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.is_empty() {
            return Err(CatalogError::Empty);
        }

        for (index, page) in self.pages.iter().enumerate() {
            if page.title.trim().is_empty() {
                return Err(CatalogError::BlankTitle { index });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn test_catalog(len: usize) -> Catalog {
    let pages = (0..len)
        .map(|i| Page {
            title: format!("Page {}", i + 1),
            body: format!("body of page {}", i + 1),
        })
        .collect();
    Catalog::new(pages).unwrap()
}
