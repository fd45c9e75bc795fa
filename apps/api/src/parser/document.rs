use bytes::Bytes;
use tracing::info;

use crate::parser::error::ParsingError;

/// Upload ceiling: 10 MB.
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// An uploaded file as received from the caller. Dropped once its text has
/// been extracted.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub filename: String,
    pub bytes: Bytes,
}

impl RawDocument {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Lower-cased extension from the declared filename, if any.
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.filename.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_lowercase())
    }
}

/// Rejects files above the size ceiling. Content type is checked later.
pub fn validate(doc: &RawDocument) -> Result<(), ParsingError> {
    info!(name = %doc.filename, size = doc.size(), "Validating uploaded file");
    if doc.size() > MAX_FILE_SIZE {
        return Err(ParsingError::FileTooLarge {
            size: doc.size(),
            max: MAX_FILE_SIZE,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_file_at_ceiling() {
        let doc = RawDocument::new("cv.pdf", vec![0u8; MAX_FILE_SIZE]);
        assert!(validate(&doc).is_ok());
    }

    #[test]
    fn test_validate_rejects_file_over_ceiling() {
        let doc = RawDocument::new("cv.pdf", vec![0u8; MAX_FILE_SIZE + 1]);
        let err = validate(&doc).unwrap_err();
        assert!(matches!(
            err,
            ParsingError::FileTooLarge { size, .. } if size == MAX_FILE_SIZE + 1
        ));
    }

    #[test]
    fn test_validate_accepts_empty_file() {
        assert!(validate(&RawDocument::new("cv.pdf", Vec::<u8>::new())).is_ok());
    }

    #[test]
    fn test_extension_is_lowercased() {
        assert_eq!(
            RawDocument::new("Mon CV.DOCX", Vec::<u8>::new()).extension(),
            Some("docx".to_string())
        );
        assert_eq!(RawDocument::new("resume", Vec::<u8>::new()).extension(), None);
        assert_eq!(RawDocument::new(".docx", Vec::<u8>::new()).extension(), None);
    }
}
