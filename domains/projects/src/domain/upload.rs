//! Upload gate: pure validation of incoming file attachments
//!
//! Runs before any network call to storage, so rejected uploads never
//! reach the storage layer. No side effects.

use handasa_common::Error;
use thiserror::Error;

/// Size ceiling for any single attachment (50 MiB)
pub const MAX_SIZE_BYTES: usize = 50 * 1024 * 1024;

/// Extension allow-list for the `image` field
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Extension allow-list for the `file` (CAD) field
pub const CAD_EXTENSIONS: &[&str] = &["pdf", "dwg", "dxf"];

/// A named file attachment extracted from a multipart request
#[derive(Debug, Clone)]
pub struct Attachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Final dot-separated extension, lowercased. Empty when absent.
    pub fn extension(&self) -> String {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default()
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Upload gate failures
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UploadGateError {
    #[error("attachment field '{field}' is missing")]
    MissingField { field: &'static str },

    #[error("attachment field '{field}' has unsupported extension '.{extension}'")]
    UnsupportedType {
        field: &'static str,
        extension: String,
    },

    #[error("attachment field '{field}' exceeds the size ceiling")]
    TooLarge { field: &'static str },
}

impl From<UploadGateError> for Error {
    fn from(err: UploadGateError) -> Self {
        match err {
            UploadGateError::MissingField { .. } => {
                Error::Validation("يجب رفع صورة وملف CAD".to_string())
            }
            UploadGateError::UnsupportedType { field, extension } => {
                let message = if field == "image" {
                    format!("نوع الصورة .{extension} غير مدعوم")
                } else {
                    format!(
                        "نوع الملف .{extension} غير مدعوم. الأنواع المدعومة: .pdf, .dwg, .dxf"
                    )
                };
                Error::UnsupportedType(message)
            }
            UploadGateError::TooLarge { .. } => {
                Error::TooLarge("حجم الملف كبير جداً. الحد الأقصى 50MB".to_string())
            }
        }
    }
}

/// Validates the two expected attachment fields of a submission
pub struct UploadGate;

impl UploadGate {
    /// Validate both fields; the first failure wins.
    pub fn validate(
        image: Option<&Attachment>,
        cad_file: Option<&Attachment>,
    ) -> Result<(), UploadGateError> {
        Self::check("image", IMAGE_EXTENSIONS, image)?;
        Self::check("file", CAD_EXTENSIONS, cad_file)?;
        Ok(())
    }

    fn check(
        field: &'static str,
        allowed: &[&str],
        attachment: Option<&Attachment>,
    ) -> Result<(), UploadGateError> {
        let attachment = attachment.ok_or(UploadGateError::MissingField { field })?;

        let extension = attachment.extension();
        if !allowed.contains(&extension.as_str()) {
            return Err(UploadGateError::UnsupportedType { field, extension });
        }

        if attachment.size() > MAX_SIZE_BYTES {
            return Err(UploadGateError::TooLarge { field });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment(file_name: &str, size: usize) -> Attachment {
        Attachment {
            file_name: file_name.to_string(),
            bytes: vec![0; size],
        }
    }

    #[test]
    fn test_valid_pair_passes() {
        let image = attachment("bridge.png", 1024);
        let cad = attachment("bridge.dwg", 8 * 1024 * 1024);
        assert_eq!(UploadGate::validate(Some(&image), Some(&cad)), Ok(()));
    }

    #[test]
    fn test_missing_fields() {
        let image = attachment("bridge.png", 1024);
        assert_eq!(
            UploadGate::validate(None, None),
            Err(UploadGateError::MissingField { field: "image" })
        );
        assert_eq!(
            UploadGate::validate(Some(&image), None),
            Err(UploadGateError::MissingField { field: "file" })
        );
    }

    #[test]
    fn test_extension_allow_lists() {
        let bad_image = attachment("bridge.gif", 1024);
        let cad = attachment("bridge.dwg", 1024);
        assert_eq!(
            UploadGate::validate(Some(&bad_image), Some(&cad)),
            Err(UploadGateError::UnsupportedType {
                field: "image",
                extension: "gif".to_string()
            })
        );

        let image = attachment("bridge.png", 1024);
        let bad_cad = attachment("bridge.stl", 1024);
        assert_eq!(
            UploadGate::validate(Some(&image), Some(&bad_cad)),
            Err(UploadGateError::UnsupportedType {
                field: "file",
                extension: "stl".to_string()
            })
        );
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let image = attachment("BRIDGE.PNG", 1024);
        let cad = attachment("Bridge.DWG", 1024);
        assert_eq!(UploadGate::validate(Some(&image), Some(&cad)), Ok(()));
    }

    #[test]
    fn test_no_extension_is_unsupported() {
        let image = attachment("bridge", 1024);
        let cad = attachment("bridge.dwg", 1024);
        assert!(matches!(
            UploadGate::validate(Some(&image), Some(&cad)),
            Err(UploadGateError::UnsupportedType { field: "image", .. })
        ));
    }

    #[test]
    fn test_size_ceiling_boundary() {
        let image = attachment("bridge.png", 1024);
        let at_limit = attachment("bridge.dwg", MAX_SIZE_BYTES);
        assert_eq!(UploadGate::validate(Some(&image), Some(&at_limit)), Ok(()));

        let over_limit = attachment("bridge.dwg", MAX_SIZE_BYTES + 1);
        assert_eq!(
            UploadGate::validate(Some(&image), Some(&over_limit)),
            Err(UploadGateError::TooLarge { field: "file" })
        );
    }

    #[test]
    fn test_too_large_message_names_the_limit() {
        let err: handasa_common::Error = UploadGateError::TooLarge { field: "file" }.into();
        assert!(err.to_string().contains("50MB"));
    }
}
