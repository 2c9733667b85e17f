//! Image attachment ingestion.
//!
//! Turns a picked file (or a `data:` URL) into a [`MedicalImage`]: standard
//! base64 payload, MIME type from the extension, file name as label.

use std::path::Path;

use afce_core::MedicalImage;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::IngestError;

/// MIME type for a file extension, case-insensitively.
#[must_use]
pub fn mime_for_extension(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

/// Load an image attachment.
///
/// `None` means no file was chosen and yields `Ok(None)`.
///
/// # Errors
///
/// Returns [`IngestError::UnsupportedType`] for an unknown extension and
/// [`IngestError::Io`] if the file cannot be read.
pub fn load_image(path: Option<&Path>) -> Result<Option<MedicalImage>, IngestError> {
    let Some(path) = path else {
        return Ok(None);
    };

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    let mime_type = mime_for_extension(extension)
        .ok_or_else(|| IngestError::UnsupportedType(path.display().to_string()))?;

    let bytes = std::fs::read(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let label = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());

    tracing::debug!(%label, mime_type, bytes = bytes.len(), "image loaded");
    Ok(Some(MedicalImage {
        data: STANDARD.encode(&bytes),
        mime_type: mime_type.to_string(),
        label,
    }))
}

/// Build an image from a `data:<mime>;base64,<payload>` URL.
///
/// # Errors
///
/// Returns [`IngestError::InvalidDataUrl`] when the URL is malformed, not
/// base64, or its payload does not decode; [`IngestError::UnsupportedType`]
/// when the MIME type is not an image.
pub fn image_from_data_url(url: &str, label: &str) -> Result<MedicalImage, IngestError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| IngestError::InvalidDataUrl("missing data: prefix".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| IngestError::InvalidDataUrl("missing payload separator".to_string()))?;
    let mime_type = header
        .strip_suffix(";base64")
        .ok_or_else(|| IngestError::InvalidDataUrl("payload is not base64".to_string()))?;
    if !mime_type.starts_with("image/") {
        return Err(IngestError::UnsupportedType(mime_type.to_string()));
    }
    STANDARD
        .decode(payload)
        .map_err(|e| IngestError::InvalidDataUrl(e.to_string()))?;

    Ok(MedicalImage {
        data: payload.to_string(),
        mime_type: mime_type.to_string(),
        label: label.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn no_file_is_no_image() {
        assert!(load_image(None).unwrap().is_none());
    }

    #[test]
    fn loads_png_with_label_and_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pet_scan.PNG");
        std::fs::write(&path, b"hello world").unwrap();

        let image = load_image(Some(&path)).unwrap().unwrap();
        assert_eq!(image.data, "aGVsbG8gd29ybGQ=");
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.label, "pet_scan.PNG");
    }

    #[test]
    fn jpeg_extensions_share_mime() {
        assert_eq!(mime_for_extension("jpg"), Some("image/jpeg"));
        assert_eq!(mime_for_extension("JPEG"), Some("image/jpeg"));
        assert_eq!(mime_for_extension("tiff"), None);
    }

    #[test]
    fn unsupported_extension_is_rejected_before_reading() {
        let err = load_image(Some(Path::new("/nonexistent/report.pdf"))).unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedType(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_image(Some(&dir.path().join("absent.jpg"))).unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }));
    }

    #[test]
    fn data_url_roundtrips_payload() {
        let image = image_from_data_url("data:image/webp;base64,AAEC", "cyto.webp").unwrap();
        assert_eq!(image.mime_type, "image/webp");
        assert_eq!(image.data, "AAEC");
        assert_eq!(image.label, "cyto.webp");
    }

    #[test]
    fn malformed_data_urls_are_rejected() {
        for url in [
            "image/png;base64,AAEC",
            "data:image/png;base64",
            "data:image/png,AAEC",
            "data:image/png;base64,@@@",
        ] {
            assert!(
                matches!(image_from_data_url(url, "x"), Err(IngestError::InvalidDataUrl(_))),
                "url: {url}"
            );
        }
        assert!(matches!(
            image_from_data_url("data:text/plain;base64,AAEC", "x"),
            Err(IngestError::UnsupportedType(_))
        ));
    }
}
