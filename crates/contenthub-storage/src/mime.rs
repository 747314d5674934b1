//! MIME type detection for uploads.

/// Fallback for payloads nothing else recognizes.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Guess a MIME type from a file name's extension.
pub fn mime_from_name(name: &str) -> Option<&'static str> {
    let (_, ext) = name.rsplit_once('.')?;
    let mime = match ext.to_lowercase().as_str() {
        "txt" => "text/plain",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "csv" => "text/csv",
        "md" => "text/markdown",
        "js" => "application/javascript",
        "json" => "application/json",
        "xml" => "application/xml",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" | "gzip" => "application/gzip",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        _ => return None,
    };
    Some(mime)
}

/// Detect a raster image format from its leading bytes.
pub fn sniff_image(data: &[u8]) -> Option<&'static str> {
    let format = image::guess_format(data).ok()?;
    let mime = match format {
        image::ImageFormat::Png => "image/png",
        image::ImageFormat::Jpeg => "image/jpeg",
        image::ImageFormat::Gif => "image/gif",
        image::ImageFormat::WebP => "image/webp",
        image::ImageFormat::Bmp => "image/bmp",
        image::ImageFormat::Ico => "image/x-icon",
        image::ImageFormat::Tiff => "image/tiff",
        _ => return None,
    };
    Some(mime)
}

/// Resolve the MIME type of an upload.
///
/// Content sniffing wins for raster images, then the client-declared type,
/// then the extension.
pub fn detect(file_name: &str, declared: Option<&str>, data: &[u8]) -> String {
    if let Some(mime) = sniff_image(data) {
        return mime.to_string();
    }
    declared
        .map(str::trim)
        .filter(|m| !m.is_empty() && *m != OCTET_STREAM)
        .or_else(|| mime_from_name(file_name))
        .unwrap_or(OCTET_STREAM)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];

    #[test]
    fn test_mime_from_name() {
        assert_eq!(mime_from_name("file.pdf"), Some("application/pdf"));
        assert_eq!(mime_from_name("img.PNG"), Some("image/png"));
        assert_eq!(mime_from_name("noext"), None);
    }

    #[test]
    fn test_detect_prefers_sniffed_image() {
        assert_eq!(detect("upload.bin", Some("text/plain"), PNG_MAGIC), "image/png");
    }

    #[test]
    fn test_detect_falls_back() {
        assert_eq!(detect("notes.txt", None, b"hello"), "text/plain");
        assert_eq!(
            detect("report", Some("application/pdf"), b"%PDF"),
            "application/pdf"
        );
        assert_eq!(detect("blob", Some(OCTET_STREAM), b"??"), OCTET_STREAM);
    }
}
