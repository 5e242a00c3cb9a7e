//! File-name rules for produced images and archive entries.
//!
//! Output files are named `<base>_<W>x<H>.<ext>`:
//! - `<base>` is the original file name up to its first `.`
//!   (`pog.final.png` → `pog`)
//! - `<ext>` is the MIME subtype of the produced file
//!   (`image/jpeg` → `jpeg`, `image/gif` → `gif`)
//!
//! Archive entries are named `<base>.<ext>` where `<base>` runs up to the
//! first `.` and `<ext>` starts after the last one.

/// Original file name up to the first dot. A dot-less name is returned whole.
pub fn base_name(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

/// Extension for a MIME type: its subtype, or the whole string if there is no `/`.
pub fn extension_for_mime(mime: &str) -> &str {
    mime.split_once('/').map(|(_, sub)| sub).unwrap_or(mime)
}

/// Name of a resized square output.
pub fn output_file_name(source_name: &str, size: u32, mime: &str) -> String {
    format!(
        "{}_{}x{}.{}",
        base_name(source_name),
        size,
        size,
        extension_for_mime(mime)
    )
}

/// Name of a produced file inside the bulk archive.
pub fn archive_entry_name(file_name: &str) -> String {
    let ext = file_name.rsplit('.').next().unwrap_or(file_name);
    format!("{}.{}", base_name(file_name), ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_name_stops_at_first_dot() {
        assert_eq!(base_name("pog.png"), "pog");
        assert_eq!(base_name("pog.final.v2.png"), "pog");
        assert_eq!(base_name("README"), "README");
        assert_eq!(base_name(".hidden"), "");
    }

    #[test]
    fn extension_is_mime_subtype() {
        assert_eq!(extension_for_mime("image/png"), "png");
        assert_eq!(extension_for_mime("image/jpeg"), "jpeg");
        assert_eq!(extension_for_mime("image/gif"), "gif");
        assert_eq!(extension_for_mime("png"), "png");
    }

    #[test]
    fn output_name_static() {
        assert_eq!(output_file_name("pog.png", 28, "image/png"), "pog_28x28.png");
        assert_eq!(
            output_file_name("photo.jpg", 112, "image/jpeg"),
            "photo_112x112.jpeg"
        );
    }

    #[test]
    fn output_name_animated() {
        assert_eq!(
            output_file_name("dance.party.gif", 56, "image/gif"),
            "dance_56x56.gif"
        );
    }

    #[test]
    fn archive_name_keeps_last_extension() {
        assert_eq!(archive_entry_name("pog_28x28.png"), "pog_28x28.png");
        assert_eq!(archive_entry_name("a.b.gif"), "a.gif");
    }
}
