pub const IMAGE_FILE_STEM_MAX_LEN: usize = 50;
pub const FALLBACK_IMAGE_FILE_STEM: &str = "image";

/// Derive the file stem for a style guide from an artist or movement name.
///
/// The transform is a fixed substitution chain, not a general slug
/// algorithm: lowercase, then spaces become underscores, periods are
/// removed, hyphens become underscores. The order matters because it
/// determines how adjacent punctuation collapses; existing guide files
/// were named with exactly this chain, so it must be reproduced as-is
/// ("J. M. W. Turner" -> "j_m_w_turner").
pub fn guide_file_stem(name: &str) -> String {
    name.to_lowercase()
        .replace(' ', "_")
        .replace('.', "")
        .replace('-', "_")
}

/// Derive a filesystem-safe stem for a generated image from the user's
/// subject prompt.
///
/// Lowercases, collapses every run of non-alphanumeric characters into a
/// single underscore, strips leading and trailing underscores, and
/// truncates to [`IMAGE_FILE_STEM_MAX_LEN`] without leaving a dangling
/// underscore at the cut. A prompt with no alphanumeric characters falls
/// back to [`FALLBACK_IMAGE_FILE_STEM`].
pub fn image_file_stem(prompt: &str) -> String {
    let mut stem = String::new();
    let mut last_was_separator = false;

    for ch in prompt.trim().to_lowercase().chars() {
        if ch.is_ascii_alphanumeric() {
            stem.push(ch);
            last_was_separator = false;
        } else if !last_was_separator {
            stem.push('_');
            last_was_separator = true;
        }
    }

    let mut stem = stem.trim_matches('_').to_string();
    if stem.len() > IMAGE_FILE_STEM_MAX_LEN {
        stem.truncate(IMAGE_FILE_STEM_MAX_LEN);
        stem = stem.trim_end_matches('_').to_string();
    }

    if stem.is_empty() {
        FALLBACK_IMAGE_FILE_STEM.to_string()
    } else {
        stem
    }
}
