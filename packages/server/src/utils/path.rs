/// Split a trailing `.{ext}` off a path segment.
///
/// Returns the stem and whether the extension was present.
pub fn split_extension<'a>(segment: &'a str, ext: &str) -> (&'a str, bool) {
    match segment.rsplit_once('.') {
        Some((stem, found)) if !stem.is_empty() && found.eq_ignore_ascii_case(ext) => {
            (stem, true)
        }
        _ => (segment, false),
    }
}
