//! Parsing of fully qualified class names.
//!
//! A class name like `Vendor\Package\Thing` is split into a namespace part
//! (`Vendor\Package`) and a final segment (`Thing`). Leading separators are
//! stripped before splitting, so `\Vendor\Package\Thing` parses the same
//! way. The hierarchical separator is a parameter rather than a constant;
//! see [`crate::Conventions`].

/// Strip leading namespace separators from a class name.
///
/// `\Vendor\Thing` and `Vendor\Thing` refer to the same class; matching is
/// always done against the rootless form.
pub fn strip_root(class: &str, separator: char) -> &str {
    class.trim_start_matches(separator)
}

/// Split a class name into `(namespace, final_segment)`.
///
/// The split happens at the last separator after the root has been
/// stripped. A class with no separator has an empty namespace. A class
/// ending in a separator has an empty final segment; callers treat that as
/// a guaranteed non-match rather than an error. Consecutive separators are
/// not collapsed, so `A\\B` keeps the empty segment inside its namespace
/// part.
pub fn split(class: &str, separator: char) -> (&str, &str) {
    let class = strip_root(class, separator);
    match class.rfind(separator) {
        Some(pos) => (&class[..pos], &class[pos + separator.len_utf8()..]),
        None => ("", class),
    }
}
