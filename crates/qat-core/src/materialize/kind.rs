//! Pick how an asset is handled from its name alone.

/// Suffix that marks a generic zip archive.
pub const ZIP_EXTENSION: &str = ".zip";

/// How a downloaded asset is placed into the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// Host package format; handed to the package importer.
    PackageArchive,
    /// Zip archive; extracted into a directory named after the asset.
    ZipArchive,
    /// Anything else; written as-is.
    PlainFile,
}

/// Classify `name` by suffix (ASCII case-insensitive). Package extensions
/// are checked before `.zip`.
pub fn classify(name: &str, package_extensions: &[String]) -> AssetKind {
    if package_extensions
        .iter()
        .any(|ext| has_suffix_ignore_case(name, ext))
    {
        AssetKind::PackageArchive
    } else if has_suffix_ignore_case(name, ZIP_EXTENSION) {
        AssetKind::ZipArchive
    } else {
        AssetKind::PlainFile
    }
}

/// `name` without a trailing `ext` (ASCII case-insensitive); None if it does not end with it.
pub fn strip_suffix_ignore_case<'a>(name: &'a str, ext: &str) -> Option<&'a str> {
    if has_suffix_ignore_case(name, ext) {
        // The suffix is ASCII, so the split point is a char boundary.
        Some(&name[..name.len() - ext.len()])
    } else {
        None
    }
}

/// Normalize configured extensions to a leading dot (`unitypackage` -> `.unitypackage`).
pub fn normalize_extensions<I, S>(exts: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    exts.into_iter()
        .map(|e| e.as_ref().trim().to_string())
        .filter(|e| !e.is_empty() && e != ".")
        .map(|e| if e.starts_with('.') { e } else { format!(".{}", e) })
        .collect()
}

fn has_suffix_ignore_case(name: &str, ext: &str) -> bool {
    let (name, ext) = (name.as_bytes(), ext.as_bytes());
    ext.is_ascii()
        && name.len() >= ext.len()
        && name[name.len() - ext.len()..].eq_ignore_ascii_case(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pkgs() -> Vec<String> {
        vec![".unitypackage".to_string()]
    }

    #[test]
    fn classify_by_suffix() {
        assert_eq!(classify("tools.unitypackage", &pkgs()), AssetKind::PackageArchive);
        assert_eq!(classify("foo.zip", &pkgs()), AssetKind::ZipArchive);
        assert_eq!(classify("texture.png", &pkgs()), AssetKind::PlainFile);
        assert_eq!(classify("zip", &pkgs()), AssetKind::PlainFile);
        assert_eq!(classify("archive.zip.png", &pkgs()), AssetKind::PlainFile);
    }

    #[test]
    fn classify_ignores_ascii_case() {
        assert_eq!(classify("FOO.ZIP", &pkgs()), AssetKind::ZipArchive);
        assert_eq!(classify("Pack.UnityPackage", &pkgs()), AssetKind::PackageArchive);
    }

    #[test]
    fn classify_multibyte_names() {
        assert_eq!(classify("日本.zip", &pkgs()), AssetKind::ZipArchive);
        assert_eq!(classify("é", &pkgs()), AssetKind::PlainFile);
    }

    #[test]
    fn package_wins_over_zip() {
        let exts = vec![".pkg.zip".to_string()];
        assert_eq!(classify("a.pkg.zip", &exts), AssetKind::PackageArchive);
        assert_eq!(classify("a.zip", &exts), AssetKind::ZipArchive);
    }

    #[test]
    fn no_package_extensions() {
        assert_eq!(classify("a.unitypackage", &[]), AssetKind::PlainFile);
    }

    #[test]
    fn strip_suffix() {
        assert_eq!(strip_suffix_ignore_case("foo.zip", ".zip"), Some("foo"));
        assert_eq!(strip_suffix_ignore_case("foo.tar.ZIP", ".zip"), Some("foo.tar"));
        assert_eq!(strip_suffix_ignore_case(".zip", ".zip"), Some(""));
        assert_eq!(strip_suffix_ignore_case("foo.png", ".zip"), None);
    }

    #[test]
    fn normalize() {
        assert_eq!(
            normalize_extensions(["unitypackage", ".pkg", " ", "."]),
            vec![".unitypackage".to_string(), ".pkg".to_string()]
        );
    }
}
