//! Legacy File Paths
//!
//! The backend stores document locations as Windows share paths
//! (`V:\FILE\CHASSIS\...`, `Y:\...`). These helpers map them onto the
//! relative URLs the asset server exposes.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

const CHASSIS_ROOT: &str = "chassis/";

/// Share prefixes and their optional trailing separator, tried in order;
/// only the first present one is removed
const SHARE_PREFIXES: [(&str, Option<char>); 3] = [
    ("V:\\FILE\\CHASSIS", Some('\\')),
    ("V:/FILE/CHASSIS", Some('/')),
    ("V:\\FILE\\", None),
];

/// Characters a browser's `encodeURI` escapes
const URI: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Remove the first case-insensitive occurrence of `prefix` (plus one
/// trailing separator). Returns `None` when it does not occur.
fn strip_share(path: &str, prefix: &str, trailing: Option<char>) -> Option<String> {
    let start = path.to_ascii_uppercase().find(prefix)?;
    let mut end = start + prefix.len();
    if let Some(sep) = trailing {
        if path[end..].starts_with(sep) {
            end += sep.len_utf8();
        }
    }
    Some(format!("{}{}", &path[..start], &path[end..]))
}

/// Map a stored file path onto a `chassis/...` relative URL.
///
/// URLs and paths already under `chassis/` pass through. Returns `None` for
/// a blank input.
pub fn normalize_file_path(path: &str) -> Option<String> {
    if path.trim().is_empty() {
        return None;
    }
    if path.starts_with("http") || path.starts_with(CHASSIS_ROOT) {
        return Some(path.to_string());
    }

    let stripped = SHARE_PREFIXES
        .iter()
        .find_map(|(prefix, trailing)| strip_share(path, prefix, *trailing))
        .unwrap_or_else(|| path.to_string());

    let slashed = stripped.replace('\\', "/");
    let relative = slashed.trim_start_matches('/');
    if relative.starts_with(CHASSIS_ROOT) {
        Some(relative.to_string())
    } else {
        Some(format!("{}{}", CHASSIS_ROOT, relative))
    }
}

pub fn is_pdf(path: &str) -> bool {
    path.to_lowercase().ends_with(".pdf")
}

/// Plan drawing location (`picloc`) to its URI-encoded `plan/...` URL
pub fn plan_document_path(picloc: &str) -> Option<String> {
    let picloc = picloc.trim();
    if picloc.is_empty() {
        return None;
    }
    let path = picloc.replacen("Y:\\", "plan/", 1).replace('\\', "/");
    Some(utf8_percent_encode(&path, URI).to_string())
}

/// Location of a generated sales-order/quotation report
pub fn pdf_report_path(pdf_path: &str) -> String {
    format!("rpt/pdf/{}", pdf_path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_share_prefixes() {
        assert_eq!(
            normalize_file_path(r"V:\FILE\CHASSIS\HS1234\front.jpg").as_deref(),
            Some("chassis/HS1234/front.jpg")
        );
        assert_eq!(
            normalize_file_path(r"v:\file\chassis\HS1234\front.jpg").as_deref(),
            Some("chassis/HS1234/front.jpg")
        );
        assert_eq!(
            normalize_file_path("V:/FILE/CHASSIS/HS1234/doc.pdf").as_deref(),
            Some("chassis/HS1234/doc.pdf")
        );
        assert_eq!(
            normalize_file_path(r"V:\FILE\other\scan.png").as_deref(),
            Some("chassis/other/scan.png")
        );
    }

    #[test]
    fn test_normalize_passthrough() {
        assert_eq!(
            normalize_file_path("https://cdn.example.com/a.jpg").as_deref(),
            Some("https://cdn.example.com/a.jpg")
        );
        assert_eq!(normalize_file_path("chassis/a.jpg").as_deref(), Some("chassis/a.jpg"));
        assert_eq!(normalize_file_path(r"\\HS1234\a.jpg").as_deref(), Some("chassis/HS1234/a.jpg"));
        assert_eq!(normalize_file_path("   "), None);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            r"V:\FILE\CHASSIS\HS1234\front.jpg",
            "V:/FILE/CHASSIS/x.pdf",
            r"V:\FILE\y.pdf",
            "/leading/slash.png",
            "plain.jpg",
            "chassis/already.jpg",
            "http://host/file.pdf",
        ];
        for input in inputs {
            let once = normalize_file_path(input).unwrap();
            let twice = normalize_file_path(&once).unwrap();
            assert_eq!(once, twice, "input {input}");
        }
    }

    #[test]
    fn test_is_pdf() {
        assert!(is_pdf("chassis/HS1234/Invoice.PDF"));
        assert!(is_pdf("x.pdf"));
        assert!(!is_pdf("x.pdf.jpg"));
    }

    #[test]
    fn test_plan_document_path() {
        assert_eq!(
            plan_document_path(r"Y:\ISUZU\NPR 3800\layout.pdf").as_deref(),
            Some("plan/ISUZU/NPR%203800/layout.pdf")
        );
        assert_eq!(plan_document_path(""), None);
    }

    #[test]
    fn test_pdf_report_path() {
        assert_eq!(pdf_report_path("SO-0001.pdf"), "rpt/pdf/SO-0001.pdf");
    }
}
