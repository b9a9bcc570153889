use regex::Regex;
use url::Url;

use crate::domain::config::FALLBACK_FILENAME;

/// Pick a name for a downloaded payload: the `Content-Disposition` filename if there
/// is one, else the last path segment of the request URL, else the fallback name.
pub fn resolve_filename(disposition: Option<&str>, request_url: &str) -> String {
    disposition
        .and_then(filename_from_disposition)
        .or_else(|| filename_from_url(request_url))
        .unwrap_or_else(|| FALLBACK_FILENAME.to_string())
}

/// Extracts the `filename=` parameter, percent-decoded and unquoted.
///
/// `filename*=` (RFC 5987) is not matched here.
pub fn filename_from_disposition(disposition: &str) -> Option<String> {
    let re = Regex::new(r#"(?i)(?:^|[;\s])filename=("[^"]*"|'[^']*'|[^;]*)"#).ok()?;
    let raw = re.captures(disposition)?.get(1)?.as_str().trim();

    let decoded = urlencoding::decode_binary(raw.as_bytes());
    let decoded = String::from_utf8_lossy(&decoded);
    let name = decoded.trim_matches(|c| c == '"' || c == '\'').trim();

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Last non-empty path segment, ignoring query and fragment.
pub fn filename_from_url(request_url: &str) -> Option<String> {
    match Url::parse(request_url) {
        Ok(url) => url
            .path_segments()?
            .filter(|segment| !segment.is_empty())
            .last()
            .map(str::to_string),
        // Relative or otherwise unparsable input, split it by hand
        Err(_) => request_url
            .split(['?', '#'])
            .next()?
            .split('/')
            .filter(|segment| !segment.is_empty())
            .last()
            .map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disposition_quoted() {
        assert_eq!(
            filename_from_disposition(r#"attachment; filename="industry.csv""#).as_deref(),
            Some("industry.csv")
        );
        assert_eq!(
            filename_from_disposition("attachment; filename='single.csv'").as_deref(),
            Some("single.csv")
        );
    }

    #[test]
    fn test_disposition_unquoted_with_trailing_params() {
        assert_eq!(
            filename_from_disposition("attachment; filename=data.json; size=42").as_deref(),
            Some("data.json")
        );
        assert_eq!(
            filename_from_disposition(r#"attachment; filename="a;b.txt"; x=1"#).as_deref(),
            Some("a;b.txt")
        );
        assert_eq!(
            filename_from_disposition("attachment; filename='a;b.csv'; x=1").as_deref(),
            Some("a;b.csv")
        );
    }

    #[test]
    fn test_disposition_percent_decoded() {
        assert_eq!(
            filename_from_disposition("attachment; filename=%E6%8A%A5%E8%A1%A8.xlsx").as_deref(),
            Some("报表.xlsx")
        );
        assert_eq!(
            filename_from_disposition("attachment; filename=my%20report+final.pdf").as_deref(),
            Some("my report+final.pdf")
        );
        // Quotes that were themselves encoded are still stripped
        assert_eq!(
            filename_from_disposition("attachment; filename=%22quoted.txt%22").as_deref(),
            Some("quoted.txt")
        );
    }

    #[test]
    fn test_disposition_without_filename() {
        assert_eq!(filename_from_disposition("inline"), None);
        assert_eq!(filename_from_disposition("attachment; filename=\"\""), None);
        assert_eq!(
            filename_from_disposition("attachment; filename*=UTF-8''x.csv"),
            None
        );
    }

    #[test]
    fn test_disposition_case_insensitive() {
        assert_eq!(
            filename_from_disposition("Attachment; FileName=Upper.TXT").as_deref(),
            Some("Upper.TXT")
        );
    }

    #[test]
    fn test_filename_from_url() {
        assert_eq!(
            filename_from_url("https://cdn.test/uploads/2020/06/industry.csv").as_deref(),
            Some("industry.csv")
        );
        assert_eq!(
            filename_from_url("https://cdn.test/files/report.pdf?token=abc#page=2").as_deref(),
            Some("report.pdf")
        );
        assert_eq!(
            filename_from_url("https://cdn.test/files/dir/").as_deref(),
            Some("dir")
        );
        assert_eq!(filename_from_url("https://cdn.test"), None);
        assert_eq!(filename_from_url("https://cdn.test/"), None);
        assert_eq!(
            filename_from_url("downloads/local.bin?x=1").as_deref(),
            Some("local.bin")
        );
        assert_eq!(filename_from_url(""), None);
    }

    #[test]
    fn test_resolve_prefers_disposition_over_url() {
        assert_eq!(
            resolve_filename(
                Some(r#"attachment; filename="server-name.csv""#),
                "https://cdn.test/path/url-name.csv"
            ),
            "server-name.csv"
        );
    }

    #[test]
    fn test_resolve_falls_back_to_url_then_default() {
        assert_eq!(
            resolve_filename(None, "https://cdn.test/path/url-name.csv"),
            "url-name.csv"
        );
        assert_eq!(
            resolve_filename(Some("inline"), "https://cdn.test/path/url-name.csv"),
            "url-name.csv"
        );
        assert_eq!(resolve_filename(None, "https://cdn.test/"), FALLBACK_FILENAME);
    }
}
