//! Pipeline name extraction from the `pipelines.xml` index document.

use regex::Regex;

const NAME_PREFIX: &str = "/pipelines/";
const NAME_SUFFIX: &str = "/stages.xml";

/// Extracts pipeline names from the pipeline index document, in document order.
///
/// Each pipeline element in the index carries an `href` attribute of the form
/// `.../pipelines/{name}/stages.xml`; the name is the substring between those
/// two markers. A `prefix` of `None` or `Some("")` returns every name.
pub fn pipeline_names(document: &str, prefix: Option<&str>) -> Vec<String> {
    let href_pattern =
        Regex::new(r#"<pipeline\b[^>]*\bhref\s*=\s*"([^"]+)""#).expect("valid href pattern");

    href_pattern
        .captures_iter(document)
        .filter_map(|captures| name_from_href(captures.get(1).map_or("", |m| m.as_str())))
        .filter(|name| match prefix {
            Some(p) if !p.is_empty() => name.starts_with(p),
            _ => true,
        })
        .map(str::to_string)
        .collect()
}

fn name_from_href(href: &str) -> Option<&str> {
    let start = href.find(NAME_PREFIX)? + NAME_PREFIX.len();
    let end = start + href[start..].find(NAME_SUFFIX)?;
    Some(&href[start..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<pipelines xmlns:atom="http://www.w3.org/2005/Atom">
  <pipeline href="http://go.example.com/go/api/pipelines/build-linux/stages.xml" />
  <pipeline href="http://go.example.com/go/api/pipelines/build-windows/stages.xml" />
  <pipeline href="http://go.example.com/go/api/pipelines/deploy/stages.xml" />
</pipelines>"#;

    #[test]
    fn test_all_names_in_document_order() {
        let names = pipeline_names(INDEX, None);
        assert_eq!(names, vec!["build-linux", "build-windows", "deploy"]);
    }

    #[test]
    fn test_empty_prefix_matches_everything() {
        assert_eq!(pipeline_names(INDEX, Some("")).len(), 3);
    }

    #[test]
    fn test_prefix_filter() {
        let names = pipeline_names(INDEX, Some("build-"));
        assert_eq!(names, vec!["build-linux", "build-windows"]);
    }

    #[test]
    fn test_prefix_without_match() {
        assert!(pipeline_names(INDEX, Some("release")).is_empty());
    }

    #[test]
    fn test_href_without_stage_suffix_is_skipped() {
        let document = r#"<pipeline href="http://go.example.com/go/api/pipelines/broken" />"#;
        assert!(pipeline_names(document, None).is_empty());
    }

    #[test]
    fn test_name_from_href() {
        assert_eq!(
            name_from_href("http://go/go/api/pipelines/deploy/stages.xml"),
            Some("deploy")
        );
        assert_eq!(name_from_href("http://go/go/api/other.xml"), None);
    }
}
