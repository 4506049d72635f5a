//! HTML page carrying the `go-import` and `go-source` meta tags.

use crate::resolver::ImportMetadata;

const DOC_SITE: &str = "https://pkg.go.dev";

/// Content of the `go-import` meta tag: `<import-root> <vcs> <vcs-root>`.
pub fn go_import_content(meta: &ImportMetadata) -> String {
    format!("{} {} {}", meta.import_root, meta.vcs, meta.vcs_root)
}

/// Content of the `go-source` meta tag, pointing source links at `branch`.
///
/// The links assume a forge-style `tree`/`blob` URL layout (GitHub, Gitea,
/// GitLab) whatever the `vcs` is.
pub fn go_source_content(meta: &ImportMetadata) -> String {
    let home = meta
        .vcs_root
        .strip_suffix(".git")
        .unwrap_or(&meta.vcs_root);
    format!(
        "{root} {home} {home}/tree/{branch}{{/dir}} {home}/blob/{branch}{{/dir}}/{{file}}#L{{line}}",
        root = meta.import_root,
        home = home,
        branch = meta.branch,
    )
}

/// Render the page served for a resolved import path.
pub fn render_page(meta: &ImportMetadata) -> String {
    let import = escape_html(&go_import_content(meta));
    let source = escape_html(&go_source_content(meta));
    let docs = escape_html(&format!("{}/{}", DOC_SITE, meta.import_root));
    let root = escape_html(&meta.import_root);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="go-import" content="{import}">
<meta name="go-source" content="{source}">
<meta http-equiv="refresh" content="0; url={docs}">
<title>{root}</title>
</head>
<body>
Redirecting to <a href="{docs}">{root}</a>...
</body>
</html>
"#
    )
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
