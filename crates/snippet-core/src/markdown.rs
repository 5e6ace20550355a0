use crate::github_api::{REPOSITORY_API_PREFIX, SearchItem, SearchResults};

/// Renders one result set as a markdown digest: a `Total count` header,
/// a blank line, then one bullet per item, newest first. Items sharing
/// a creation time keep their server order (the sort is stable). The
/// final line carries no trailing newline.
pub fn render_snippet(results: &SearchResults) -> String {
    let mut items: Vec<&SearchItem> = results.items.iter().collect();
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let lines: Vec<String> = items.into_iter().map(render_line).collect();

    let mut output = format!("Total count: {}\n\n", results.total_count);
    output.push_str(&lines.join("\n"));
    output
}

fn render_line(item: &SearchItem) -> String {
    // Decoding guarantees the API prefix; the fallback keeps rendering
    // total regardless.
    let repository = item
        .repository_url
        .strip_prefix(REPOSITORY_API_PREFIX)
        .unwrap_or(item.repository_url.as_str());

    format!(
        "* [{repository}] [#{}]({}) {}",
        item.number, item.url, item.title
    )
}
