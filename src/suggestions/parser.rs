// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Parsing of generated search-query lists

use crate::constants::endpoints::{YOUTUBE_QUERY_PARAM, YOUTUBE_SEARCH_URL};
use url::form_urlencoded;

/// Extract search queries from a markdown bullet list.
///
/// Only lines starting with `-` (after trimming) are kept; the leading dashes
/// and surrounding whitespace are removed and empty results dropped. Anything
/// else in the reply is ignored, so malformed output yields fewer queries
/// rather than an error.
pub fn parse_search_queries(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| line.starts_with('-'))
        .map(|line| line.trim_start_matches('-').trim())
        .filter(|query| !query.is_empty())
        .map(str::to_string)
        .collect()
}

/// YouTube results page for a query, form-encoded (spaces become `+`)
pub fn youtube_search_url(query: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
    format!("{YOUTUBE_SEARCH_URL}?{YOUTUBE_QUERY_PARAM}={encoded}")
}
