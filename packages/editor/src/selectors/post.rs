//! Title, visibility, publish status and format derivation

use super::document::{get_block_count, get_edited_post_attribute, is_clean_new_post, is_edited_post_dirty};
use crate::config::Labels;
use crate::state::{parse_post_date, EditorState, Post, PostStatus};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostVisibility {
    Public,
    Private,
    Password,
}

impl fmt::Display for PostVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PostVisibility::Public => "public",
            PostVisibility::Private => "private",
            PostVisibility::Password => "password",
        };
        f.write_str(name)
    }
}

fn edited_string(state: &EditorState, name: &str) -> String {
    match get_edited_post_attribute(state, name) {
        Some(Value::String(value)) => value,
        _ => String::new(),
    }
}

pub fn get_edited_post_title(state: &EditorState) -> String {
    edited_string(state, "title")
}

pub fn get_edited_post_excerpt(state: &EditorState) -> String {
    edited_string(state, "excerpt")
}

/// Title shown in the document chrome, with placeholders for blank titles
pub fn get_document_title(state: &EditorState, labels: &Labels) -> String {
    let title = get_edited_post_title(state);
    if !title.trim().is_empty() {
        return title;
    }

    if is_clean_new_post(state) {
        labels.new_post.clone()
    } else {
        labels.untitled.clone()
    }
}

/// Whether there is anything worth saving
pub fn is_edited_post_saveable(state: &EditorState) -> bool {
    !get_edited_post_title(state).is_empty()
        || !get_edited_post_excerpt(state).is_empty()
        || get_block_count(state) > 0
}

pub fn get_edited_post_visibility(state: &EditorState) -> PostVisibility {
    let status = get_edited_post_attribute(state, "status").and_then(|value| PostStatus::from_value(&value));
    if status == Some(PostStatus::Private) {
        return PostVisibility::Private;
    }

    match get_edited_post_attribute(state, "password") {
        Some(Value::String(password)) if !password.is_empty() => PostVisibility::Password,
        _ => PostVisibility::Public,
    }
}

/// Whether a saved post is publicly visible at `now`
pub fn is_post_published(post: &Post, now: NaiveDateTime) -> bool {
    match post.status {
        PostStatus::Publish | PostStatus::Private => true,
        PostStatus::Future => post.parsed_date().map(|date| date <= now).unwrap_or(false),
        _ => false,
    }
}

pub fn is_current_post_published(state: &EditorState, now: NaiveDateTime) -> bool {
    is_post_published(&state.current_post, now)
}

/// Whether a publish action would change anything
pub fn is_edited_post_publishable(state: &EditorState) -> bool {
    is_edited_post_dirty(state)
        || !matches!(
            state.current_post.status,
            PostStatus::Publish | PostStatus::Private | PostStatus::Future
        )
}

/// The edited date lies strictly after `now`
pub fn is_edited_post_being_scheduled(state: &EditorState, now: NaiveDateTime) -> bool {
    match get_edited_post_attribute(state, "date") {
        Some(Value::String(date)) => parse_post_date(&date).map(|date| date > now).unwrap_or(false),
        _ => false,
    }
}

/// Post link with `preview=true` added to its query
pub fn get_edited_post_preview_link(state: &EditorState) -> Option<String> {
    let link = state.current_post.link.as_deref()?;

    match Url::parse(link) {
        Ok(mut url) => {
            url.query_pairs_mut().append_pair("preview", "true");
            Some(url.to_string())
        }
        // Relative links are not valid URLs on their own
        Err(_) => {
            let separator = if link.contains('?') { '&' } else { '?' };
            Some(format!("{link}{separator}preview=true"))
        }
    }
}

/// Post format implied by the blocks, if any.
///
/// A lone block decides the format. With two blocks the first one decides,
/// provided the second is a paragraph (e.g. an image with a caption).
pub fn get_suggested_post_format(state: &EditorState) -> Option<&'static str> {
    let doc = state.present();
    let names: Vec<&str> = doc
        .block_order()
        .iter()
        .filter_map(|uid| doc.block(uid))
        .map(|block| block.name.as_str())
        .collect();

    let name = match names.as_slice() {
        [only] => *only,
        [first, second] if *second == scribe_blocks::PARAGRAPH_BLOCK_NAME => *first,
        _ => return None,
    };

    match name {
        "core/image" => Some("image"),
        "core/quote" => Some("quote"),
        "core-embed/youtube" | "core-embed/vimeo" => Some("video"),
        _ => None,
    }
}
