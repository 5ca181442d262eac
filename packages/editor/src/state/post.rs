//! Server-known post record

use chrono::{DateTime, Local, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PostStatus {
    Publish,
    Future,
    #[default]
    Draft,
    Pending,
    Private,
    AutoDraft,
    #[serde(other)]
    Other,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Publish => "publish",
            PostStatus::Future => "future",
            PostStatus::Draft => "draft",
            PostStatus::Pending => "pending",
            PostStatus::Private => "private",
            PostStatus::AutoDraft => "auto-draft",
            PostStatus::Other => "other",
        }
    }

    /// Read a status out of an edit or attribute value
    pub fn from_value(value: &Value) -> Option<Self> {
        value
            .as_str()
            .map(|status| serde_json::from_value(Value::String(status.to_string())).unwrap_or(PostStatus::Other))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Revisions {
    #[serde(default)]
    pub last_id: Option<u64>,

    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    pub id: Option<u64>,

    pub status: PostStatus,

    pub title: String,

    pub excerpt: String,

    pub password: Option<String>,

    /// Publication date as sent by the server, e.g. `2016-05-30T17:21:39`
    pub date: Option<String>,

    pub link: Option<String>,

    #[serde(rename = "type")]
    pub post_type: Option<String>,

    pub meta: IndexMap<String, Value>,

    pub revisions: Option<Revisions>,
}

impl Post {
    pub fn new(id: u64, status: PostStatus) -> Self {
        Self {
            id: Some(id),
            status,
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// A saved field by its wire name. Unset optional fields read as `None`.
    pub fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "id" => self.id.map(Value::from),
            "status" => Some(Value::from(self.status.as_str())),
            "title" => Some(Value::from(self.title.as_str())),
            "excerpt" => Some(Value::from(self.excerpt.as_str())),
            "password" => self.password.as_deref().map(Value::from),
            "date" => self.date.as_deref().map(Value::from),
            "link" => self.link.as_deref().map(Value::from),
            "type" => self.post_type.as_deref().map(Value::from),
            "meta" => serde_json::to_value(&self.meta).ok(),
            _ => None,
        }
    }

    /// Scheduled date, see [`parse_post_date`]
    pub fn parsed_date(&self) -> Option<NaiveDateTime> {
        self.date.as_deref().and_then(parse_post_date)
    }
}

/// Parse a post date into local wall-clock time.
///
/// Accepts the server's floating format (`2016-05-30T17:21:39`, read as local
/// time) and RFC 3339 timestamps with an offset.
pub fn parse_post_date(date: &str) -> Option<NaiveDateTime> {
    const FLOATING_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

    for format in FLOATING_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(date, format) {
            return Some(parsed);
        }
    }

    DateTime::parse_from_rfc3339(date)
        .ok()
        .map(|parsed| parsed.with_timezone(&Local).naive_local())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(PostStatus::from_value(&json!("auto-draft")), Some(PostStatus::AutoDraft));
        assert_eq!(PostStatus::from_value(&json!("inherit")), Some(PostStatus::Other));
        assert_eq!(PostStatus::from_value(&Value::Null), None);
    }

    #[test]
    fn test_post_from_partial_json() {
        let post: Post = serde_json::from_value(json!({
            "id": 1,
            "status": "future",
            "date": "2016-05-30T17:21:39",
            "revisions": { "last_id": 123, "count": 5 }
        }))
        .unwrap();

        assert_eq!(post.status, PostStatus::Future);
        assert_eq!(post.title, "");
        assert_eq!(post.revisions.unwrap().last_id, Some(123));
    }

    #[test]
    fn test_attribute_lookup() {
        let post = Post::new(7, PostStatus::Draft).with_title("Hi");

        assert_eq!(post.attribute("title"), Some(json!("Hi")));
        assert_eq!(post.attribute("status"), Some(json!("draft")));
        assert_eq!(post.attribute("password"), None);
        assert_eq!(post.attribute("nope"), None);
    }

    #[test]
    fn test_parse_post_date() {
        let expected = NaiveDate::from_ymd_opt(2016, 5, 30)
            .unwrap()
            .and_hms_opt(17, 21, 39)
            .unwrap();

        assert_eq!(parse_post_date("2016-05-30T17:21:39"), Some(expected));
        assert!(parse_post_date("2016-05-30T17:21:39+00:00").is_some());
        assert_eq!(parse_post_date("not a date"), None);
    }
}
