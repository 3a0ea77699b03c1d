//! Values substituted into a header template.

use chrono::{Datelike, Local, NaiveDateTime};

use crate::config::Identity;

/// Everything a template can reference, computed once per render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionContext {
    pub file_name: String,
    pub file_name_without_ext: String,
    pub author: String,
    pub organization: String,
    pub contact: String,
    pub year: String,
    /// Two-digit month, `01`..`12`.
    pub month: String,
    /// Two-digit day of month.
    pub day: String,
    /// `YYYY-MM-DD`.
    pub iso_date: String,
    /// Regional short form `YYYY/M/D`, no zero padding.
    pub locale_date: String,
    /// `Thu Mar 07 2024 09:05:01`, like Vim's `strftime("%a %b %d %Y %H:%M:%S")`.
    pub datetime: String,
}

impl SubstitutionContext {
    /// Build a context from a single local wall-clock reading.
    pub fn new(file_name: &str, identity: &Identity, now: NaiveDateTime) -> Self {
        Self {
            file_name: file_name.to_string(),
            file_name_without_ext: strip_extension(file_name).to_string(),
            author: identity.author.clone(),
            organization: identity.organization.clone(),
            contact: identity.contact.clone(),
            year: now.year().to_string(),
            month: format!("{:02}", now.month()),
            day: format!("{:02}", now.day()),
            iso_date: now.format("%Y-%m-%d").to_string(),
            locale_date: format!("{}/{}/{}", now.year(), now.month(), now.day()),
            datetime: now.format("%a %b %d %Y %H:%M:%S").to_string(),
        }
    }

    /// Build a context for the current local time.
    pub fn now(file_name: &str, identity: &Identity) -> Self {
        Self::new(file_name, identity, Local::now().naive_local())
    }
}

/// Drop the last `.ext` suffix, if there is a non-empty one.
fn strip_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(i) if i + 1 < file_name.len() => &file_name[..i],
        _ => file_name,
    }
}
