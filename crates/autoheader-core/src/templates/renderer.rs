//! Placeholder substitution for header templates.
//!
//! Templates reference values as `${name}` from a fixed, closed set of names
//! (see [`Placeholder`]). Substitution is a single left-to-right pass:
//! inserted values are never re-scanned, so an author named `${year}` comes
//! out literally. Unknown names and unterminated `${` are left verbatim.
//!
//! ```ignore
//! use autoheader_core::templates::{context::SubstitutionContext, renderer::render};
//!
//! let ctx = SubstitutionContext::now("main.rs", &identity);
//! let header = render("// ${fileName} by ${author}\n", &ctx);
//! ```

use super::context::SubstitutionContext;

/// A recognized placeholder name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    FileName,
    FileNameWithoutExt,
    Author,
    Organization,
    Contact,
    Datetime,
    Date,
    DateIso,
    Year,
    Month,
    Day,
}

impl Placeholder {
    pub const ALL: [Placeholder; 11] = [
        Self::FileName,
        Self::FileNameWithoutExt,
        Self::Author,
        Self::Organization,
        Self::Contact,
        Self::Datetime,
        Self::Date,
        Self::DateIso,
        Self::Year,
        Self::Month,
        Self::Day,
    ];

    /// Resolve a name as written between `${` and `}`.
    ///
    /// `university` and `email` are accepted for settings written against
    /// the older field names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "fileName" => Some(Self::FileName),
            "fileNameWithoutExt" => Some(Self::FileNameWithoutExt),
            "author" => Some(Self::Author),
            "organization" | "university" => Some(Self::Organization),
            "contact" | "email" => Some(Self::Contact),
            "datetime" => Some(Self::Datetime),
            "date" => Some(Self::Date),
            "dateISO" => Some(Self::DateIso),
            "year" => Some(Self::Year),
            "month" => Some(Self::Month),
            "day" => Some(Self::Day),
            _ => None,
        }
    }

    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Self::FileName => "fileName",
            Self::FileNameWithoutExt => "fileNameWithoutExt",
            Self::Author => "author",
            Self::Organization => "organization",
            Self::Contact => "contact",
            Self::Datetime => "datetime",
            Self::Date => "date",
            Self::DateIso => "dateISO",
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
        }
    }

    /// `${name}` as it appears in templates.
    pub fn token(self) -> String {
        format!("${{{}}}", self.name())
    }

    fn value(self, ctx: &SubstitutionContext) -> &str {
        match self {
            Self::FileName => &ctx.file_name,
            Self::FileNameWithoutExt => &ctx.file_name_without_ext,
            Self::Author => &ctx.author,
            Self::Organization => &ctx.organization,
            Self::Contact => &ctx.contact,
            Self::Datetime => &ctx.datetime,
            Self::Date => &ctx.locale_date,
            Self::DateIso => &ctx.iso_date,
            Self::Year => &ctx.year,
            Self::Month => &ctx.month,
            Self::Day => &ctx.day,
        }
    }
}

/// Replace every recognized `${name}` in `template` with its context value.
pub fn render(template: &str, ctx: &SubstitutionContext) -> String {
    let mut out = String::with_capacity(template.len() + 64);
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let Some(end) = after.find('}') else {
            // Unterminated; nothing further can match.
            out.push_str(&rest[start..]);
            return out;
        };

        match Placeholder::from_name(&after[..end]) {
            Some(p) => {
                out.push_str(p.value(ctx));
                rest = &after[end + 1..];
            }
            None => {
                out.push_str("${");
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
