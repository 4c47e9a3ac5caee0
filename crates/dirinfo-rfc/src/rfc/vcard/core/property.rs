//! Property name dispatch.

use std::fmt;

/// A property name normalized for dispatch.
///
/// Matching ignores ASCII case, so `fn`, `Fn` and `FN` all map to
/// [`PropertyName::Fn`]. Anything unrecognized, including most `X-`
/// extensions, is kept verbatim in [`PropertyName::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyName {
    Begin,
    End,
    Version,
    Fn,
    N,
    Nickname,
    Photo,
    Bday,
    Adr,
    Label,
    Tel,
    Email,
    Mailer,
    Tz,
    Geo,
    Title,
    Role,
    Logo,
    Agent,
    Org,
    Categories,
    Note,
    Prodid,
    Rev,
    SortString,
    Sound,
    Uid,
    Url,
    Class,
    Key,
    Impp,
    XAbUid,
    XAbShowAs,
    XJabber,
    XGtalk,
    Other(String),
}

impl PropertyName {
    /// Maps a written property name onto its variant.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "BEGIN" => Self::Begin,
            "END" => Self::End,
            "VERSION" => Self::Version,
            "FN" => Self::Fn,
            "N" => Self::N,
            "NICKNAME" => Self::Nickname,
            "PHOTO" => Self::Photo,
            "BDAY" => Self::Bday,
            "ADR" => Self::Adr,
            "LABEL" => Self::Label,
            "TEL" => Self::Tel,
            "EMAIL" => Self::Email,
            "MAILER" => Self::Mailer,
            "TZ" => Self::Tz,
            "GEO" => Self::Geo,
            "TITLE" => Self::Title,
            "ROLE" => Self::Role,
            "LOGO" => Self::Logo,
            "AGENT" => Self::Agent,
            "ORG" => Self::Org,
            "CATEGORIES" => Self::Categories,
            "NOTE" => Self::Note,
            "PRODID" => Self::Prodid,
            "REV" => Self::Rev,
            "SORT-STRING" => Self::SortString,
            "SOUND" => Self::Sound,
            "UID" => Self::Uid,
            "URL" => Self::Url,
            "CLASS" => Self::Class,
            "KEY" => Self::Key,
            "IMPP" => Self::Impp,
            "X-ABUID" => Self::XAbUid,
            "X-ABSHOWAS" => Self::XAbShowAs,
            "X-JABBER" => Self::XJabber,
            "X-GTALK" => Self::XGtalk,
            _ => Self::Other(name.to_string()),
        }
    }

    /// Returns the canonical (uppercase) spelling, or the original text for
    /// [`PropertyName::Other`].
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Begin => "BEGIN",
            Self::End => "END",
            Self::Version => "VERSION",
            Self::Fn => "FN",
            Self::N => "N",
            Self::Nickname => "NICKNAME",
            Self::Photo => "PHOTO",
            Self::Bday => "BDAY",
            Self::Adr => "ADR",
            Self::Label => "LABEL",
            Self::Tel => "TEL",
            Self::Email => "EMAIL",
            Self::Mailer => "MAILER",
            Self::Tz => "TZ",
            Self::Geo => "GEO",
            Self::Title => "TITLE",
            Self::Role => "ROLE",
            Self::Logo => "LOGO",
            Self::Agent => "AGENT",
            Self::Org => "ORG",
            Self::Categories => "CATEGORIES",
            Self::Note => "NOTE",
            Self::Prodid => "PRODID",
            Self::Rev => "REV",
            Self::SortString => "SORT-STRING",
            Self::Sound => "SOUND",
            Self::Uid => "UID",
            Self::Url => "URL",
            Self::Class => "CLASS",
            Self::Key => "KEY",
            Self::Impp => "IMPP",
            Self::XAbUid => "X-ABUID",
            Self::XAbShowAs => "X-ABSHOWAS",
            Self::XJabber => "X-JABBER",
            Self::XGtalk => "X-GTALK",
            Self::Other(name) => name,
        }
    }

    /// Returns whether the name is an `X-` extension.
    #[must_use]
    pub fn is_extension(&self) -> bool {
        let name = self.as_str();
        name.len() > 2 && name.get(..2).is_some_and(|p| p.eq_ignore_ascii_case("X-"))
    }
}

impl From<&str> for PropertyName {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns whether `name` is usable as a property, parameter or group name:
/// non-empty and made of ASCII alphanumerics, `-` and `_`.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
