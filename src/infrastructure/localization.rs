// src/infrastructure/localization.rs
use crate::application::ports::localization::Translator;
use std::collections::HashMap;

const ENGLISH: &[(&str, &str)] = &[
    ("Audit", "Audit"),
    ("ListOfSecurityEvents", "List of security events"),
    ("Purge", "Purge"),
    ("PurgeAuditEvents", "Purge all security events"),
    (
        "ConfirmPurgeAuditEvents",
        "Are you sure you want to purge all security events? All security logs will be deleted, no other data will be removed.",
    ),
    ("SecurityEventsPurged", "Security events purged"),
    ("NoEventFoundWithCriteria", "No security event has been found for this search criteria."),
    (
        "NoEventOrNoAuditSetup",
        "No security event has been recorded. This is normal if audit has not been enabled in the setup.",
    ),
    ("ID", "ID"),
    ("Date", "Date"),
    ("Code", "Code"),
    ("IP", "IP"),
    ("User", "User"),
    ("Description", "Description"),
    ("UserAgent", "User agent"),
    ("SuffixSessionName", "Suffix for session name"),
    ("Unknown", "Unknown"),
    ("AdministratorDesc", "Administrator"),
    ("SuperAdministratorDesc", "Global administrator"),
    ("Search", "Search"),
    ("RemoveFilter", "Remove filter"),
    ("Yes", "Yes"),
    ("No", "No"),
    ("Previous", "Previous"),
    ("Next", "Next"),
    ("Page", "Page %s"),
    ("DateStart", "Start date"),
    ("DateEnd", "End date"),
    ("Day", "Day"),
    ("Month", "Month"),
    ("Year", "Year"),
    ("PurgeFailed", "The purge failed and was rolled back, no security event was deleted."),
    ("UserLogged", "User %s logged in"),
    ("UserLoginFailed", "Failed login attempt for %s"),
    ("UserLogoff", "User %s logged out"),
    ("NewUserCreated", "User %s created"),
    ("UserModified", "User %s modified"),
    ("NewUserPassword", "Password changed for %s"),
    ("UserEnabled", "User %s activated"),
    ("UserDisabled", "User %s disabled"),
    ("UserDeleted", "User %s removed"),
    ("NewGroupCreated", "Group %s created"),
    ("GroupModified", "Group %s modified"),
    ("GroupDeleted", "Group %s removed"),
    ("UserAddedToGroup", "User %s added to group %s"),
    ("UserRemovedFromGroup", "User %s removed from group %s"),
    ("PermissionAdded", "Permission %s granted to %s"),
    ("PermissionRemoved", "Permission %s removed from %s"),
];

/// In-memory translation table.
#[derive(Debug, Clone, Default)]
pub struct CatalogTranslator {
    entries: HashMap<String, String>,
}

impl CatalogTranslator {
    pub fn english() -> Self {
        Self::from_pairs(ENGLISH.iter().copied())
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Flat JSON object of key to text, as shipped in site language packs.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let entries: HashMap<String, String> = serde_json::from_str(raw)?;
        Ok(Self { entries })
    }

    /// Later entries win, so site-specific wording can override the defaults.
    pub fn merge(mut self, other: CatalogTranslator) -> Self {
        self.entries.extend(other.entries);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Translator for CatalogTranslator {
    fn trans(&self, key: &str, args: &[&str]) -> String {
        match self.entries.get(key) {
            Some(template) => substitute(template, args),
            None => key.to_string(),
        }
    }
}

/// Replaces each `%s` with the next argument, or nothing once they run out.
/// `%%` yields a literal percent sign.
fn substitute(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut chars = template.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }
        match chars.peek() {
            Some('s') => {
                chars.next();
                if let Some(arg) = args.next() {
                    out.push_str(arg);
                }
            }
            Some('%') => {
                chars.next();
                out.push('%');
            }
            _ => out.push('%'),
        }
    }
    out
}
