// src/domain/event/description.rs
use std::collections::HashSet;

/// Separator between an action key and its arguments in structured
/// descriptions, e.g. `UserLogged : jdoe : 10.0.0.4`.
pub const KEY_SEPARATOR: &str = " : ";

/// Positional arguments accepted by a translation.
pub const MAX_ARGS: usize = 4;

/// Action keys written by the event logging trigger.
pub const DEFAULT_ACTION_KEYS: &[&str] = &[
    "UserLogged",
    "UserLoginFailed",
    "UserLogoff",
    "NewUserCreated",
    "UserModified",
    "NewUserPassword",
    "UserEnabled",
    "UserDisabled",
    "UserDeleted",
    "NewGroupCreated",
    "GroupModified",
    "GroupDeleted",
    "UserAddedToGroup",
    "UserRemovedFromGroup",
    "PermissionAdded",
    "PermissionRemoved",
];

/// A description split into a translation key, its positional arguments and
/// any text to append verbatim after translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedDescription {
    pub key: String,
    pub args: Vec<String>,
    pub trailing: Option<String>,
}

impl DecodedDescription {
    fn literal(raw: &str) -> Self {
        Self {
            key: raw.to_string(),
            args: Vec::new(),
            trailing: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DescriptionDecoder {
    action_keys: HashSet<String>,
}

impl Default for DescriptionDecoder {
    fn default() -> Self {
        Self::with_keys(DEFAULT_ACTION_KEYS.iter().copied())
    }
}

impl DescriptionDecoder {
    pub fn with_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            action_keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_action_key(&self, raw: &str) -> bool {
        let head = raw.split(KEY_SEPARATOR).next().unwrap_or(raw);
        self.action_keys.contains(head.trim())
    }

    /// Best effort: anything that is neither a structured key nor a
    /// parenthesised argument list is returned as a literal key.
    pub fn decode(&self, raw: &str) -> DecodedDescription {
        if self.is_action_key(raw) {
            return decode_structured(raw);
        }
        if let Some(decoded) = decode_parenthesised(raw) {
            return decoded;
        }
        DecodedDescription::literal(raw)
    }
}

fn decode_structured(raw: &str) -> DecodedDescription {
    let mut parts = raw.split(KEY_SEPARATOR);
    let key = parts.next().unwrap_or_default().trim().to_string();
    let args = parts.take(MAX_ARGS).map(str::to_string).collect();
    DecodedDescription {
        key,
        args,
        trailing: None,
    }
}

/// `(key,arg1,arg2)trailing text`; the match does not cross a line break and
/// the closing parenthesis is the last one on the line.
fn decode_parenthesised(raw: &str) -> Option<DecodedDescription> {
    raw.lines().find_map(|line| {
        let open = line.find('(')?;
        let close = line.rfind(')')?;
        if close <= open {
            return None;
        }
        let inner = &line[open + 1..close];
        let mut values = inner.split(',');
        let key = values.next().unwrap_or_default().to_string();
        let args = values.take(MAX_ARGS).map(str::to_string).collect();
        let trailing = &line[close + 1..];
        Some(DecodedDescription {
            key,
            args,
            trailing: (!trailing.is_empty()).then(|| trailing.to_string()),
        })
    })
}
