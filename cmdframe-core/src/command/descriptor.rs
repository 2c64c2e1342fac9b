use std::collections::{HashMap, HashSet};

use super::errors::{MetadataError, UsageError};
use super::metadata::CommandMetadata;

/// A validated, normalised command definition built from a [`CommandMetadata`] record.
///
/// Immutable once registered, apart from whether a context is passed to the handler, which the
/// registry decides while building.
#[derive(Clone, Debug)]
pub struct CommandDescriptor {
    name: String,
    aliases: HashSet<String>,
    identifiers: HashSet<String>,
    usage: String,
    description: String,
    player_only: bool,
    min_args: usize,
    max_args: Option<usize>,
    /// flag name -> whether a value must follow it
    flags: HashMap<String, bool>,
    permissions: HashSet<String>,
    send_context: bool,
}

impl CommandDescriptor {
    pub fn new(metadata: &CommandMetadata) -> Result<Self, MetadataError> {
        let name = metadata.name.clone();
        if name.is_empty() {
            return Err(MetadataError::EmptyName);
        }
        if metadata.aliases.iter().any(String::is_empty) {
            return Err(MetadataError::EmptyAlias);
        }

        let min_args = usize::try_from(metadata.min_args).map_err(|_| MetadataError::NegativeMinArgs(metadata.min_args))?;
        let max_args = match metadata.max_args {
            -1 => None,
            max => {
                let max = usize::try_from(max).map_err(|_| MetadataError::InvalidMaxArgs(max))?;
                if max < min_args {
                    return Err(MetadataError::MaxBelowMin {
                        min: metadata.min_args,
                        max: metadata.max_args,
                    });
                }
                Some(max)
            },
        };

        let aliases: HashSet<String> = metadata.aliases.iter().cloned().collect();
        let mut identifiers = aliases.clone();
        identifiers.insert(name.clone());

        let usage = if metadata.usage.is_empty() {
            format!("No usage provided for '{name}'")
        } else {
            format!("/{name} {}", metadata.usage)
        };

        let description = if metadata.description.is_empty() {
            format!("No description provided for '{name}'")
        } else {
            metadata.description.clone()
        };

        let flags = metadata
            .flags
            .iter()
            .map(|flag| match flag.strip_suffix(':') {
                Some(stripped) => (stripped.to_owned(), true),
                None => (flag.clone(), false),
            })
            .collect();

        Ok(Self {
            name,
            aliases,
            identifiers,
            usage,
            description,
            player_only: metadata.player_only,
            min_args,
            max_args,
            flags,
            permissions: metadata.permissions.iter().cloned().collect(),
            send_context: false,
        })
    }

    /// Whether `token` is the name or one of the aliases. Matching is exact; callers lower-case
    /// incoming labels first.
    pub fn identify(&self, token: &str) -> bool {
        self.identifiers.contains(token)
    }

    pub fn supports_flag(&self, flag: &str) -> bool {
        self.flags.contains_key(flag)
    }

    /// `false` for flags the command does not support.
    pub fn flag_requires_value(&self, flag: &str) -> bool {
        self.flags.get(flag).copied().unwrap_or(false)
    }

    /// A command without declared permissions is open to everyone.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.is_empty() || self.permissions.contains(permission)
    }

    pub fn check_arg_count(&self, count: usize) -> Result<(), UsageError> {
        if count < self.min_args {
            return Err(UsageError::TooFewArguments);
        }

        if let Some(max) = self.max_args
            && count > max
        {
            return Err(UsageError::TooManyArguments);
        }

        Ok(())
    }

    /// The lines sent to a sender whose input was rejected.
    pub fn rejection_messages(&self, error: &UsageError) -> Vec<String> {
        let mut lines = vec![error.to_string()];
        if error.shows_usage() {
            lines.push(self.usage_message());
        }
        lines
    }

    pub fn usage_message(&self) -> String {
        format!("Usage: {}", self.usage)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &HashSet<String> {
        &self.aliases
    }

    pub fn identifiers(&self) -> &HashSet<String> {
        &self.identifiers
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_player_only(&self) -> bool {
        self.player_only
    }

    pub fn min_args(&self) -> usize {
        self.min_args
    }

    /// `None` when unbounded.
    pub fn max_args(&self) -> Option<usize> {
        self.max_args
    }

    pub fn flags(&self) -> &HashMap<String, bool> {
        &self.flags
    }

    pub fn permissions(&self) -> &HashSet<String> {
        &self.permissions
    }

    pub fn sends_context(&self) -> bool {
        self.send_context
    }

    pub(crate) fn set_send_context(&mut self, send_context: bool) {
        self.send_context = send_context;
    }
}
