use std::collections::HashMap;

use super::descriptor::CommandDescriptor;
use super::errors::UsageError;

/// Raw arguments separated into positional arguments and flags.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SplitArgs {
    pub args: Vec<String>,
    /// Flags that take no value map to `None`.
    pub flags: HashMap<String, Option<String>>,
}

/// A token is a flag if it starts with `-` and is not a lone `-`.
pub fn is_flag(token: &str) -> bool {
    token.starts_with('-') && token != "-"
}

/// Splits `raw` left to right against the flags `descriptor` supports.
///
/// A flag that takes a value consumes the next token whatever it looks like. Repeating a flag
/// keeps the last occurrence.
pub fn split_flags(descriptor: &CommandDescriptor, raw: &[String]) -> Result<SplitArgs, UsageError> {
    let mut split = SplitArgs::default();
    let mut tokens = raw.iter();

    while let Some(token) = tokens.next() {
        if !is_flag(token) {
            split.args.push(token.clone());
            continue;
        }

        let flag = &token[1..];
        if !descriptor.supports_flag(flag) {
            return Err(UsageError::NoSuchFlag(token.clone()));
        }

        if descriptor.flag_requires_value(flag) {
            let value = tokens
                .next()
                .ok_or_else(|| UsageError::FlagRequiresValue(token.clone()))?;
            split.flags.insert(flag.to_owned(), Some(value.clone()));
        } else {
            split.flags.insert(flag.to_owned(), None);
        }
    }

    Ok(split)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::metadata::CommandMetadata;

    fn raw(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|&t| t.to_owned()).collect()
    }

    fn build_descriptor() -> CommandDescriptor {
        CommandDescriptor::new(&CommandMetadata::builder("build").flags(&["v:", "f"]).build()).unwrap()
    }

    #[test]
    fn valueless_flag_does_not_consume() {
        let split = split_flags(&build_descriptor(), &raw(&["-f", "extra"])).unwrap();
        assert_eq!(split.args, vec!["extra"]);
        assert_eq!(split.flags.get("f"), Some(&None));
        assert_eq!(split.flags.len(), 1);
    }

    #[test]
    fn value_flag_consumes_next_token() {
        let split = split_flags(&build_descriptor(), &raw(&["a", "-v", "3", "b"])).unwrap();
        assert_eq!(split.args, vec!["a", "b"]);
        assert_eq!(split.flags.get("v"), Some(&Some("3".to_owned())));
    }

    #[test]
    fn value_may_look_like_a_flag() {
        let split = split_flags(&build_descriptor(), &raw(&["-v", "-f"])).unwrap();
        assert!(split.args.is_empty());
        assert_eq!(split.flags.get("v"), Some(&Some("-f".to_owned())));
        assert!(!split.flags.contains_key("f"));
    }

    #[test]
    fn missing_value() {
        assert_eq!(
            split_flags(&build_descriptor(), &raw(&["x", "-v"])),
            Err(UsageError::FlagRequiresValue("-v".to_owned()))
        );
    }

    #[test]
    fn unsupported_flag_reports_token_as_typed() {
        assert_eq!(
            split_flags(&build_descriptor(), &raw(&["-f", "--force"])),
            Err(UsageError::NoSuchFlag("--force".to_owned()))
        );
    }

    #[test]
    fn lone_dash_is_positional() {
        assert!(!is_flag("-"));
        assert!(is_flag("-f"));
        assert!(!is_flag("f-"));

        let split = split_flags(&build_descriptor(), &raw(&["-", "-f", "-"])).unwrap();
        assert_eq!(split.args, vec!["-", "-"]);
        assert!(split.flags.contains_key("f"));
    }

    #[test]
    fn later_occurrence_wins() {
        let split = split_flags(&build_descriptor(), &raw(&["-v", "1", "-v", "2"])).unwrap();
        assert_eq!(split.flags.get("v"), Some(&Some("2".to_owned())));
    }

    #[test]
    fn partition_preserves_order() {
        let input = raw(&["one", "-f", "two", "-", "-v", "val", "three"]);
        let split = split_flags(&build_descriptor(), &input).unwrap();

        let positional: Vec<&String> = input
            .iter()
            .enumerate()
            .filter(|(i, t)| !is_flag(t) && !(*i > 0 && input[i - 1] == "-v"))
            .map(|(_, t)| t)
            .collect();
        assert_eq!(split.args.iter().collect::<Vec<_>>(), positional);
        assert_eq!(split.args.len() + 3, input.len());
    }
}
