// SPDX-License-Identifier: Apache-2.0

//! Ownership Rule Store: turns the raw ownership file into a [`RuleSet`].

use hookguard_model::{OwnerId, OwnershipRule, RuleSet};

use super::OwnershipError;

/// Parse the ownership-declaration text. Blank lines and `#` comments are
/// ignored; every remaining line is `<pattern> <owner> [<owner> ...]`.
/// A pattern with no owners is malformed and aborts the parse.
pub fn parse_rules(text: &str) -> Result<RuleSet, OwnershipError> {
    let mut rules = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line_number = u32::try_from(index + 1).unwrap_or(u32::MAX);
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let Some(pattern) = tokens.next() else {
            continue;
        };
        let owners = tokens
            .map(OwnerId::parse)
            .collect::<Result<Vec<_>, String>>()
            .map_err(|reason| OwnershipError::Parse {
                line: line_number,
                content: raw.to_string(),
                reason,
            })?;
        if owners.is_empty() {
            return Err(OwnershipError::Parse {
                line: line_number,
                content: raw.to_string(),
                reason: "pattern without owners".to_string(),
            });
        }
        rules.push(OwnershipRule {
            pattern: pattern.to_string(),
            owners,
            source_line: line_number,
        });
    }
    Ok(RuleSet::from_rules(rules))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_patterns_owners_and_line_numbers() {
        let text = "# ownership\n\n* @myorg/default\n/docs @myorg/docs @myorg/writers\n";
        let ruleset = parse_rules(text).expect("ruleset");
        assert_eq!(ruleset.len(), 2);
        let rules = ruleset.rules();
        assert_eq!(rules[0].pattern, "*");
        assert_eq!(rules[0].source_line, 3);
        assert_eq!(rules[1].pattern, "/docs");
        assert_eq!(rules[1].owners.len(), 2);
        assert_eq!(rules[1].source_line, 4);
    }

    #[test]
    fn rejects_pattern_without_owners() {
        let err = parse_rules("/docs\n").expect_err("must fail");
        match err {
            OwnershipError::Parse { line, content, .. } => {
                assert_eq!(line, 1);
                assert_eq!(content, "/docs");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reports_the_offending_line_number() {
        let err = parse_rules("/docs @myorg/docs\n\n/src\n").expect_err("must fail");
        match err {
            OwnershipError::Parse { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn comment_only_file_yields_empty_ruleset() {
        let ruleset = parse_rules("# nothing here\n").expect("ruleset");
        assert!(ruleset.is_empty());
    }
}
