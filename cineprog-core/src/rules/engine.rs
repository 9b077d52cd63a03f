use crate::config::RuleSet;
use crate::types::ScreeningRecord;

use super::record_rules::{CinemaAliasRule, TitleFixRule, VersionInferenceRule};

// Sequential rule pipeline infrastructure
pub trait RecordRule {
    fn apply(&self, record: ScreeningRecord) -> ScreeningRecord;
    fn name(&self) -> &str;
}

/// Applies a rule set to screening records, one record at a time, in the
/// fixed order cinema alias -> title fix -> version inference.
///
/// Order and cardinality of the input are preserved. Re-applying is a no-op
/// as long as aliases and fixes do not chain into each other.
pub struct RuleEngine<'a> {
    rules: Vec<Box<dyn RecordRule + 'a>>,
}

impl<'a> RuleEngine<'a> {
    pub fn new(rule_set: &'a RuleSet) -> Self {
        let mut rules: Vec<Box<dyn RecordRule + 'a>> = vec![
            Box::new(CinemaAliasRule::new(&rule_set.cinema_aliases)),
            Box::new(TitleFixRule::new(&rule_set.title_fixes)),
        ];
        if rule_set
            .version_rules
            .set_vf_if_original_language_not_fr_and_not_vost
        {
            rules.push(Box::new(VersionInferenceRule));
        }
        Self { rules }
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    pub fn apply_to(&self, record: ScreeningRecord) -> ScreeningRecord {
        self.rules
            .iter()
            .fold(record, |record, rule| rule.apply(record))
    }

    pub fn apply(&self, records: Vec<ScreeningRecord>) -> Vec<ScreeningRecord> {
        records
            .into_iter()
            .map(|record| self.apply_to(record))
            .collect()
    }
}

/// Pure entry point: records + rule set -> normalized records
pub fn apply_rules(records: Vec<ScreeningRecord>, rule_set: &RuleSet) -> Vec<ScreeningRecord> {
    RuleEngine::new(rule_set).apply(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VersionRules;
    use crate::types::Version;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn record(cinema: &str, title: &str, version: Option<Version>, lang: Option<&str>) -> ScreeningRecord {
        ScreeningRecord {
            cinema: cinema.to_string(),
            movie_title: title.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 12, 24).unwrap(),
            time: "20h".to_string(),
            version,
            original_title: None,
            original_language: lang.map(str::to_string),
            trailer_url: None,
        }
    }

    fn rule_set(aliases: &[(&str, &str)], fixes: &[(&str, &str)], infer_vf: bool) -> RuleSet {
        let to_map = |pairs: &[(&str, &str)]| -> HashMap<String, String> {
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
        };
        RuleSet {
            cinema_aliases: to_map(aliases),
            title_fixes: to_map(fixes),
            version_rules: VersionRules {
                set_vf_if_original_language_not_fr_and_not_vost: infer_vf,
            },
        }
    }

    #[test]
    fn test_cinema_alias() {
        let rules = rule_set(&[("LUZY", "LUZY – Le Vox")], &[], false);
        let updated = apply_rules(vec![record("LUZY", "Film", None, None)], &rules);
        assert_eq!(updated[0].cinema, "LUZY – Le Vox");
    }

    #[test]
    fn test_title_fix() {
        let rules = rule_set(&[], &[("Chasse gardée2", "Chasse gardée 2")], false);
        let updated = apply_rules(vec![record("LUZY – Le Vox", "Chasse gardée2", None, None)], &rules);
        assert_eq!(updated[0].movie_title, "Chasse gardée 2");
    }

    #[test]
    fn test_version_from_original_language() {
        let rules = rule_set(&[], &[], true);
        let updated = apply_rules(vec![record("LUZY – Le Vox", "Film", None, Some("en"))], &rules);
        assert_eq!(updated[0].version, Some(Version::Vf));
    }

    #[test]
    fn test_version_rule_keeps_vost_and_french() {
        let rules = rule_set(&[], &[], true);
        let updated = apply_rules(
            vec![
                record("C", "Subtitled", Some(Version::Vost), Some("en")),
                record("C", "French", None, Some("FR")),
                record("C", "Unknown", None, None),
                record("C", "Empty", None, Some("")),
            ],
            &rules,
        );
        assert_eq!(updated[0].version, Some(Version::Vost));
        assert_eq!(updated[1].version, None);
        assert_eq!(updated[2].version, None);
        assert_eq!(updated[3].version, None);
    }

    #[test]
    fn test_version_rule_disabled() {
        let rules = rule_set(&[], &[], false);
        let updated = apply_rules(vec![record("C", "Film", None, Some("en"))], &rules);
        assert_eq!(updated[0].version, None);
        assert_eq!(RuleEngine::new(&rules).rule_names(), vec!["CinemaAlias", "TitleFix"]);
    }

    #[test]
    fn test_preserves_order_and_is_idempotent() {
        let rules = rule_set(
            &[("LUZY", "LUZY – Le Vox")],
            &[("Chasse gardée2", "Chasse gardée 2")],
            true,
        );
        let input = vec![
            record("LUZY", "Chasse gardée2", None, Some("fr")),
            record("Autre", "Film", None, Some("ja")),
            record("LUZY", "Film", Some(Version::Vost), Some("en")),
        ];
        let once = apply_rules(input, &rules);
        assert_eq!(once.len(), 3);
        assert_eq!(once[1].cinema, "Autre");
        assert_eq!(once[1].version, Some(Version::Vf));
        let twice = apply_rules(once.clone(), &rules);
        assert_eq!(once, twice);
    }
}
