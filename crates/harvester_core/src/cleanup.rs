//! Ordered regex substitutions that strip procedural annotations from the
//! extracted text of an adopted text.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// One substitution step. Rules run in table order; later rules assume the
/// earlier ones already ran (markup is gone, whitespace is collapsed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanupRule {
    pub name: &'static str,
    pub pattern: &'static str,
    pub replacement: &'static str,
    pub case_insensitive: bool,
    /// Trim both ends after substituting.
    pub trim: bool,
}

const fn rule(name: &'static str, pattern: &'static str, case_insensitive: bool) -> CleanupRule {
    CleanupRule {
        name,
        pattern,
        replacement: "",
        case_insensitive,
        trim: false,
    }
}

const fn collapse(name: &'static str, pattern: &'static str) -> CleanupRule {
    CleanupRule {
        name,
        pattern,
        replacement: " ",
        case_insensitive: false,
        trim: true,
    }
}

pub const CLEANUP_RULES: &[CleanupRule] = &[
    rule("markup", r"<[^>]+>", false),
    collapse("whitespace", r"\s+"),
    // Meeting lifecycle annotations.
    rule(
        "sitting_lifecycle",
        r"\(The sitting (?:was suspended|opened|closed|ended) at.*?\)",
        true,
    ),
    rule("voting_time_ended", r"\(Voting time ended at.*?\)", true),
    rule(
        "session_label",
        r"\((?:debat|stemming|vraag|interventie)\)",
        true,
    ),
    rule(
        "speaker_attribution",
        r"\(Het woord wordt gevoerd door:.*?\)",
        true,
    ),
    rule("vote_results", r"\(“Stemmingsuitslagen”, punt \d+\)", false),
    rule(
        "chair_action",
        r"\(de Voorzitter(?: maakt na de toespraak van.*?| weigert in te gaan op.*?| stemt toe| herinnert eraan dat de gedragsregels moeten worden nageleefd| neemt er akte van)?\)",
        false,
    ),
    rule("annex_reference", r"\(zie bijlage.*?\)", true),
    rule(
        "sitting_suspended",
        r"\(\s*De vergadering wordt om.*?geschorst\.\)",
        false,
    ),
    rule(
        "sitting_resumed",
        r"\(\s*De vergadering wordt om.*?hervat\.\)",
        false,
    ),
    // Rule and article citations.
    rule(
        "rule_citation",
        r"[(\[]\s*(?:[a-zA-Z]{2,3}\s*\s?)?\s*(?:artikel|rule|punt|item)\s*\d+(?:,\s*lid\s*\d+)?\s*(?:\s+\w+)?\s*[)\]]",
        true,
    ),
    // Document references.
    rule("document_code", r"\[(?:COM|A)\d+-\d+(?:/\d+)?\]", false),
    rule("hyperlink", r"\(?https?://\S+?\)", false),
    rule("procedure_cod", r"\[\s*\d{4}/\d{4}\(COD\)\]", false),
    rule("procedure_ini", r"\[\s*\d{4}/\d{4}\(INI\)\]", false),
    rule("procedure_rsp", r"\[\s*\d{4}/\d{4}\(RSP\)\]", false),
    rule("procedure_imm", r"\[\s*\d{4}/\d{4}\(IMM\)\]", false),
    rule("procedure_nle", r"\[\s*\d{4}/\d{4}\(NLE\)\]", false),
    rule(
        "interinstitutional_nle",
        r"\[\s*\d{5}/\d{4}\s*-\s*C\d+-\d+/\d+\s*-\s*\d{4}/\d{4}\(NLE\)\]",
        false,
    ),
    // Full procedural sentences.
    rule(
        "catch_the_eye",
        r"Volgens de “catch the eye”-procedure wordt het woord gevoerd door.*?\.",
        false,
    ),
    rule("speaker_sentence", r"Het woord wordt gevoerd door .*?\.", false),
    rule(
        "sitting_closed_sentence",
        r"De vergadering wordt om \d{1,2}\.\d{2} uur gesloten.",
        false,
    ),
    rule(
        "sitting_opened_sentence",
        r"De vergadering wordt om \d{1,2}\.\d{2} uur geopend.",
        false,
    ),
    rule("debate_closed", r"Het debat wordt gesloten.", false),
    rule("voting_lead_in", r"Stemming:.*?\.", false),
    collapse("final_whitespace", r"\s{2,}"),
];

static COMPILED_RULES: LazyLock<Vec<(Regex, &'static CleanupRule)>> = LazyLock::new(|| {
    CLEANUP_RULES
        .iter()
        .map(|rule| (rule.compile(), rule))
        .collect()
});

impl CleanupRule {
    fn compile(&self) -> Regex {
        RegexBuilder::new(self.pattern)
            .case_insensitive(self.case_insensitive)
            .build()
            .expect("cleanup patterns are valid")
    }

    /// Apply this rule on its own, outside the pipeline. Rules from
    /// [`CLEANUP_RULES`] reuse the pipeline's compiled regex.
    pub fn apply(&self, text: &str) -> String {
        match self.compiled() {
            Some(regex) => self.substitute(regex, text),
            None => self.substitute(&self.compile(), text),
        }
    }

    fn compiled(&self) -> Option<&'static Regex> {
        COMPILED_RULES
            .iter()
            .find(|(_, rule)| *rule == self)
            .map(|(regex, _)| regex)
    }

    fn substitute(&self, regex: &Regex, text: &str) -> String {
        let replaced = regex.replace_all(text, self.replacement);
        if self.trim {
            replaced.trim().to_string()
        } else {
            replaced.into_owned()
        }
    }
}

/// Run the full cleanup pipeline over raw paragraph text.
pub fn clean(raw: &str) -> String {
    COMPILED_RULES
        .iter()
        .fold(raw.to_string(), |text, (regex, rule)| rule.substitute(regex, &text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_named(name: &str) -> &'static CleanupRule {
        CLEANUP_RULES
            .iter()
            .find(|rule| rule.name == name)
            .expect("rule exists")
    }

    #[test]
    fn every_pattern_compiles() {
        assert_eq!(COMPILED_RULES.len(), CLEANUP_RULES.len());
    }

    #[test]
    fn rule_names_are_unique() {
        let mut names: Vec<_> = CLEANUP_RULES.iter().map(|rule| rule.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CLEANUP_RULES.len());
    }

    #[test]
    fn markup_runs_before_whitespace_collapse() {
        assert_eq!(CLEANUP_RULES[0].name, "markup");
        assert_eq!(CLEANUP_RULES[1].name, "whitespace");
        assert_eq!(CLEANUP_RULES.last().map(|r| r.name), Some("final_whitespace"));
    }

    #[test]
    fn table_rules_reuse_the_compiled_pipeline() {
        for rule in CLEANUP_RULES {
            assert!(rule.compiled().is_some(), "{} not precompiled", rule.name);
        }
    }

    #[test]
    fn ad_hoc_rule_compiles_on_demand() {
        let custom = CleanupRule {
            name: "markup",
            pattern: r"\d+",
            replacement: "#",
            case_insensitive: false,
            trim: false,
        };
        assert!(custom.compiled().is_none());
        assert_eq!(custom.apply("<b>12</b>"), "<b>#</b>");
    }

    #[test]
    fn lazy_match_stops_at_nearest_paren() {
        let text = "A (zie bijlage 1) B (zie bijlage 2) C";
        assert_eq!(rule_named("annex_reference").apply(text), "A  B  C");
    }

    #[test]
    fn session_label_is_case_insensitive() {
        assert_eq!(rule_named("session_label").apply("x (Debat) y (STEMMING)"), "x  y ");
    }

    #[test]
    fn vote_results_reference_is_case_sensitive() {
        let rule = rule_named("vote_results");
        assert_eq!(rule.apply("(“Stemmingsuitslagen”, punt 3)"), "");
        assert_eq!(
            rule.apply("(“stemmingsuitslagen”, punt 3)"),
            "(“stemmingsuitslagen”, punt 3)"
        );
    }

    #[test]
    fn chair_action_accepts_bare_and_qualified_forms() {
        let rule = rule_named("chair_action");
        assert_eq!(rule.apply("a(de Voorzitter)b"), "ab");
        assert_eq!(rule.apply("a(de Voorzitter stemt toe)b"), "ab");
        assert_eq!(
            rule.apply("a(de Voorzitter weigert in te gaan op het verzoek)b"),
            "ab"
        );
        assert_eq!(rule.apply("a(de Voorzitter zegt iets)b"), "a(de Voorzitter zegt iets)b");
    }

    #[test]
    fn rule_citation_variants() {
        let rule = rule_named("rule_citation");
        assert_eq!(rule.apply("x (artikel 149) y"), "x  y");
        assert_eq!(rule.apply("x [Rule 123, lid 2] y"), "x  y");
        assert_eq!(rule.apply("x (NL punt 4 bis) y"), "x  y");
        assert_eq!(rule.apply("x (het artikel) y"), "x (het artikel) y");
    }
}
