//! Political leaning classification.
//!
//! Providers rarely label leaning directly. FEC and OpenSecrets carry a
//! support/oppose indicator and a candidate party; AdImpact carries a
//! sponsor party. A [`LeaningClassifier`] turns those signals into a
//! [`PoliticalLeaning`], or declines.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

use crate::ad::PoliticalLeaning;

/// The raw signals a provider record offers.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeaningSignal<'a> {
    /// `S`/`O`, `Support`/`Oppose`, in any case.
    pub support_oppose: Option<&'a str>,
    /// Party code or name (`DEM`, `D`, `Republican`, ...).
    pub party: Option<&'a str>,
}

impl<'a> LeaningSignal<'a> {
    pub fn new(support_oppose: Option<&'a str>, party: Option<&'a str>) -> Self {
        Self {
            support_oppose,
            party,
        }
    }

    pub fn party(party: Option<&'a str>) -> Self {
        Self {
            support_oppose: None,
            party,
        }
    }
}

pub trait LeaningClassifier: Send + Sync + fmt::Debug {
    fn classify(&self, signal: &LeaningSignal<'_>) -> Option<PoliticalLeaning>;
}

/// Never assigns a leaning.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLeaning;

impl LeaningClassifier for NoLeaning {
    fn classify(&self, _signal: &LeaningSignal<'_>) -> Option<PoliticalLeaning> {
        None
    }
}

/// Maps the support/oppose indicator to a fixed leaning, and falls back to
/// a party table when no indicator is present.
///
/// The indicator mapping defaults to support → progressive and
/// oppose → conservative.
#[derive(Debug, Clone)]
pub struct SupportOpposeClassifier {
    support: Option<PoliticalLeaning>,
    oppose: Option<PoliticalLeaning>,
    parties: HashMap<String, PoliticalLeaning>,
}

impl Default for SupportOpposeClassifier {
    fn default() -> Self {
        let parties = [
            ("DEM", PoliticalLeaning::Progressive),
            ("D", PoliticalLeaning::Progressive),
            ("DEMOCRAT", PoliticalLeaning::Progressive),
            ("DEMOCRATIC", PoliticalLeaning::Progressive),
            ("REP", PoliticalLeaning::Conservative),
            ("R", PoliticalLeaning::Conservative),
            ("GOP", PoliticalLeaning::Conservative),
            ("REPUBLICAN", PoliticalLeaning::Conservative),
            ("IND", PoliticalLeaning::Moderate),
            ("I", PoliticalLeaning::Moderate),
            ("INDEPENDENT", PoliticalLeaning::Moderate),
            ("NP", PoliticalLeaning::NonPartisan),
            ("NON", PoliticalLeaning::NonPartisan),
            ("NONPARTISAN", PoliticalLeaning::NonPartisan),
        ]
        .into_iter()
        .map(|(code, leaning)| (code.to_string(), leaning))
        .collect();

        Self {
            support: Some(PoliticalLeaning::Progressive),
            oppose: Some(PoliticalLeaning::Conservative),
            parties,
        }
    }
}

impl SupportOpposeClassifier {
    pub fn with_support(mut self, leaning: Option<PoliticalLeaning>) -> Self {
        self.support = leaning;
        self
    }

    pub fn with_oppose(mut self, leaning: Option<PoliticalLeaning>) -> Self {
        self.oppose = leaning;
        self
    }

    pub fn with_party(mut self, code: &str, leaning: PoliticalLeaning) -> Self {
        self.parties.insert(code.trim().to_ascii_uppercase(), leaning);
        self
    }
}

impl LeaningClassifier for SupportOpposeClassifier {
    fn classify(&self, signal: &LeaningSignal<'_>) -> Option<PoliticalLeaning> {
        let indicator = signal
            .support_oppose
            .map(|s| s.trim().to_ascii_uppercase())
            .filter(|s| !s.is_empty());
        match indicator.as_deref() {
            Some("S") | Some("SUPPORT") | Some("SUPPORTS") => return self.support,
            Some("O") | Some("OPPOSE") | Some("OPPOSES") => return self.oppose,
            _ => {}
        }

        let party = signal.party?.trim().to_ascii_uppercase();
        self.parties.get(&party).copied()
    }
}

/// Which classifier adapters are built with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaningPolicy {
    #[default]
    SupportOppose,
    None,
}

/// `[leaning]` table of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LeaningConfig {
    pub policy: LeaningPolicy,
    pub support: Option<PoliticalLeaning>,
    pub oppose: Option<PoliticalLeaning>,
    pub parties: HashMap<String, PoliticalLeaning>,
}

impl LeaningConfig {
    pub fn build(&self) -> std::sync::Arc<dyn LeaningClassifier> {
        match self.policy {
            LeaningPolicy::None => std::sync::Arc::new(NoLeaning),
            LeaningPolicy::SupportOppose => {
                let mut classifier = SupportOpposeClassifier::default();
                if let Some(support) = self.support {
                    classifier = classifier.with_support(Some(support));
                }
                if let Some(oppose) = self.oppose {
                    classifier = classifier.with_oppose(Some(oppose));
                }
                for (code, leaning) in &self.parties {
                    classifier = classifier.with_party(code, *leaning);
                }
                std::sync::Arc::new(classifier)
            }
        }
    }
}
