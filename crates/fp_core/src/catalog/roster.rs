//! Embedded season roster and alias dictionary.
//!
//! Gives the crate a batteries-included [`NameNormalizer`]/[`RosterLookup`]
//! for the JSON API, the CLI and tests. Production deployments can inject
//! their own dictionary-backed implementations instead.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::ports::{NameNormalizer, RosterLookup};

/// (team, [driver, driver]) pairs for the season.
const ROSTER: &[(&str, [&str; 2])] = &[
    ("Red Bull", ["M. Verstappen", "I. Hadjar"]),
    ("Racing Bulls", ["L. Lawson", "A. Lindblad"]),
    ("Ferrari", ["C. Leclerc", "L. Hamilton"]),
    ("Mercedes", ["G. Russell", "K. Antonelli"]),
    ("McLaren", ["L. Norris", "O. Piastri"]),
    ("Aston Martin", ["F. Alonso", "L. Stroll"]),
    ("Alpine", ["P. Gasly", "F. Colapinto"]),
    ("Williams", ["A. Albon", "C. Sainz"]),
    ("Audi", ["N. Hulkenberg", "G. Bortoleto"]),
    ("Haas", ["E. Ocon", "O. Bearman"]),
    ("Cadillac", ["S. Perez", "V. Bottas"]),
];

/// Common driver spellings and nicknames → canonical short name.
const DRIVER_ALIASES: &[(&str, &str)] = &[
    ("max verstappen", "M. Verstappen"),
    ("verstappen", "M. Verstappen"),
    ("isack hadjar", "I. Hadjar"),
    ("liam lawson", "L. Lawson"),
    ("arvid lindblad", "A. Lindblad"),
    ("charles leclerc", "C. Leclerc"),
    ("leclerc", "C. Leclerc"),
    ("lewis hamilton", "L. Hamilton"),
    ("hamilton", "L. Hamilton"),
    ("george russell", "G. Russell"),
    ("kimi antonelli", "K. Antonelli"),
    ("andrea kimi antonelli", "K. Antonelli"),
    ("lando norris", "L. Norris"),
    ("norris", "L. Norris"),
    ("oscar piastri", "O. Piastri"),
    ("piastri", "O. Piastri"),
    ("fernando alonso", "F. Alonso"),
    ("alonso", "F. Alonso"),
    ("lance stroll", "L. Stroll"),
    ("pierre gasly", "P. Gasly"),
    ("franco colapinto", "F. Colapinto"),
    ("alex albon", "A. Albon"),
    ("alexander albon", "A. Albon"),
    ("carlos sainz", "C. Sainz"),
    ("nico hulkenberg", "N. Hulkenberg"),
    ("gabriel bortoleto", "G. Bortoleto"),
    ("esteban ocon", "E. Ocon"),
    ("oliver bearman", "O. Bearman"),
    ("ollie bearman", "O. Bearman"),
    ("sergio perez", "S. Perez"),
    ("checo", "S. Perez"),
    ("valtteri bottas", "V. Bottas"),
    ("bottas", "V. Bottas"),
];

/// Team spellings → canonical short name.
const TEAM_ALIASES: &[(&str, &str)] = &[
    ("red bull racing", "Red Bull"),
    ("oracle red bull racing", "Red Bull"),
    ("rb", "Racing Bulls"),
    ("visa cash app rb", "Racing Bulls"),
    ("scuderia ferrari", "Ferrari"),
    ("mercedes-amg", "Mercedes"),
    ("mercedes amg", "Mercedes"),
    ("mclaren f1 team", "McLaren"),
    ("aston martin aramco", "Aston Martin"),
    ("bwt alpine", "Alpine"),
    ("williams racing", "Williams"),
    ("audi sport", "Audi"),
    ("kick sauber", "Audi"),
    ("haas f1 team", "Haas"),
    ("moneygram haas", "Haas"),
    ("cadillac f1 team", "Cadillac"),
];

static DRIVER_INDEX: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    let mut index = HashMap::new();
    for (_, drivers) in ROSTER {
        for driver in drivers {
            index.insert(driver.to_ascii_lowercase(), *driver);
        }
    }
    for (alias, canonical) in DRIVER_ALIASES {
        index.insert((*alias).to_string(), *canonical);
    }
    index
});

static TEAM_INDEX: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    let mut index = HashMap::new();
    for (team, _) in ROSTER {
        index.insert(team.to_ascii_lowercase(), *team);
    }
    for (alias, canonical) in TEAM_ALIASES {
        index.insert((*alias).to_string(), *canonical);
    }
    index
});

/// Normalizer/roster over the embedded season data.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticRoster;

impl NameNormalizer for StaticRoster {
    fn normalize_driver(&self, raw: &str) -> Option<String> {
        let key = raw.trim().to_ascii_lowercase();
        if key.is_empty() {
            return None;
        }
        DRIVER_INDEX.get(&key).map(|s| s.to_string())
    }

    fn normalize_team(&self, raw: &str) -> Option<String> {
        let key = raw.trim().to_ascii_lowercase();
        if key.is_empty() {
            return None;
        }
        TEAM_INDEX.get(&key).map(|s| s.to_string())
    }
}

impl RosterLookup for StaticRoster {
    fn driver_team(&self, driver: &str) -> Option<String> {
        let canonical = self.normalize_driver(driver)?;
        ROSTER
            .iter()
            .find(|(_, drivers)| drivers.contains(&canonical.as_str()))
            .map(|(team, _)| team.to_string())
    }

    fn team_drivers(&self, team: &str) -> Vec<String> {
        let Some(canonical) = self.normalize_team(team) else {
            return Vec::new();
        };
        ROSTER
            .iter()
            .find(|(t, _)| *t == canonical)
            .map(|(_, drivers)| drivers.iter().map(|d| d.to_string()).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_resolution() {
        let roster = StaticRoster;
        assert_eq!(roster.normalize_driver("Checo"), Some("S. Perez".to_string()));
        assert_eq!(roster.normalize_driver("Max Verstappen"), Some("M. Verstappen".to_string()));
        assert_eq!(roster.normalize_driver("m. verstappen"), Some("M. Verstappen".to_string()));
        assert_eq!(roster.normalize_team("Scuderia Ferrari"), Some("Ferrari".to_string()));
    }

    #[test]
    fn test_unknown_and_empty_names() {
        let roster = StaticRoster;
        assert_eq!(roster.normalize_driver(""), None);
        assert_eq!(roster.normalize_driver("   "), None);
        assert_eq!(roster.normalize_driver("A. Senna"), None);
        assert_eq!(roster.normalize_team("Brawn GP"), None);
    }

    #[test]
    fn test_roster_lookup() {
        let roster = StaticRoster;
        assert_eq!(roster.driver_team("Leclerc"), Some("Ferrari".to_string()));
        let ferrari = roster.team_drivers("ferrari");
        assert!(ferrari.contains(&"C. Leclerc".to_string()));
        assert!(ferrari.contains(&"L. Hamilton".to_string()));
        assert!(roster.team_drivers("Brawn GP").is_empty());
    }
}
