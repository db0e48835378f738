// Dictionary-based noun lemmatizer.
//
// Reduces plural nouns to their singular base form using three layers:
// an irregular-form table (children -> child), a set of words that only look
// plural (news, whereas), and WordNet-style noun suffix rules. There is no
// full lexicon, so nouns whose singular a suffix rule would mangle
// (movies, heroes) are listed in the irregular table instead.

use std::collections::{HashMap, HashSet};

/// Irregular plurals that no suffix rule can recover.
const IRREGULAR: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("businessmen", "businessman"),
    ("chairmen", "chairman"),
    ("congressmen", "congressman"),
    ("congresswomen", "congresswoman"),
    ("firemen", "fireman"),
    ("gunmen", "gunman"),
    ("policemen", "policeman"),
    ("spokesmen", "spokesman"),
    ("spokeswomen", "spokeswoman"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("lives", "life"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("wolves", "wolf"),
    ("halves", "half"),
    ("shelves", "shelf"),
    ("thieves", "thief"),
    ("loaves", "loaf"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("appendices", "appendix"),
    ("phenomena", "phenomenon"),
    ("criteria", "criterion"),
    ("analyses", "analysis"),
    ("crises", "crisis"),
    ("theses", "thesis"),
    ("hypotheses", "hypothesis"),
    ("diagnoses", "diagnosis"),
    ("buses", "bus"),
    ("viruses", "virus"),
    ("bonuses", "bonus"),
    ("campuses", "campus"),
    ("censuses", "census"),
    ("statuses", "status"),
    ("headaches", "headache"),
    ("niches", "niche"),
    ("caches", "cache"),
    ("avalanches", "avalanche"),
    ("moustaches", "moustache"),
    ("mustaches", "mustache"),
    ("cliches", "cliche"),
    // singular ends in -ie, the -ies rule would give -y
    ("movies", "movie"),
    ("cookies", "cookie"),
    ("rookies", "rookie"),
    ("zombies", "zombie"),
    ("calories", "calorie"),
    ("brownies", "brownie"),
    ("hippies", "hippie"),
    ("selfies", "selfie"),
    ("smoothies", "smoothie"),
    ("sweeties", "sweetie"),
    ("goalies", "goalie"),
    ("newbies", "newbie"),
    ("aussies", "aussie"),
    ("prairies", "prairie"),
    ("eyries", "eyrie"),
    ("veggies", "veggie"),
    ("freebies", "freebie"),
    ("birdies", "birdie"),
    // singular ends in -o
    ("goes", "go"),
    ("heroes", "hero"),
    ("potatoes", "potato"),
    ("tomatoes", "tomato"),
    ("vetoes", "veto"),
    ("echoes", "echo"),
    ("torpedoes", "torpedo"),
    ("volcanoes", "volcano"),
    ("tornadoes", "tornado"),
    ("mosquitoes", "mosquito"),
    ("embargoes", "embargo"),
    ("mangoes", "mango"),
    ("dominoes", "domino"),
];

/// Words ending in `s` that are already in their base form.
const INVARIANT: &[&str] = &[
    "news",
    "series",
    "species",
    "means",
    "headquarters",
    "politics",
    "economics",
    "physics",
    "mathematics",
    "ethics",
    "athletics",
    "statistics",
    "logistics",
    "gas",
    "chaos",
    "lens",
    "atlas",
    "bias",
    "canvas",
    "alias",
    "christmas",
    "texas",
    "kansas",
    "arkansas",
    "paris",
    "brussels",
    "wales",
    "mars",
    "jesus",
    "isis",
    "hamas",
    "aids",
    "covid",
    // not nouns
    "always",
    "perhaps",
    "towards",
    "afterwards",
    "backwards",
    "forwards",
    "upwards",
    "downwards",
    "whereas",
    "sometimes",
    "besides",
    "nowadays",
    "indoors",
    "outdoors",
    "overseas",
    "upstairs",
    "downstairs",
    "alas",
    "whereabouts",
    "thanks",
];

/// Suffix rules applied in order: (suffix, replacement, minimum word length).
const SUFFIX_RULES: &[(&str, &str, usize)] = &[
    ("ies", "y", 5),
    ("sses", "ss", 5),
    ("ches", "ch", 5),
    ("shes", "sh", 5),
    ("xes", "x", 4),
    ("s", "", 4),
];

/// Noun lemmatizer backed by static tables.
pub struct Lemmatizer {
    irregular: HashMap<&'static str, &'static str>,
    invariant: HashSet<&'static str>,
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer {
    pub fn new() -> Self {
        Self {
            irregular: IRREGULAR.iter().copied().collect(),
            invariant: INVARIANT.iter().copied().collect(),
        }
    }

    /// Reduce a lowercase token to its base form.
    ///
    /// Rules are applied until the word stops changing, so
    /// `lemmatize(lemmatize(w)) == lemmatize(w)` for every input.
    pub fn lemmatize(&self, word: &str) -> String {
        let mut current = word.to_string();
        while let Some(next) = self.reduce_once(&current) {
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    /// One reduction step. `None` means the word is already a base form.
    fn reduce_once(&self, word: &str) -> Option<String> {
        if let Some(base) = self.irregular.get(word) {
            return Some((*base).to_string());
        }

        if word.len() <= 3 || self.invariant.contains(word) {
            return None;
        }

        // class, bonus, analysis
        if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
            return None;
        }

        SUFFIX_RULES
            .iter()
            .find(|(suffix, _, min_len)| word.len() >= *min_len && word.ends_with(suffix))
            .map(|(suffix, replacement, _)| {
                let stem = &word[..word.len() - suffix.len()];
                format!("{stem}{replacement}")
            })
    }
}
