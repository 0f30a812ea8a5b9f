// src/names.rs
use rand::seq::SliceRandom;

const ADJECTIVES: &[&str] = &[
    "ancient", "brave", "calm", "clever", "crooked", "daring", "eager", "fancy", "gentle",
    "giant", "grumpy", "hidden", "hollow", "humble", "jolly", "lively", "lonely", "mighty",
    "misty", "noble", "polite", "proud", "quiet", "rapid", "rustic", "shiny", "silent",
    "sleepy", "steady", "stormy", "swift", "tiny", "tough", "vast", "wild", "wise",
];

const COLORS: &[&str] = &[
    "amber", "aqua", "azure", "beige", "black", "blue", "bronze", "brown", "coral", "crimson",
    "cyan", "emerald", "gold", "gray", "green", "indigo", "ivory", "jade", "lime", "magenta",
    "maroon", "olive", "orange", "pink", "purple", "red", "ruby", "salmon", "scarlet",
    "silver", "tan", "teal", "violet", "white", "yellow",
];

const ANIMALS: &[&str] = &[
    "badger", "bat", "bear", "beaver", "bison", "boar", "camel", "cobra", "crane", "crow",
    "deer", "dolphin", "eagle", "falcon", "ferret", "fox", "gecko", "goat", "hawk", "heron",
    "ibis", "jackal", "koala", "lemur", "lynx", "moose", "newt", "otter", "owl", "panda",
    "parrot", "raven", "salmon", "shark", "sloth", "swan", "tiger", "toad", "walrus", "wolf",
];

/// Random display name for an uploaded schematic, e.g. `QuietAmberOtter`.
/// Output is always ASCII letters so it is safe to embed in a file path.
pub fn generate_name() -> String {
    let mut rng = rand::thread_rng();
    [ADJECTIVES, COLORS, ANIMALS]
        .iter()
        .filter_map(|words| words.choose(&mut rng))
        .map(|w| capitalize(w))
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
