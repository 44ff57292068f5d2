//! Provider intent labels to the canonical [`Intent`].

use crate::lexicon::{SynonymTable, DEFAULT_INTENTS};
use intent_core::Intent;

/// Map a provider label. Unmapped or empty labels are [`Intent::Unknown`].
pub fn map_intent(label: &str) -> Intent {
    map_intent_with(&*DEFAULT_INTENTS, label)
}

/// Map a provider label through `table`.
///
/// Labels are matched exactly; `"OPEN_POSITION"` is not `open_position`.
pub fn map_intent_with<T>(table: &T, label: &str) -> Intent
where
    T: SynonymTable<Intent> + ?Sized,
{
    table.lookup(label).unwrap_or(Intent::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_labels_round_trip() {
        for intent in Intent::ALL {
            assert_eq!(map_intent(intent.as_str()), intent);
        }
    }

    #[test]
    fn test_unmapped_labels() {
        assert_eq!(map_intent(""), Intent::Unknown);
        assert_eq!(map_intent("invalid_intent"), Intent::Unknown);
        assert_eq!(map_intent("OPEN_POSITION"), Intent::Unknown);
    }
}
