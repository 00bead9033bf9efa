//! Property tests for global setting exclusivity

use proptest::prelude::*;
use splitsmaker_core::editor::RunEditor;
use splitsmaker_core::models::{GlobalSettingKey, GlobalSettings};

fn arb_key() -> impl Strategy<Value = GlobalSettingKey> {
    prop::sample::select(GlobalSettingKey::ALL.to_vec())
}

proptest! {
    #[test]
    fn updates_never_break_exclusivity(
        updates in prop::collection::vec((arb_key(), any::<bool>()), 0..40)
    ) {
        let mut editor = RunEditor::new();
        for (key, value) in updates {
            editor.update_global_setting(key, value);
            let settings = editor.config().global_settings;
            prop_assert!(!(settings.intro_start && settings.creative_start));
            prop_assert!(!(settings.ordered_live_split && settings.ordered_auto_splits));
            prop_assert_eq!(settings.get(key), value);
        }
    }

    #[test]
    fn bulk_replacement_is_normalized(bits in 0u8..128) {
        let mut editor = RunEditor::new();
        editor.set_global_settings(GlobalSettings::from_bits(bits));
        prop_assert!(editor.config().global_settings.is_consistent());
    }

    #[test]
    fn bitmask_round_trips(bits in 0u8..128) {
        let settings = GlobalSettings::from_bits(bits);
        prop_assert_eq!(settings.to_bits(), bits);
        prop_assert_eq!(GlobalSettings::from_bits(settings.to_bits()), settings);
    }
}
