use anyhow::Result;
use rpick::{PickerOutcome, PickerUi};

use crate::settings::ResolvedConfig;

/// Builds the terminal form from resolved settings and runs it.
pub(crate) struct PickerWorkflow {
    picker_ui: PickerUi,
}

impl PickerWorkflow {
    pub(crate) fn from_config(config: ResolvedConfig) -> Self {
        let ResolvedConfig {
            picker,
            dependent,
            title,
            dependent_title,
            initial_query,
            theme,
            sources,
        } = config;
        tracing::debug!(?sources, "configuration files read");

        let mut picker_ui = PickerUi::new(picker).with_initial_query(initial_query);
        if let Some(title) = title {
            picker_ui = picker_ui.with_title(title);
        }
        if let Some(dependent) = dependent {
            picker_ui = picker_ui.with_dependent(dependent, dependent_title);
        }
        if let Some(theme) = theme {
            picker_ui = picker_ui.with_theme_name(&theme);
        }
        Self { picker_ui }
    }

    pub(crate) fn run(self) -> Result<PickerOutcome> {
        self.picker_ui.run()
    }
}
