//! Confirmation step in front of a destructive action.

const DEFAULT_HEADING: &str = "Are you sure?";
const DEFAULT_CANCEL_TEXT: &str = "Cancel";
const DEFAULT_CONFIRM_TEXT: &str = "Confirm";
const DEFAULT_CONFIRM_VARIANT: &str = "@primary";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PopoverPanelView {
    pub heading: Option<String>,
    pub message: Option<String>,
    pub cancel_text: String,
    pub confirm_text: String,
    pub confirm_variant: String,
}

/// Wraps a trigger. When disabled, a click runs `on_confirm` straight away
/// and the panel never opens.
pub struct ConfirmPopover<F: FnMut()> {
    on_confirm: F,
    is_enabled: bool,
    is_open: bool,
    title: Option<String>,
    message: Option<String>,
    confirm_text: Option<String>,
    cancel_text: Option<String>,
    confirm_variant: String,
}

impl<F: FnMut()> ConfirmPopover<F> {
    pub fn new(on_confirm: F) -> Self {
        Self {
            on_confirm,
            is_enabled: true,
            is_open: false,
            title: None,
            message: None,
            confirm_text: None,
            cancel_text: None,
            confirm_variant: DEFAULT_CONFIRM_VARIANT.to_string(),
        }
    }

    #[must_use]
    pub fn enabled(mut self, is_enabled: bool) -> Self {
        self.is_enabled = is_enabled;
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn confirm_text(mut self, text: impl Into<String>) -> Self {
        self.confirm_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn cancel_text(mut self, text: impl Into<String>) -> Self {
        self.cancel_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn confirm_variant(mut self, variant: impl Into<String>) -> Self {
        self.confirm_variant = variant.into();
        self
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn click_trigger(&mut self) {
        if self.is_enabled {
            self.is_open = true;
        } else {
            (self.on_confirm)();
        }
    }

    /// Runs the callback once and closes. Ignored while closed.
    pub fn confirm(&mut self) {
        if self.is_open {
            (self.on_confirm)();
            self.is_open = false;
        }
    }

    pub fn cancel(&mut self) {
        self.is_open = false;
    }

    #[must_use]
    pub fn view(&self) -> Option<PopoverPanelView> {
        if !self.is_enabled || !self.is_open {
            return None;
        }
        let heading = if self.title.is_none() && self.message.is_none() {
            Some(DEFAULT_HEADING.to_string())
        } else {
            self.title.clone()
        };
        Some(PopoverPanelView {
            heading,
            message: self.message.clone(),
            cancel_text: self
                .cancel_text
                .clone()
                .unwrap_or_else(|| DEFAULT_CANCEL_TEXT.to_string()),
            confirm_text: self
                .confirm_text
                .clone()
                .unwrap_or_else(|| DEFAULT_CONFIRM_TEXT.to_string()),
            confirm_variant: self.confirm_variant.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_popover_confirms_immediately_without_panel() {
        let mut calls = 0;
        {
            let mut popover = ConfirmPopover::new(|| calls += 1).enabled(false);
            popover.click_trigger();
            assert!(popover.view().is_none());
            assert!(!popover.is_open());
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn enabled_popover_confirms_once_and_closes() {
        let mut calls = 0;
        {
            let mut popover = ConfirmPopover::new(|| calls += 1);
            popover.click_trigger();
            let panel = popover.view();
            assert_eq!(
                panel,
                Some(PopoverPanelView {
                    heading: Some(DEFAULT_HEADING.to_string()),
                    message: None,
                    cancel_text: "Cancel".to_string(),
                    confirm_text: "Confirm".to_string(),
                    confirm_variant: "@primary".to_string(),
                })
            );

            popover.confirm();
            popover.confirm();
            assert!(popover.view().is_none());
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn cancel_closes_without_confirming() {
        let mut calls = 0;
        {
            let mut popover = ConfirmPopover::new(|| calls += 1)
                .message("This cannot be undone")
                .confirm_text("Delete");
            popover.click_trigger();
            let panel = popover.view();
            assert_eq!(panel.as_ref().and_then(|p| p.heading.clone()), None);
            assert_eq!(panel.map(|p| p.confirm_text), Some("Delete".to_string()));
            popover.cancel();
            assert!(!popover.is_open());
        }
        assert_eq!(calls, 0);
    }
}
