use super::{Breakpoint, BreakpointValues};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IconPosition {
    #[default]
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ButtonView {
    /// Label moved to the aria label.
    IconOnly { aria_label: String, icon: String },
    WithText {
        label: String,
        left_icon: Option<String>,
        right_icon: Option<String>,
    },
}

/// Button that drops its label on small viewports.
#[derive(Clone, Debug)]
pub struct ResponsiveIconButton {
    label: String,
    icon: String,
    icon_position: IconPosition,
    hide_text: BreakpointValues<bool>,
}

impl ResponsiveIconButton {
    pub fn new(label: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            icon: icon.into(),
            icon_position: IconPosition::Left,
            hide_text: BreakpointValues::new()
                .with(Breakpoint::Base, true)
                .with(Breakpoint::Md, false),
        }
    }

    #[must_use]
    pub fn icon_position(mut self, position: IconPosition) -> Self {
        self.icon_position = position;
        self
    }

    #[must_use]
    pub fn hide_text_breakpoints(mut self, hide_text: BreakpointValues<bool>) -> Self {
        self.hide_text = hide_text;
        self
    }

    #[must_use]
    pub fn render(&self, viewport_width: u32) -> ButtonView {
        if self.hide_text.resolve(viewport_width).copied().unwrap_or(false) {
            return ButtonView::IconOnly {
                aria_label: self.label.clone(),
                icon: self.icon.clone(),
            };
        }
        let (left_icon, right_icon) = match self.icon_position {
            IconPosition::Left => (Some(self.icon.clone()), None),
            IconPosition::Right => (None, Some(self.icon.clone())),
        };
        ButtonView::WithText {
            label: self.label.clone(),
            left_icon,
            right_icon,
        }
    }
}
