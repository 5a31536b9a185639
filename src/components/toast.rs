//! Transient notifications raised by page flows. Titles and descriptions must be
//! safe to render and should never include secrets or tokens.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastStatus {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub status: ToastStatus,
    pub title: String,
    pub description: Option<String>,
}

/// Ordered list of toasts raised since the last drain.
#[derive(Clone, Debug, Default)]
pub struct Toaster {
    toasts: Vec<Toast>,
}

impl Toaster {
    pub fn success(&mut self, title: impl Into<String>, description: Option<String>) {
        self.push(ToastStatus::Success, title.into(), description);
    }

    pub fn error(&mut self, title: impl Into<String>, description: Option<String>) {
        self.push(ToastStatus::Error, title.into(), description);
    }

    fn push(&mut self, status: ToastStatus, title: String, description: Option<String>) {
        self.toasts.push(Toast {
            status,
            title,
            description: description.filter(|text| !text.trim().is_empty()),
        });
    }

    #[must_use]
    pub fn last(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Removes and returns every pending toast, oldest first.
    pub fn drain(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.toasts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_descriptions_are_dropped() {
        let mut toaster = Toaster::default();
        toaster.error("Reset password failed", Some("  ".to_string()));
        assert_eq!(toaster.last().and_then(|t| t.description.clone()), None);
    }

    #[test]
    fn drain_empties_in_order() {
        let mut toaster = Toaster::default();
        toaster.success("first", None);
        toaster.error("second", Some("detail".to_string()));

        let drained = toaster.drain();
        assert!(toaster.is_empty());
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].status, ToastStatus::Success);
        assert_eq!(drained[1].title, "second");
    }
}
