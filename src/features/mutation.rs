use crate::api::AppError;

/// Lifecycle of a single request issued by a page: idle until dispatched,
/// pending while in flight, then settled with the response or the error.
#[derive(Clone, Debug, Default)]
pub enum Mutation<T> {
    #[default]
    Idle,
    Pending,
    Success(T),
    Error(AppError),
}

impl<T> Mutation<T> {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Mutation::Pending)
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Mutation::Success(_))
    }

    #[must_use]
    pub fn error(&self) -> Option<&AppError> {
        match self {
            Mutation::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Settles the mutation from a request result.
    pub fn settle(&mut self, result: Result<T, AppError>) {
        *self = match result {
            Ok(value) => Mutation::Success(value),
            Err(err) => Mutation::Error(err),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settle_records_outcome() {
        let mut mutation: Mutation<()> = Mutation::Pending;
        assert!(mutation.is_pending());

        mutation.settle(Err(AppError::Timeout("slow".to_string())));
        assert!(!mutation.is_pending());
        assert!(mutation.error().is_some());

        mutation.settle(Ok(()));
        assert!(mutation.is_success());
        assert!(mutation.error().is_none());
    }
}
