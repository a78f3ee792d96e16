#[cfg(test)]
#[path = "turn_test.rs"]
mod tests;

use super::ClientError;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum TurnStatus {
    #[default]
    Idle,
    Submitting,
    Streaming,
    Success,
    Error,
}

/// Status of the single in-flight request a panel may have.
///
/// `Idle -> Submitting -> (Streaming ->) Success | Error`. Settled turns may
/// start a new submission directly or be cleared back to `Idle`.
#[derive(Clone, Debug, Default)]
pub struct Turn {
    status: TurnStatus,
}

impl Turn {
    pub fn status(&self) -> TurnStatus {
        return self.status;
    }

    pub fn is_busy(&self) -> bool {
        return matches!(self.status, TurnStatus::Submitting | TurnStatus::Streaming);
    }

    pub fn begin(&mut self) -> Result<(), ClientError> {
        if self.is_busy() {
            return Err(ClientError::Busy);
        }

        self.status = TurnStatus::Submitting;
        return Ok(());
    }

    /// Returns false when there is no in-flight turn to move forward.
    pub fn stream(&mut self) -> bool {
        if !self.is_busy() {
            return false;
        }

        self.status = TurnStatus::Streaming;
        return true;
    }

    pub fn succeed(&mut self) -> bool {
        return self.settle(TurnStatus::Success);
    }

    pub fn fail(&mut self) -> bool {
        return self.settle(TurnStatus::Error);
    }

    pub fn clear(&mut self) {
        if !self.is_busy() {
            self.status = TurnStatus::Idle;
        }
    }

    fn settle(&mut self, status: TurnStatus) -> bool {
        if !self.is_busy() {
            return false;
        }

        self.status = status;
        return true;
    }
}
