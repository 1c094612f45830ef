use std::{future::Future, time::Duration};

use tokio_util::sync::CancellationToken;

use crate::{
    Result,
    model::{QrCodeLoginStatus, QrCodePollResult},
    service::BilibiliService,
};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
pub const DEFAULT_MAX_ATTEMPTS: u32 = 60;

/// What one poll attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollUpdate {
    Status(QrCodePollResult),
    /// The attempt failed; polling continues.
    Transient(String),
}

impl PollUpdate {
    /// Short text for display next to the QR image.
    pub fn message(&self) -> String {
        match self {
            Self::Status(result) => match result.status {
                QrCodeLoginStatus::Ready => "Waiting for scan".to_string(),
                QrCodeLoginStatus::Scanned => "Scanned, waiting for confirmation".to_string(),
                QrCodeLoginStatus::Success => "Login successful".to_string(),
                QrCodeLoginStatus::Expired => "QR code expired".to_string(),
                QrCodeLoginStatus::Failed => format!("Login failed: {}", result.status_message),
            },
            Self::Transient(reason) => format!("Polling failed: {reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// A terminal status was reached.
    Completed(QrCodePollResult),
    TimedOut,
    Cancelled,
}

/// Polls QR login status at a fixed interval until a terminal status, the
/// attempt limit, or cancellation.
#[derive(Debug, Clone, Copy)]
pub struct QrLoginPoller {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for QrLoginPoller {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl QrLoginPoller {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }

    /// Drive `poll` until done. `on_update` sees every attempt, numbered from 1.
    pub async fn run<F, Fut, U>(
        &self,
        mut poll: F,
        cancel: &CancellationToken,
        mut on_update: U,
    ) -> PollOutcome
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<QrCodePollResult>>,
        U: FnMut(u32, &PollUpdate),
    {
        for attempt in 1..=self.max_attempts {
            if cancel.is_cancelled() {
                return PollOutcome::Cancelled;
            }

            let update = match poll().await {
                Ok(result) => PollUpdate::Status(result),
                Err(e) => {
                    tracing::warn!(attempt, "QR login poll failed: {}", e);
                    PollUpdate::Transient(e.to_string())
                }
            };
            on_update(attempt, &update);

            if let PollUpdate::Status(result) = update {
                if result.status.is_terminal() {
                    tracing::debug!(attempt, status = ?result.status, "QR login finished");
                    return PollOutcome::Completed(result);
                }
            }

            if attempt < self.max_attempts {
                tokio::select! {
                    _ = cancel.cancelled() => return PollOutcome::Cancelled,
                    _ = tokio::time::sleep(self.interval) => {}
                }
            }
        }

        PollOutcome::TimedOut
    }

    /// Poll `qr_code_key` through `service`.
    pub async fn poll_service<U>(
        &self,
        service: &BilibiliService,
        qr_code_key: &str,
        cancel: &CancellationToken,
        on_update: U,
    ) -> PollOutcome
    where
        U: FnMut(u32, &PollUpdate),
    {
        self.run(
            || service.poll_login_qr_code_status(qr_code_key),
            cancel,
            on_update,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::collections::VecDeque;

    fn status(status: QrCodeLoginStatus) -> Result<QrCodePollResult> {
        Ok(QrCodePollResult {
            status,
            status_message: String::new(),
            refresh_token: None,
        })
    }

    fn poller(max_attempts: u32) -> QrLoginPoller {
        QrLoginPoller::new(Duration::from_millis(1), max_attempts)
    }

    #[test]
    fn test_defaults() {
        let poller = QrLoginPoller::default();
        assert_eq!(poller.interval, Duration::from_secs(2));
        assert_eq!(poller.max_attempts, 60);
    }

    #[tokio::test]
    async fn test_stops_on_success() {
        let mut script = VecDeque::from([
            status(QrCodeLoginStatus::Ready),
            Err(Error::Timeout("https://passport.bilibili.com".to_string())),
            status(QrCodeLoginStatus::Scanned),
            status(QrCodeLoginStatus::Success),
            status(QrCodeLoginStatus::Ready),
        ]);
        let mut updates = Vec::new();

        let outcome = poller(10)
            .run(
                || {
                    let next = script.pop_front().unwrap();
                    async move { next }
                },
                &CancellationToken::new(),
                |attempt, update| updates.push((attempt, update.clone())),
            )
            .await;

        match outcome {
            PollOutcome::Completed(result) => assert_eq!(result.status, QrCodeLoginStatus::Success),
            other => panic!("unexpected: {other:?}"),
        }
        assert_eq!(updates.len(), 4);
        assert!(matches!(updates[1], (2, PollUpdate::Transient(_))));
        assert_eq!(updates[2].1.message(), "Scanned, waiting for confirmation");
    }

    #[tokio::test]
    async fn test_expired_is_terminal() {
        let outcome = poller(10)
            .run(
                || async { status(QrCodeLoginStatus::Expired) },
                &CancellationToken::new(),
                |_, _| {},
            )
            .await;
        assert!(matches!(outcome, PollOutcome::Completed(r) if r.status == QrCodeLoginStatus::Expired));
    }

    #[tokio::test]
    async fn test_times_out() {
        let mut calls = 0;
        let outcome = poller(3)
            .run(
                || {
                    calls += 1;
                    async { status(QrCodeLoginStatus::Ready) }
                },
                &CancellationToken::new(),
                |_, _| {},
            )
            .await;
        assert_eq!(outcome, PollOutcome::TimedOut);
        assert_eq!(calls, 3);
    }

    #[tokio::test]
    async fn test_cancelled() {
        let cancel = CancellationToken::new();
        let outcome = QrLoginPoller::new(Duration::from_secs(60), 5)
            .run(
                || async { status(QrCodeLoginStatus::Ready) },
                &cancel,
                |_, _| cancel.cancel(),
            )
            .await;
        assert_eq!(outcome, PollOutcome::Cancelled);
    }
}
