use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info};

/// Coordinates graceful shutdown between the OS signal listener, the HTTP server,
/// and any background cleanup.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    tx: broadcast::Sender<()>,
    shutdown_initiated: Arc<AtomicBool>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            tx,
            shutdown_initiated: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Subscribe to shutdown notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown_initiated.load(Ordering::SeqCst)
    }

    /// Initiate shutdown and notify all subscribers. Only the first call has any effect.
    pub fn shutdown(&self) {
        if self
            .shutdown_initiated
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            info!("Initiating graceful shutdown");
            let _ = self.tx.send(());
        }
    }

    /// Resolve once [`shutdown`](Self::shutdown) has been called, even if it happened earlier.
    pub async fn wait_for_shutdown(&self) {
        let mut rx = self.subscribe();
        if self.is_shutting_down() {
            return;
        }
        let _ = rx.recv().await;
    }

    /// Wait for SIGTERM or SIGINT, then initiate shutdown.
    pub async fn wait_for_signal(&self) {
        let ctrl_c = async {
            if let Err(e) = signal::ctrl_c().await {
                error!(error = %e, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    sigterm.recv().await;
                }
                Err(e) => {
                    error!(error = %e, "failed to install SIGTERM handler");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
            },
            _ = terminate => {
                info!("Received SIGTERM, initiating graceful shutdown");
            },
        }

        self.shutdown();
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_shutdown_notifies_waiters() {
        let coordinator = ShutdownCoordinator::new();
        let waiter = coordinator.clone();
        let handle = tokio::spawn(async move { waiter.wait_for_shutdown().await });

        tokio::time::sleep(Duration::from_millis(10)).await;
        coordinator.shutdown();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("waiter should resolve")
            .unwrap();
        assert!(coordinator.is_shutting_down());
    }

    #[tokio::test]
    async fn test_wait_after_shutdown_returns_immediately() {
        let coordinator = ShutdownCoordinator::new();
        coordinator.shutdown();
        coordinator.shutdown();

        tokio::time::timeout(Duration::from_millis(100), coordinator.wait_for_shutdown())
            .await
            .expect("already shut down");
    }
}
