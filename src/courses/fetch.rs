use std::future::Future;

use tokio_util::sync::CancellationToken;

/// Hands out tickets for list fetches. Only the most recent ticket is
/// current; issuing a new one cancels the one before it.
#[derive(Debug, Default)]
pub struct FetchGuard {
    generation: u64,
    token: Option<CancellationToken>,
}

#[derive(Debug, Clone)]
pub struct FetchTicket {
    generation: u64,
    token: CancellationToken,
}

/// Result of running a fetch under a ticket.
#[derive(Debug)]
pub enum Fetched<T> {
    Done(T),
    Superseded,
}

impl FetchGuard {
    pub fn issue(&mut self) -> FetchTicket {
        self.cancel();
        self.generation += 1;
        let token = CancellationToken::new();
        self.token = Some(token.clone());
        FetchTicket {
            generation: self.generation,
            token,
        }
    }

    pub fn cancel(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
        }
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation && !ticket.token.is_cancelled()
    }
}

impl FetchTicket {
    /// Drives `request` until it completes or the ticket is superseded.
    pub async fn run<T>(&self, request: impl Future<Output = T>) -> Fetched<T> {
        tokio::select! {
            biased;
            () = self.token.cancelled() => Fetched::Superseded,
            value = request => Fetched::Done(value),
        }
    }
}
