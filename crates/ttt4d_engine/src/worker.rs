// Background search thread, polled without blocking
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use log::{debug, error};

use crate::protocol::{run_ai, ProtocolError, SearchRequest, SearchResponse};

/// Owns one search thread. Requests go in as encoded bytes and responses
/// come back the same way, so the caller never shares a board with it.
pub struct SearchWorker {
    requests: Option<Sender<Vec<u8>>>,
    responses: Receiver<Result<Vec<u8>, ProtocolError>>,
    handle: Option<JoinHandle<()>>,
}

impl SearchWorker {
    pub fn spawn() -> Result<Self, ProtocolError> {
        let (request_tx, request_rx) = mpsc::channel::<Vec<u8>>();
        let (response_tx, response_rx) = mpsc::channel();

        let handle = thread::Builder::new()
            .name("search-worker".to_string())
            .spawn(move || {
                // Exits once the worker is dropped
                for payload in request_rx {
                    if response_tx.send(run_ai(&payload)).is_err() {
                        break;
                    }
                }
                debug!("search worker shutting down");
            })?;

        Ok(Self {
            requests: Some(request_tx),
            responses: response_rx,
            handle: Some(handle),
        })
    }

    pub fn dispatch(&self, request: &SearchRequest) -> Result<(), ProtocolError> {
        let payload = request.encode()?;
        let sender = self.requests.as_ref().ok_or(ProtocolError::Disconnected)?;
        sender.send(payload).map_err(|_| ProtocolError::Disconnected)?;
        debug!("dispatched search request {}", request.generation);
        Ok(())
    }

    /// Returns the next finished response, if any, without waiting.
    pub fn try_recv(&self) -> Result<Option<SearchResponse>, ProtocolError> {
        match self.responses.try_recv() {
            Ok(result) => SearchResponse::decode(&result?).map(Some),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(ProtocolError::Disconnected),
        }
    }

    /// Blocks until the next response arrives.
    pub fn recv(&self) -> Result<SearchResponse, ProtocolError> {
        let result = self.responses.recv().map_err(|_| ProtocolError::Disconnected)?;
        SearchResponse::decode(&result?)
    }
}

impl Drop for SearchWorker {
    fn drop(&mut self) {
        // Closing the request channel ends the thread's loop
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("search worker panicked");
            }
        }
    }
}
