//! Running steps off the caller's thread
//!
//! A [`StepDispatcher`] owns one worker thread and keeps at most one step in
//! flight. A frame that arrives while the previous step is still running is
//! refused with [`DispatchError::Busy`] and should be dropped by the caller,
//! not queued. Responses therefore come back in request order.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use thiserror::Error;
use tracing::debug;

use crate::protocol::{ProtocolError, StepRequest, StepResponse};

type StepOutcome = Result<StepResponse, ProtocolError>;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("a step is already in flight")]
    Busy,

    #[error("no step is in flight")]
    Idle,

    #[error("step worker has stopped")]
    Disconnected,

    #[error("step request rejected: {0}")]
    Rejected(#[from] ProtocolError),

    #[error("failed to start step worker: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Request/response handle to a background step worker
///
/// # Examples
///
/// ```
/// use bodysim::dispatch::{DispatchError, StepDispatcher};
/// use bodysim::protocol::{BodyRecord, StepRequest};
///
/// let mut dispatcher = StepDispatcher::spawn().unwrap();
/// let request = StepRequest {
///     bodies: vec![BodyRecord { x_vel: 1.0, ..Default::default() }],
///     config: Default::default(),
/// };
///
/// dispatcher.submit(request.clone()).unwrap();
/// assert!(matches!(dispatcher.submit(request), Err(DispatchError::Busy)));
///
/// let response = dispatcher.recv().unwrap();
/// assert_eq!(response.bodies[0].x_pos, 1.0);
/// assert!(!dispatcher.is_busy());
/// ```
pub struct StepDispatcher {
    requests: Option<Sender<StepRequest>>,
    responses: Receiver<StepOutcome>,
    worker: Option<JoinHandle<()>>,
    in_flight: bool,
}

impl StepDispatcher {
    pub fn spawn() -> Result<Self, DispatchError> {
        let (request_tx, request_rx) = mpsc::channel::<StepRequest>();
        let (response_tx, response_rx) = mpsc::channel::<StepOutcome>();

        let worker = thread::Builder::new()
            .name("step-worker".to_string())
            .spawn(move || run_worker(request_rx, response_tx))?;

        Ok(Self {
            requests: Some(request_tx),
            responses: response_rx,
            worker: Some(worker),
            in_flight: false,
        })
    }

    /// Whether a submitted step has not been collected yet
    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// Hands a step to the worker unless one is already in flight
    pub fn submit(&mut self, request: StepRequest) -> Result<(), DispatchError> {
        if self.in_flight {
            debug!("step in flight, dropping frame");
            return Err(DispatchError::Busy);
        }

        self.requests
            .as_ref()
            .ok_or(DispatchError::Disconnected)?
            .send(request)
            .map_err(|_| DispatchError::Disconnected)?;

        self.in_flight = true;
        Ok(())
    }

    /// Collects the pending response if it is ready
    pub fn try_recv(&mut self) -> Result<Option<StepResponse>, DispatchError> {
        if !self.in_flight {
            return Ok(None);
        }

        match self.responses.try_recv() {
            Ok(outcome) => {
                self.in_flight = false;
                Ok(Some(outcome?))
            }
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => {
                self.in_flight = false;
                Err(DispatchError::Disconnected)
            }
        }
    }

    /// Waits for the pending response
    pub fn recv(&mut self) -> Result<StepResponse, DispatchError> {
        if !self.in_flight {
            return Err(DispatchError::Idle);
        }

        let outcome = self.responses.recv().map_err(|_| DispatchError::Disconnected);
        self.in_flight = false;
        Ok(outcome??)
    }
}

impl Drop for StepDispatcher {
    fn drop(&mut self) {
        // Closing the request channel ends the worker loop
        self.requests.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn run_worker(requests: Receiver<StepRequest>, responses: Sender<StepOutcome>) {
    debug!("step worker started");

    for request in requests {
        if responses.send(request.run()).is_err() {
            break;
        }
    }

    debug!("step worker stopped");
}
