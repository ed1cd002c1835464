//! Request lifecycle for one user session: loading state, last error, canvas.

use crate::canvas::SpriteCanvas;
use crate::client::{GenerationResult, SpriteClient};
use crate::error::SpriteError;
use crate::options::GenerationOptions;

/// Identifies one request. Results carrying an older ticket are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// Snapshot of what the front end should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// A request is pending.
    pub is_loading: bool,
    /// Message of the last failure, if the last request failed.
    pub error: Option<String>,
    /// The canvas holds a sprite.
    pub has_image: bool,
}

/// Drives at most one generation at a time and keeps only the newest result.
pub struct SpriteSession {
    client: SpriteClient,
    canvas: SpriteCanvas,
    current: u64,
    pending: bool,
    error: Option<String>,
}

impl SpriteSession {
    /// A fresh session with an empty canvas.
    #[must_use]
    pub fn new(client: SpriteClient) -> Self {
        Self { client, canvas: SpriteCanvas::new(), current: 0, pending: false, error: None }
    }

    /// Start a request: drop the previous image and error and hand out a ticket.
    ///
    /// # Errors
    ///
    /// Returns [`SpriteError::Busy`] while another request is pending.
    pub fn begin(&mut self) -> Result<RequestTicket, SpriteError> {
        if self.pending {
            return Err(SpriteError::Busy);
        }
        self.current += 1;
        self.pending = true;
        self.error = None;
        self.canvas.clear();
        Ok(RequestTicket(self.current))
    }

    /// Apply the outcome of the request identified by `ticket`.
    ///
    /// Returns `Ok(false)` and changes nothing when the ticket is stale,
    /// `Ok(true)` once the sprite is drawn.
    ///
    /// # Errors
    ///
    /// Returns the request's failure, or a decode failure while drawing,
    /// after recording its message and emptying the canvas.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        result: GenerationResult,
    ) -> Result<bool, SpriteError> {
        if ticket.0 != self.current || !self.pending {
            log::debug!("Discarding stale result for request {}", ticket.0);
            return Ok(false);
        }
        self.pending = false;

        match result.and_then(|uri| self.canvas.draw(&uri)) {
            Ok(()) => {
                self.error = None;
                Ok(true)
            }
            Err(e) => {
                self.canvas.clear();
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Run one full request: begin, call the model, draw or record the error.
    ///
    /// # Errors
    ///
    /// Returns the generation failure, a decode failure, or
    /// [`SpriteError::Busy`].
    pub async fn generate(&mut self, options: &GenerationOptions) -> Result<(), SpriteError> {
        let ticket = self.begin()?;
        let result = self.client.generate_sprite(options).await;
        self.complete(ticket, result).map(|_| ())
    }

    /// Discard the current image and error; any pending result becomes stale.
    pub fn clear(&mut self) {
        self.current += 1;
        self.pending = false;
        self.error = None;
        self.canvas.clear();
    }

    /// Current view state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        SessionState {
            is_loading: self.pending,
            error: self.error.clone(),
            has_image: !self.canvas.is_empty(),
        }
    }

    /// The canvas holding the latest sprite.
    #[must_use]
    pub fn canvas(&self) -> &SpriteCanvas {
        &self.canvas
    }
}
