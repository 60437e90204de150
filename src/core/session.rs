//! Session state owned by the controller driving conversions.
//!
//! A session moves between `Idle`, `Fetching`, `Ready` and `Failed`. Every fetch is
//! tagged with an increasing sequence number, and an outcome older than the one
//! already applied is dropped, so a slow stale fetch can never overwrite newer rates.

use crate::core::convert::{Conversion, ConversionRequest, convert};
use crate::core::error::ConversionError;
use crate::core::parser::{ParseReport, parse_rate_table};
use crate::core::rates::RateMatrix;
use crate::core::source::RateSheetProvider;
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    Fetching,
    Ready {
        matrix: RateMatrix,
        fetched_at: DateTime<Utc>,
    },
    Failed(ConversionError),
}

/// Handed out by [`Session::begin_fetch`] and returned with the fetch outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

#[derive(Debug)]
pub struct Session {
    state: SessionState,
    issued: u64,
    applied: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            issued: 0,
            applied: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn matrix(&self) -> Option<&RateMatrix> {
        match &self.state {
            SessionState::Ready { matrix, .. } => Some(matrix),
            _ => None,
        }
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        match &self.state {
            SessionState::Ready { fetched_at, .. } => Some(*fetched_at),
            _ => None,
        }
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        self.state = SessionState::Fetching;
        debug!(sequence = self.issued, "Fetch started");
        FetchTicket(self.issued)
    }

    /// Applies a fetch outcome. Returns `false` if the ticket is older than the
    /// outcome currently applied and the outcome was dropped.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<RateMatrix, ConversionError>,
    ) -> bool {
        if ticket.0 <= self.applied {
            warn!(
                sequence = ticket.0,
                applied = self.applied,
                "Dropping stale fetch result"
            );
            return false;
        }

        self.applied = ticket.0;
        self.state = match outcome {
            Ok(matrix) => SessionState::Ready {
                matrix,
                fetched_at: Utc::now(),
            },
            Err(e) => SessionState::Failed(e),
        };
        debug!(sequence = ticket.0, "Fetch result applied");
        true
    }

    /// Replaces the current rates with their reciprocals so conversions run the
    /// other way. Zero rates are dropped and returned.
    pub fn swap_direction(&mut self) -> Result<Vec<ConversionError>, ConversionError> {
        match &mut self.state {
            SessionState::Ready { matrix, .. } => {
                let inversion = matrix.invert();
                *matrix = inversion.matrix;
                Ok(inversion.anomalies)
            }
            SessionState::Failed(e) => Err(e.clone()),
            SessionState::Idle | SessionState::Fetching => Err(ConversionError::RatesNotLoaded),
        }
    }

    pub fn convert(&self, request: &ConversionRequest) -> Result<Conversion, ConversionError> {
        match &self.state {
            SessionState::Ready { matrix, .. } => convert(matrix, request),
            SessionState::Failed(e) => Err(e.clone()),
            SessionState::Idle | SessionState::Fetching => Err(ConversionError::RatesNotLoaded),
        }
    }
}

/// Runs one fetch and parse cycle and applies it to `session`.
///
/// A provider error becomes [`ConversionError::TransportFailure`]. On success the
/// parse report is returned for diagnostics.
#[instrument(name = "RateSheetLoad", skip(session, provider))]
pub async fn load(
    session: &mut Session,
    provider: &dyn RateSheetProvider,
    table_class: &str,
) -> Result<ParseReport, ConversionError> {
    let ticket = session.begin_fetch();

    let parsed = match provider.fetch_html().await {
        Ok(html) => parse_rate_table(&html, table_class),
        Err(e) => Err(ConversionError::TransportFailure(format!("{e:#}"))),
    };

    match parsed {
        Ok(table) => {
            info!(
                currencies = table.matrix.from_currencies().len(),
                rates = table.matrix.len(),
                "Loaded exchange rates"
            );
            session.complete(ticket, Ok(table.matrix));
            Ok(table.report)
        }
        Err(e) => {
            session.complete(ticket, Err(e.clone()));
            Err(e)
        }
    }
}
