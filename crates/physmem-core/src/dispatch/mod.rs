// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Protocol boundary between an unprivileged caller and the provider.
//!
//! The host framework hands over a selector and two opaque byte buffers.
//! The dispatcher:
//! 1. Rejects unknown selectors
//! 2. Rejects missing or short buffers
//! 3. Copies the input into a working record it alone owns
//! 4. Runs the provider on the working record
//! 5. Writes the working record back, whatever the outcome
//!
//! The caller's buffer is read exactly once. Later changes to it by another
//! thread cannot affect a request that has already been validated.

use physmem_abi::{MmioRequest, RECORD_SIZE, Selector, Status};

use crate::provider::MmioProvider;


/// Result of one protocol call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Status for the caller.
    pub status: Status,
    /// Bytes written to the output buffer: `RECORD_SIZE` once the pipeline
    /// ran, zero if the call was rejected before it.
    pub bytes_written: usize,
}

impl DispatchOutcome {
    const fn rejected() -> Self {
        Self {
            status: Status::InvalidArgument,
            bytes_written: 0,
        }
    }
}

/// Something that answers protocol calls.
pub trait ProtocolClient {
    /// Handle a call with separate input and output buffers.
    fn dispatch(
        &self,
        selector: u32,
        input: Option<&[u8]>,
        output: Option<&mut [u8]>,
    ) -> DispatchOutcome;

    /// Handle a call where one buffer is both input and output.
    fn dispatch_in_place(&self, selector: u32, buffer: Option<&mut [u8]>) -> DispatchOutcome;
}

/// Per-connection client bound to a provider.
#[derive(Debug)]
pub struct UserClient<'p, P: ?Sized> {
    provider: &'p P,
}

impl<'p, P: MmioProvider + ?Sized> UserClient<'p, P> {
    /// Bind a client to `provider`.
    #[must_use]
    pub const fn new(provider: &'p P) -> Self {
        Self { provider }
    }

    /// Run the provider on `working` and write it back to `output`.
    ///
    /// `output` must already be known to hold `RECORD_SIZE` bytes.
    fn complete(&self, mut working: MmioRequest, output: &mut [u8]) -> DispatchOutcome {
        let status = match self.provider.perform(&mut working) {
            Ok(()) => Status::Success,
            Err(err) => {
                tracing::debug!(%err, "mmio request failed");
                err.status()
            }
        };
        let bytes_written = working.encode_into(output).unwrap_or(0);
        DispatchOutcome {
            status,
            bytes_written,
        }
    }
}

fn selector_known(selector: u32) -> bool {
    match Selector::from_u32(selector) {
        Some(Selector::MmioAccess) => true,
        None => {
            tracing::debug!(selector, "unknown selector rejected");
            false
        }
    }
}

impl<P: MmioProvider + ?Sized> ProtocolClient for UserClient<'_, P> {
    fn dispatch(
        &self,
        selector: u32,
        input: Option<&[u8]>,
        output: Option<&mut [u8]>,
    ) -> DispatchOutcome {
        if !selector_known(selector) {
            return DispatchOutcome::rejected();
        }

        let Some(working) = input.and_then(MmioRequest::decode) else {
            tracing::debug!(len = input.map_or(0, <[u8]>::len), "input buffer rejected");
            return DispatchOutcome::rejected();
        };
        let Some(output) = output.filter(|out| out.len() >= RECORD_SIZE) else {
            tracing::debug!("output buffer rejected");
            return DispatchOutcome::rejected();
        };

        self.complete(working, output)
    }

    fn dispatch_in_place(&self, selector: u32, buffer: Option<&mut [u8]>) -> DispatchOutcome {
        if !selector_known(selector) {
            return DispatchOutcome::rejected();
        }

        let Some(buffer) = buffer else {
            tracing::debug!("buffer missing");
            return DispatchOutcome::rejected();
        };
        let Some(working) = MmioRequest::decode(buffer) else {
            tracing::debug!(len = buffer.len(), "buffer rejected");
            return DispatchOutcome::rejected();
        };

        self.complete(working, buffer)
    }
}
