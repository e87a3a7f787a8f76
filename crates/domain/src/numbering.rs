// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::ticket::Ticket;

/// The number given to the first ticket in an empty shop.
pub const FIRST_TICKET_NUMBER: u32 = 1001;

/// Computes the number for the next ticket.
///
/// Returns one more than the highest existing number, or
/// [`FIRST_TICKET_NUMBER`] when there are no tickets. Gaps left by deleted
/// tickets are never reused unless the highest ticket itself was deleted.
///
/// This is a linear scan. It assumes a single writer.
///
/// # Errors
///
/// Returns [`DomainError::TicketNumbersExhausted`] when the highest number
/// is already `u32::MAX`.
pub fn next_ticket_number(tickets: &[Ticket]) -> Result<u32, DomainError> {
    tickets
        .iter()
        .map(|ticket| ticket.ticket_number)
        .max()
        .map_or(Ok(FIRST_TICKET_NUMBER), |highest| {
            highest
                .checked_add(1)
                .ok_or(DomainError::TicketNumbersExhausted { highest })
        })
}
