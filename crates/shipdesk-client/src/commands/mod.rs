//! Command handlers invoked by the UI layer.
//!
//! Every handler takes the [`SharedState`] and returns `Result<_, String>`
//! where the error is the text shown to the user.

pub mod options;
pub mod photos;
pub mod wizard;

use shipdesk_wizard::{Prepared, StepForm};

use crate::events::WizardEvent;
use crate::state::{lock, SharedState};

/// Submit `form` for the wizard's current step.
///
/// The state lock is released while the request is in flight, so the user
/// can still navigate away, which aborts the request.
pub(crate) async fn run_step<F: StepForm>(
    state: &SharedState,
    form: F,
) -> Result<WizardEvent, String> {
    let (ticket, api) = {
        let mut guard = lock(state)?;
        let prepared = guard
            .wizard_mut()?
            .begin_submit(&form)
            .map_err(|e| e.user_message())?;

        match prepared {
            Prepared::Unchanged(transition) => {
                let event = WizardEvent::from_transition(&transition);
                guard.emit(event.clone());
                return Ok(event);
            }
            Prepared::Ready(ticket) => match guard.api() {
                Ok(api) => (ticket, api),
                Err(e) => {
                    guard.wizard_mut()?.abandon_submit(ticket);
                    return Err(e.user_message());
                }
            },
        }
    };

    let outcome = ticket.run(api.as_ref(), &form).await;

    let mut guard = lock(state)?;
    let transition = guard
        .wizard_mut()?
        .finish_submit(ticket, outcome)
        .map_err(|e| e.user_message())?;

    let event = WizardEvent::from_transition(&transition);
    guard.emit(event.clone());
    Ok(event)
}
