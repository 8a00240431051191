//! The wizard state machine.
//!
//! [`Wizard`] owns the current step, the in-memory draft and the
//! cancellation scope of the active step. The Local Draft Store is written
//! only after a confirmed server response, so it always reflects the last
//! confirmed state and never an in-flight one.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use shipdesk_api::{ApiError, ShipmentService};
use shipdesk_shared::{DraftShipment, ServiceType, ShipmentId};
use shipdesk_store::{DraftState, DraftStore};

use crate::error::WizardError;
use crate::step::{Transition, WizardStep};
use crate::steps::StepForm;

pub struct Wizard<S> {
    state: DraftState<S>,
    step: WizardStep,
    draft: DraftShipment,
    submitting: bool,
    scope: CancellationToken,
    // Bumped whenever the scope is replaced; ties a ticket to its scope.
    epoch: u64,
}

/// Result of [`Wizard::begin_submit`].
#[derive(Debug)]
pub enum Prepared {
    /// The step was already confirmed with the same values; the wizard moved
    /// on without a request.
    Unchanged(Transition),
    /// A request must be sent with this ticket.
    Ready(SubmitTicket),
}

/// One in-flight step submission.
///
/// Holds a snapshot of the draft and the step's cancellation token, so the
/// request can run while the wizard itself is not borrowed.
#[derive(Debug)]
pub struct SubmitTicket {
    step: WizardStep,
    epoch: u64,
    token: CancellationToken,
    draft: DraftShipment,
}

impl SubmitTicket {
    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Send the form's request, aborting if the step is left meanwhile.
    pub async fn run<F: StepForm>(
        &self,
        api: &dyn ShipmentService,
        form: &F,
    ) -> Result<DraftShipment, WizardError> {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => {
                debug!(step = self.step.number(), "step request aborted");
                Err(WizardError::Cancelled)
            }
            result = form.send(api, &self.draft) => result,
        }
    }
}

impl<S: DraftStore> Wizard<S> {
    fn with(state: DraftState<S>, step: WizardStep, draft: DraftShipment) -> Self {
        Self {
            state,
            step,
            draft,
            submitting: false,
            scope: CancellationToken::new(),
            epoch: 0,
        }
    }

    /// New shipment of `service_type`, starting at the first step.
    pub fn start(state: DraftState<S>, service_type: ServiceType) -> Result<Self, WizardError> {
        let draft = DraftShipment::new(service_type);
        state.save_draft(&draft)?;
        state.save_step(WizardStep::FIRST.number())?;

        info!(service_type = %draft.service_type, "shipment wizard started");
        Ok(Self::with(state, WizardStep::FIRST, draft))
    }

    /// Pick up where the store left off, e.g. after a reload.
    pub fn restore(state: DraftState<S>) -> Result<Self, WizardError> {
        let draft = state.load_draft()?.ok_or(WizardError::NoDraft)?;
        let step = state
            .load_step()?
            .and_then(WizardStep::from_number)
            .unwrap_or(WizardStep::FIRST);

        info!(
            step = step.number(),
            shipment_id = ?draft.id,
            "shipment wizard restored"
        );
        Ok(Self::with(state, step, draft))
    }

    /// Edit an existing shipment. Always restarts at the first step; only the
    /// field values are carried over.
    pub async fn edit(
        state: DraftState<S>,
        api: &dyn ShipmentService,
        id: &ShipmentId,
    ) -> Result<Self, WizardError> {
        let shipments = api.list_shipments().await?;
        let draft = shipments
            .into_iter()
            .find(|s| s.id.as_ref() == Some(id))
            .ok_or_else(|| WizardError::ShipmentNotFound(id.clone()))?;

        state.save_draft(&draft)?;
        state.save_step(WizardStep::FIRST.number())?;

        info!(shipment_id = %id, "editing shipment");
        Ok(Self::with(state, WizardStep::FIRST, draft))
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &DraftShipment {
        &self.draft
    }

    pub fn state(&self) -> &DraftState<S> {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Token cancelled as soon as the current step is left.
    pub fn abort_handle(&self) -> CancellationToken {
        self.scope.clone()
    }

    pub fn advance(&mut self) -> Result<Transition, WizardError> {
        match self.step.next() {
            Some(next) => {
                self.enter(next)?;
                Ok(Transition::Moved(next))
            }
            None => {
                self.reset_scope();
                info!(shipment_id = ?self.draft.id, "shipment wizard complete");
                Ok(Transition::Completed(self.draft.id.clone()))
            }
        }
    }

    pub fn retreat(&mut self) -> Result<Transition, WizardError> {
        match self.step.previous() {
            Some(previous) => {
                self.enter(previous)?;
                Ok(Transition::Moved(previous))
            }
            None => {
                self.reset_scope();
                debug!("leaving shipment wizard");
                Ok(Transition::LeaveWizard)
            }
        }
    }

    /// Move on without validating or submitting the current step. Fields the
    /// step would have set keep whatever value they had.
    pub fn skip(&mut self) -> Result<Transition, WizardError> {
        info!(step = self.step.number(), skipped = true, "step skipped");
        match self.advance()? {
            Transition::Moved(step) => Ok(Transition::Skipped(step)),
            other => Ok(other),
        }
    }

    /// Validate `form` and decide whether a request is needed.
    ///
    /// On `Ready`, the wizard is marked as submitting until
    /// [`Wizard::finish_submit`] is called or the step is left.
    pub fn begin_submit<F: StepForm>(&mut self, form: &F) -> Result<Prepared, WizardError> {
        if F::STEP != self.step {
            return Err(WizardError::WrongStep {
                current: self.step,
                form: F::STEP,
            });
        }
        if self.submitting {
            return Err(WizardError::AlreadySubmitting);
        }

        form.validate(&self.draft)?;

        if form.is_confirmed(&self.draft) {
            debug!(step = self.step.number(), "step unchanged, continuing");
            return self.advance().map(Prepared::Unchanged);
        }

        if self.step != WizardStep::Details && self.draft.id.is_none() {
            return Err(WizardError::MissingShipmentId);
        }

        // aborted through the handle without leaving the step
        if self.scope.is_cancelled() {
            self.reset_scope();
        }

        self.submitting = true;
        Ok(Prepared::Ready(SubmitTicket {
            step: self.step,
            epoch: self.epoch,
            token: self.scope.clone(),
            draft: self.draft.clone(),
        }))
    }

    /// Apply the outcome of a ticket's request.
    ///
    /// Outcomes of a step that has since been left are discarded. On success
    /// the server draft replaces the stored one wholesale and the wizard
    /// advances; on failure nothing changes and the step stays active.
    pub fn finish_submit(
        &mut self,
        ticket: SubmitTicket,
        outcome: Result<DraftShipment, WizardError>,
    ) -> Result<Transition, WizardError> {
        let current = ticket.epoch == self.epoch && ticket.step == self.step;
        if current {
            self.submitting = false;
        }
        if !current || ticket.token.is_cancelled() {
            debug!(step = ticket.step.number(), "discarding outcome of abandoned step");
            return Err(WizardError::Cancelled);
        }

        let saved = match outcome {
            Ok(saved) => saved,
            Err(e) => {
                warn!(step = self.step.number(), error = %e, "step submission failed");
                return Err(e);
            }
        };

        match (&self.draft.id, &saved.id) {
            (_, None) => {
                return Err(ApiError::Decode("response carries no shipment id".into()).into());
            }
            (Some(expected), returned) if returned.as_ref() != Some(expected) => {
                return Err(WizardError::IdMismatch {
                    expected: expected.clone(),
                    returned: returned.clone(),
                });
            }
            _ => {}
        }

        self.state.save_draft(&saved)?;
        self.draft = saved;

        info!(
            step = self.step.number(),
            shipment_id = ?self.draft.id,
            "step confirmed"
        );
        self.advance()
    }

    /// Give up on a ticket that was never run, freeing the step for a retry.
    pub fn abandon_submit(&mut self, ticket: SubmitTicket) {
        if ticket.epoch == self.epoch && ticket.step == self.step {
            self.submitting = false;
        }
    }

    /// Validate, send and apply in one go.
    pub async fn submit<F: StepForm>(
        &mut self,
        api: &dyn ShipmentService,
        form: &F,
    ) -> Result<Transition, WizardError> {
        let ticket = match self.begin_submit(form)? {
            Prepared::Unchanged(transition) => return Ok(transition),
            Prepared::Ready(ticket) => ticket,
        };
        let outcome = ticket.run(api, form).await;
        self.finish_submit(ticket, outcome)
    }

    fn enter(&mut self, step: WizardStep) -> Result<(), WizardError> {
        self.state.save_step(step.number())?;
        self.reset_scope();
        debug!(from = self.step.number(), to = step.number(), "wizard step changed");
        self.step = step;
        Ok(())
    }

    // Abort whatever the step being left still has in flight.
    fn reset_scope(&mut self) {
        self.scope.cancel();
        self.scope = CancellationToken::new();
        self.epoch += 1;
        self.submitting = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::{Datelike, FixedOffset, NaiveDate, Timelike, Weekday};
    use shipdesk_api::mock::{MockCall, MockShipmentService};
    use shipdesk_shared::{AcquisitionMethod, PackageType, PhotoFile};
    use shipdesk_store::MemoryStore;

    use crate::steps::{DeliveryForm, DetailsForm, DimensionsForm, PhotosForm, PickupForm};

    type TestWizard = Wizard<Arc<MemoryStore>>;

    fn start(service_type: ServiceType) -> (TestWizard, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let wizard = Wizard::start(DraftState::new(store.clone()), service_type).unwrap();
        (wizard, store)
    }

    fn sea_details() -> DetailsForm {
        DetailsForm {
            package_type: Some(PackageType::Pallet),
            package_description: "Household goods, 3 boxes".into(),
            fragile: true,
        }
    }

    fn delivery() -> DeliveryForm {
        DeliveryForm {
            pickup_address: "1 Dock Rd, Felixstowe".into(),
            delivery_address: "9 Harbour St, Rotterdam".into(),
            recipient_name: "R. Jones".into(),
            recipient_phone: "+31 10 000 0000".into(),
        }
    }

    fn gallery_photo(name: &str) -> PhotoFile {
        PhotoFile::new(name, "image/jpeg", vec![0u8; 32], AcquisitionMethod::Gallery)
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn zone() -> FixedOffset {
        FixedOffset::east_opt(2 * 3600).unwrap()
    }

    async fn created(api: &MockShipmentService) -> TestWizard {
        let (mut wizard, _) = start(ServiceType::Seafreight);
        wizard.submit(api, &sea_details()).await.unwrap();
        wizard
    }

    #[test]
    fn test_navigation_bounds() {
        let (mut wizard, store) = start(ServiceType::Seafreight);
        assert_eq!(wizard.retreat().unwrap(), Transition::LeaveWizard);
        assert_eq!(wizard.step(), WizardStep::Details);

        for expected in 2..=5 {
            let t = wizard.skip().unwrap();
            assert_eq!(t, Transition::Skipped(WizardStep::from_number(expected).unwrap()));
        }
        assert_eq!(store.get("step").unwrap().as_deref(), Some("5"));

        assert_eq!(wizard.advance().unwrap(), Transition::Completed(None));
        assert_eq!(wizard.step(), WizardStep::Dimensions);

        assert_eq!(
            wizard.retreat().unwrap(),
            Transition::Moved(WizardStep::Pickup)
        );
        assert_eq!(store.get("step").unwrap().as_deref(), Some("4"));
    }

    #[tokio::test]
    async fn test_short_description_sends_nothing() {
        let api = MockShipmentService::new();
        let (mut wizard, store) = start(ServiceType::Seafreight);
        let before = store.get("shipment").unwrap();

        let form = DetailsForm {
            package_type: Some(PackageType::Pallet),
            package_description: "Boxes".into(),
            fragile: false,
        };
        let err = wizard.submit(&api, &form).await.unwrap_err();

        assert!(matches!(err, WizardError::Validation(_)));
        assert_eq!(api.call_count(), 0);
        assert_eq!(wizard.step(), WizardStep::Details);
        assert!(!wizard.is_submitting());
        assert_eq!(store.get("shipment").unwrap(), before);
    }

    #[tokio::test]
    async fn test_details_create_then_update() {
        let api = MockShipmentService::new();
        let (mut wizard, store) = start(ServiceType::Seafreight);

        let t = wizard.submit(&api, &sea_details()).await.unwrap();
        assert_eq!(t, Transition::Moved(WizardStep::Delivery));
        let id = wizard.draft().id.clone().unwrap();
        assert_eq!(store.get("step").unwrap().as_deref(), Some("2"));

        // stored draft is the server response, including fields we don't model
        let stored = wizard.state().load_draft().unwrap().unwrap();
        assert_eq!(stored.extra["status"], "draft");

        wizard.retreat().unwrap();
        let mut changed = sea_details();
        changed.fragile = false;
        wizard.submit(&api, &changed).await.unwrap();

        assert_eq!(wizard.draft().id.as_ref(), Some(&id));
        assert!(matches!(
            api.calls().last(),
            Some(MockCall::Update(updated, _)) if *updated == id
        ));
    }

    #[tokio::test]
    async fn test_unchanged_step_does_not_resubmit() {
        let api = MockShipmentService::new();
        let mut wizard = created(&api).await;
        assert_eq!(api.call_count(), 1);

        // back to step 1, form rebuilt from the draft, continue again
        wizard.retreat().unwrap();
        let form = DetailsForm::from_draft(wizard.draft());
        let t = wizard.submit(&api, &form).await.unwrap();

        assert_eq!(t, Transition::Moved(WizardStep::Delivery));
        assert_eq!(api.call_count(), 1);
    }

    #[tokio::test]
    async fn test_backend_failure_keeps_step_and_store() {
        let api = MockShipmentService::new();
        let mut wizard = created(&api).await;
        let before = wizard.state().load_draft().unwrap();

        api.fail_next(503);
        let err = wizard.submit(&api, &delivery()).await.unwrap_err();

        assert!(matches!(err, WizardError::Api(_)));
        assert!(err.user_message().contains("try again"));
        assert_eq!(wizard.step(), WizardStep::Delivery);
        assert!(!wizard.is_submitting());
        assert_eq!(wizard.state().load_draft().unwrap(), before);
        assert_eq!(wizard.state().load_step().unwrap(), Some(2));

        // the user resubmits the same form
        let t = wizard.submit(&api, &delivery()).await.unwrap();
        assert_eq!(t, Transition::Moved(WizardStep::Photos));
    }

    #[tokio::test]
    async fn test_later_steps_need_an_id() {
        let api = MockShipmentService::new();
        let (mut wizard, _) = start(ServiceType::Seafreight);
        wizard.skip().unwrap();

        let err = wizard.submit(&api, &delivery()).await.unwrap_err();
        assert!(matches!(err, WizardError::MissingShipmentId));
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_form_for_another_step_is_rejected() {
        let api = MockShipmentService::new();
        let (mut wizard, _) = start(ServiceType::Seafreight);

        let err = wizard.submit(&api, &delivery()).await.unwrap_err();
        assert!(matches!(
            err,
            WizardError::WrongStep {
                current: WizardStep::Details,
                form: WizardStep::Delivery
            }
        ));
    }

    #[tokio::test]
    async fn test_second_submission_while_in_flight_is_rejected() {
        let (mut wizard, _) = start(ServiceType::Seafreight);
        let form = sea_details();

        let ticket = match wizard.begin_submit(&form).unwrap() {
            Prepared::Ready(ticket) => ticket,
            other => panic!("unexpected {other:?}"),
        };
        assert!(wizard.is_submitting());
        assert!(matches!(
            wizard.begin_submit(&form),
            Err(WizardError::AlreadySubmitting)
        ));

        let api = MockShipmentService::new();
        let outcome = ticket.run(&api, &form).await;
        wizard.finish_submit(ticket, outcome).unwrap();
        assert!(!wizard.is_submitting());
    }

    #[tokio::test]
    async fn test_leaving_a_step_aborts_its_request() {
        let api = MockShipmentService::new();
        let mut wizard = created(&api).await;
        let form = delivery();
        let before = wizard.state().load_draft().unwrap();

        let ticket = match wizard.begin_submit(&form).unwrap() {
            Prepared::Ready(ticket) => ticket,
            other => panic!("unexpected {other:?}"),
        };

        api.hold();
        let abort = wizard.abort_handle();
        let (outcome, _) = tokio::join!(ticket.run(&api, &form), async {
            tokio::task::yield_now().await;
            abort.cancel();
        });
        api.release();

        assert!(matches!(outcome, Err(WizardError::Cancelled)));
        // the request did go out before it was abandoned
        assert_eq!(api.call_count(), 2);

        assert!(matches!(
            wizard.finish_submit(ticket, outcome),
            Err(WizardError::Cancelled)
        ));
        assert_eq!(wizard.state().load_draft().unwrap(), before);
    }

    #[tokio::test]
    async fn test_outcome_after_navigation_is_discarded() {
        let api = MockShipmentService::new();
        let mut wizard = created(&api).await;
        let form = delivery();

        let ticket = match wizard.begin_submit(&form).unwrap() {
            Prepared::Ready(ticket) => ticket,
            other => panic!("unexpected {other:?}"),
        };
        wizard.retreat().unwrap();
        assert!(!wizard.is_submitting());

        let outcome = ticket.run(&api, &form).await;
        assert!(matches!(outcome, Err(WizardError::Cancelled)));
        assert!(wizard.finish_submit(ticket, outcome).is_err());
        assert_eq!(wizard.step(), WizardStep::Details);
        assert!(wizard.draft().delivery.is_none());
        assert_eq!(api.call_count(), 1);
    }

    #[tokio::test]
    async fn test_step_can_be_retried_after_abort() {
        let api = MockShipmentService::new();
        let (mut wizard, _) = start(ServiceType::Seafreight);

        // the host aborts while staying on the step
        wizard.abort_handle().cancel();
        assert_eq!(wizard.step(), WizardStep::Details);

        let t = wizard.submit(&api, &sea_details()).await.unwrap();
        assert_eq!(t, Transition::Moved(WizardStep::Delivery));
        assert!(!wizard.is_submitting());
        assert_eq!(api.call_count(), 1);
    }

    #[tokio::test]
    async fn test_abort_during_request_allows_retry() {
        let api = MockShipmentService::new();
        let mut wizard = created(&api).await;
        let form = delivery();

        let ticket = match wizard.begin_submit(&form).unwrap() {
            Prepared::Ready(ticket) => ticket,
            other => panic!("unexpected {other:?}"),
        };
        wizard.abort_handle().cancel();
        let outcome = ticket.run(&api, &form).await;
        assert!(wizard.finish_submit(ticket, outcome).is_err());

        let t = wizard.submit(&api, &form).await.unwrap();
        assert_eq!(t, Transition::Moved(WizardStep::Photos));
    }

    #[test]
    fn test_abandoned_ticket_frees_the_step() {
        let (mut wizard, _) = start(ServiceType::Seafreight);
        let ticket = match wizard.begin_submit(&sea_details()).unwrap() {
            Prepared::Ready(ticket) => ticket,
            other => panic!("unexpected {other:?}"),
        };

        wizard.abandon_submit(ticket);
        assert!(!wizard.is_submitting());
        assert!(matches!(
            wizard.begin_submit(&sea_details()),
            Ok(Prepared::Ready(_))
        ));
    }

    #[tokio::test]
    async fn test_stored_values_are_revalidated_before_continuing() {
        // a server copy holding a package type sea freight does not offer
        let mut existing = DraftShipment::new(ServiceType::Seafreight);
        existing.id = Some(ShipmentId::new("shp-5"));
        existing.package_type = Some(PackageType::Parcel);
        existing.package_description = "Spare parts in a box".into();
        let api = MockShipmentService::with_shipments(vec![existing]);

        let mut wizard = Wizard::edit(
            DraftState::new(Arc::new(MemoryStore::new())),
            &api,
            &ShipmentId::new("shp-5"),
        )
        .await
        .unwrap();
        let calls = api.call_count();

        let form = DetailsForm::from_draft(wizard.draft());
        let err = wizard.submit(&api, &form).await.unwrap_err();

        assert!(matches!(err, WizardError::Validation(ref e) if e.has_field("packageType")));
        assert_eq!(wizard.step(), WizardStep::Details);
        assert_eq!(api.call_count(), calls);
    }

    #[tokio::test]
    async fn test_restore_resumes_stored_step() {
        let api = MockShipmentService::new();
        let store = Arc::new(MemoryStore::new());
        {
            let mut wizard =
                Wizard::start(DraftState::new(store.clone()), ServiceType::Seafreight).unwrap();
            wizard.submit(&api, &sea_details()).await.unwrap();
            wizard.submit(&api, &delivery()).await.unwrap();
        }

        let wizard = Wizard::restore(DraftState::new(store.clone())).unwrap();
        assert_eq!(wizard.step(), WizardStep::Photos);
        assert!(wizard.draft().delivery.is_some());

        let empty = Wizard::restore(DraftState::new(Arc::new(MemoryStore::new())));
        assert!(matches!(empty, Err(WizardError::NoDraft)));
    }

    #[tokio::test]
    async fn test_edit_restarts_at_first_step() {
        let mut existing = DraftShipment::new(ServiceType::Seafreight);
        existing.id = Some(ShipmentId::new("shp-77"));
        existing.package_type = Some(PackageType::Container);
        existing.package_description = "Machine parts for plant".into();
        let api = MockShipmentService::with_shipments(vec![existing.clone()]);

        let store = Arc::new(MemoryStore::new());
        DraftState::new(store.clone()).save_step(4).unwrap();

        let wizard = Wizard::edit(
            DraftState::new(store.clone()),
            &api,
            &ShipmentId::new("shp-77"),
        )
        .await
        .unwrap();
        assert_eq!(wizard.step(), WizardStep::Details);
        assert_eq!(wizard.draft(), &existing);
        assert_eq!(store.get("step").unwrap().as_deref(), Some("1"));

        let missing = Wizard::edit(
            DraftState::new(store.clone()),
            &api,
            &ShipmentId::new("shp-404"),
        )
        .await;
        assert!(matches!(missing, Err(WizardError::ShipmentNotFound(_))));
    }

    #[tokio::test]
    async fn test_server_must_keep_the_id() {
        let api = MockShipmentService::new();
        let mut wizard = created(&api).await;
        let form = delivery();

        let ticket = match wizard.begin_submit(&form).unwrap() {
            Prepared::Ready(ticket) => ticket,
            other => panic!("unexpected {other:?}"),
        };
        let mut foreign = wizard.draft().clone();
        foreign.id = Some(ShipmentId::new("someone-else"));

        let err = wizard.finish_submit(ticket, Ok(foreign)).unwrap_err();
        assert!(matches!(err, WizardError::IdMismatch { .. }));
        assert_eq!(wizard.step(), WizardStep::Delivery);
    }

    #[tokio::test]
    async fn test_seafreight_end_to_end() {
        let api = MockShipmentService::new();
        let (mut wizard, store) = start(ServiceType::Seafreight);

        // 1. details
        let t = wizard.submit(&api, &sea_details()).await.unwrap();
        assert_eq!(t, Transition::Moved(WizardStep::Delivery));
        let id = wizard.draft().id.clone().expect("id minted on create");

        // 2. delivery
        let t = wizard.submit(&api, &delivery()).await.unwrap();
        assert_eq!(t, Transition::Moved(WizardStep::Photos));

        // 3. two gallery photos
        let photos = PhotosForm::with_photos([gallery_photo("a.jpg"), gallery_photo("b.jpg")]);
        let t = wizard.submit(&api, &photos).await.unwrap();
        assert_eq!(t, Transition::Moved(WizardStep::Pickup));
        assert_eq!(wizard.draft().images.len(), 2);

        // 4. first available Thursday
        let mut pickup = PickupForm::new(monday(), zone());
        let thursday = pickup
            .candidates()
            .iter()
            .copied()
            .find(|d| d.weekday() == Weekday::Thu)
            .unwrap();
        pickup.select(thursday).unwrap();
        let t = wizard.submit(&api, &pickup).await.unwrap();
        assert_eq!(t, Transition::Moved(WizardStep::Dimensions));

        let at = wizard.draft().scheduled_pickup_time.unwrap();
        assert_eq!(at.date_naive(), thursday);
        assert_eq!((at.hour(), at.minute(), at.second()), (10, 0, 0));
        assert_eq!(at.timestamp_subsec_millis(), 0);

        // 5. dimensions, terminal
        let t = wizard
            .submit(&api, &DimensionsForm::new(40.0, 30.0, 20.0))
            .await
            .unwrap();
        assert_eq!(t, Transition::Completed(Some(id.clone())));

        let stored = wizard.state().load_draft().unwrap().unwrap();
        assert_eq!(stored, api.shipment(&id).unwrap());
        assert_eq!(store.get("step").unwrap().as_deref(), Some("5"));
        assert_eq!(api.call_count(), 5);
    }
}
