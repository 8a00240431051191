use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, Offset, TimeZone};

use shipdesk_api::{PickupTimeRequest, ShipmentService};
use shipdesk_shared::pickup::{pickup_candidates, pickup_time};
use shipdesk_shared::{DraftShipment, ValidationErrors};

use super::{require_id, StepForm};
use crate::error::WizardError;
use crate::step::WizardStep;

/// Step 4: pick one of the offered pickup dates.
///
/// The candidates are fixed when the form is built from "today"; only those
/// dates can be selected, and the confirmed time is always 10:00 in `zone`.
#[derive(Debug, Clone)]
pub struct PickupForm<Tz: TimeZone = Local> {
    zone: Tz,
    candidates: Vec<NaiveDate>,
    selected: Option<NaiveDate>,
}

impl PickupForm<Local> {
    /// Candidates computed from the current local date.
    pub fn today() -> Self {
        Self::new(Local::now().date_naive(), Local)
    }
}

impl<Tz: TimeZone> PickupForm<Tz> {
    pub fn new(today: NaiveDate, zone: Tz) -> Self {
        Self {
            zone,
            candidates: pickup_candidates(today),
            selected: None,
        }
    }

    /// Pre-select the draft's pickup date if it is still on offer.
    pub fn from_draft(draft: &DraftShipment, today: NaiveDate, zone: Tz) -> Self {
        let mut form = Self::new(today, zone);
        let selected = draft
            .scheduled_pickup_time
            .map(|at| at.with_timezone(&form.zone).date_naive())
            .filter(|date| form.candidates.contains(date));
        form.selected = selected;
        form
    }

    pub fn candidates(&self) -> &[NaiveDate] {
        &self.candidates
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn select(&mut self, date: NaiveDate) -> Result<(), ValidationErrors> {
        if !self.candidates.contains(&date) {
            return Err(ValidationErrors::single(
                "scheduledPickupTime",
                "Choose one of the offered pickup dates",
            ));
        }
        self.selected = Some(date);
        Ok(())
    }

    pub fn select_index(&mut self, index: usize) -> Result<(), ValidationErrors> {
        let date = self.candidates.get(index).copied().ok_or_else(|| {
            ValidationErrors::single(
                "scheduledPickupTime",
                "Choose one of the offered pickup dates",
            )
        })?;
        self.select(date)
    }

    /// The timestamp that will be sent: selected date, 10:00 local.
    pub fn pickup_time(&self) -> Option<DateTime<FixedOffset>> {
        let at = pickup_time(self.selected?, &self.zone)?;
        let offset = at.offset().fix();
        Some(at.with_timezone(&offset))
    }
}

#[async_trait]
impl<Tz> StepForm for PickupForm<Tz>
where
    Tz: TimeZone + Send + Sync,
    Tz::Offset: Send + Sync,
{
    const STEP: WizardStep = WizardStep::Pickup;

    fn validate(&self, _draft: &DraftShipment) -> Result<(), ValidationErrors> {
        match self.selected {
            None => Err(ValidationErrors::single(
                "scheduledPickupTime",
                "Select a pickup date",
            )),
            Some(_) if self.pickup_time().is_none() => Err(ValidationErrors::single(
                "scheduledPickupTime",
                "That pickup time does not exist in your time zone",
            )),
            Some(_) => Ok(()),
        }
    }

    fn is_confirmed(&self, draft: &DraftShipment) -> bool {
        match (draft.scheduled_pickup_time, self.pickup_time()) {
            (Some(stored), Some(chosen)) => stored == chosen,
            _ => false,
        }
    }

    async fn send(
        &self,
        api: &dyn ShipmentService,
        draft: &DraftShipment,
    ) -> Result<DraftShipment, WizardError> {
        let id = require_id(draft)?;
        let selected = self.selected.ok_or_else(|| {
            ValidationErrors::single("scheduledPickupTime", "Select a pickup date")
        })?;
        let scheduled_pickup_time = self
            .pickup_time()
            .ok_or(WizardError::InvalidPickupTime(selected))?;

        tracing::info!(
            shipment_id = %id,
            at = %scheduled_pickup_time.to_rfc3339(),
            "confirming pickup time"
        );

        let request = PickupTimeRequest {
            scheduled_pickup_time,
        };
        Ok(api.update_pickup_time(id, &request).await?)
    }
}
