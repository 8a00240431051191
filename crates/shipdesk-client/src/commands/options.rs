//! Choices offered by the step forms.

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

use shipdesk_shared::pickup::pickup_candidates;
use shipdesk_wizard::DetailsForm;

use crate::state::{lock, SharedState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageTypeOptions {
    pub options: Vec<String>,
    pub description_editable: bool,
    /// Set when the description is not editable.
    pub fixed_description: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupOption {
    pub index: usize,
    /// `YYYY-MM-DD`
    pub date: String,
    pub weekday: String,
}

/// Package types selectable for the current draft's service type.
pub fn package_type_options(state: &SharedState) -> Result<PackageTypeOptions, String> {
    let guard = lock(state)?;
    let draft = guard.wizard()?.draft();

    Ok(PackageTypeOptions {
        options: DetailsForm::package_type_options(draft)
            .into_iter()
            .map(|t| t.as_str().to_string())
            .collect(),
        description_editable: DetailsForm::description_editable(&draft.service_type),
        fixed_description: draft.service_type.fixed_description(),
    })
}

/// Pickup dates on offer today, in order.
pub fn pickup_options() -> Vec<PickupOption> {
    pickup_options_from(Local::now().date_naive())
}

pub fn pickup_options_from(today: NaiveDate) -> Vec<PickupOption> {
    pickup_candidates(today)
        .into_iter()
        .enumerate()
        .map(|(index, date)| PickupOption {
            index,
            date: date.to_string(),
            weekday: date.weekday().to_string(),
        })
        .collect()
}
