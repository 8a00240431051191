//! Drives the command handlers through whole wizard runs against the
//! in-memory Shipment Service.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{Local, Timelike};

use shipdesk_api::mock::{MockCall, MockShipmentService};
use shipdesk_api::ShipmentService;
use shipdesk_client::commands::{options, photos, wizard};
use shipdesk_client::config::ClientConfig;
use shipdesk_client::events::{Navigation, WizardEvent};
use shipdesk_client::state::{AppState, SharedState};
use shipdesk_shared::{DraftShipment, PackageType, ServiceType, ShipmentId};
use shipdesk_store::{DraftState, MemoryStore, SharedStore};
use shipdesk_wizard::camera::{CameraDevice, CameraError, Frame, MediaStream};

fn app(store: SharedStore, api: Arc<MockShipmentService>) -> SharedState {
    let api: Arc<dyn ShipmentService> = api;
    let state = AppState::with_store(ClientConfig::default(), store).with_api(api);
    Arc::new(Mutex::new(state))
}

fn fresh() -> (SharedState, Arc<MockShipmentService>, SharedStore) {
    let store: SharedStore = Arc::new(MemoryStore::new());
    let api = Arc::new(MockShipmentService::new());
    (app(store.clone(), api.clone()), api, store)
}

fn step_of(event: &WizardEvent) -> u8 {
    match event {
        WizardEvent::StepChanged { step, .. } => *step,
        other => panic!("expected a step change, got {other:?}"),
    }
}

fn gallery_files(dir: &tempfile::TempDir, names: &[&str]) -> Vec<String> {
    names
        .iter()
        .map(|name| {
            let path = dir.path().join(name);
            std::fs::write(&path, b"\xff\xd8fake-jpeg").unwrap();
            path.to_string_lossy().into_owned()
        })
        .collect()
}

async fn through_details(state: &SharedState) {
    wizard::start_shipment(state, "seafreight".into()).unwrap();
    let event = wizard::submit_details(
        state,
        Some("pallet".into()),
        "Household goods, 3 boxes".into(),
        true,
    )
    .await
    .unwrap();
    assert_eq!(step_of(&event), 2);
}

#[tokio::test]
async fn test_seafreight_shipment_from_start_to_detail_page() {
    let (state, api, _) = fresh();
    let mut events = state.lock().unwrap().subscribe();

    let view = wizard::start_shipment(&state, "seafreight".into()).unwrap();
    assert_eq!(view.step, 1);

    let offered = options::package_type_options(&state).unwrap();
    assert!(offered.options.contains(&"pallet".to_string()));
    assert!(!offered.options.contains(&"parcel".to_string()));
    assert!(offered.description_editable);

    let event = wizard::submit_details(
        &state,
        Some("pallet".into()),
        "Household goods, 3 boxes".into(),
        true,
    )
    .await
    .unwrap();
    assert_eq!(step_of(&event), 2);

    // delivery left for later
    let event = wizard::skip_step(&state).unwrap();
    assert!(matches!(
        event,
        WizardEvent::StepChanged {
            step: 3,
            skipped: true,
            ..
        }
    ));

    let dir = tempfile::tempdir().unwrap();
    let picked = photos::add_gallery_photos(&state, gallery_files(&dir, &["a.jpg", "b.jpg"]))
        .await
        .unwrap();
    assert_eq!(picked.added, 2);
    assert_eq!(picked.remaining, 2);

    let event = wizard::submit_photos(&state).await.unwrap();
    assert_eq!(step_of(&event), 4);

    let thursday = options::pickup_options()
        .into_iter()
        .find(|o| o.weekday == "Thu")
        .unwrap();
    let event = wizard::submit_pickup(&state, thursday.index).await.unwrap();
    assert_eq!(step_of(&event), 5);

    let event = wizard::submit_dimensions(&state, Some(40.0), Some(30.0), Some(20.0))
        .await
        .unwrap();
    let WizardEvent::Completed {
        shipment_id: Some(id),
    } = &event
    else {
        panic!("expected completion, got {event:?}");
    };
    assert_eq!(
        event.navigation(),
        Some(Navigation::To(format!("/shipments/{id}")))
    );

    let view = wizard::current_wizard(&state).unwrap();
    assert_eq!(view.draft.images.len(), 2);
    assert!(view.draft.delivery.is_none());
    let at = view.draft.scheduled_pickup_time.unwrap();
    assert_eq!(at.date_naive().to_string(), thursday.date);
    assert_eq!((at.hour(), at.minute()), (10, 0));
    assert_eq!(*at.offset(), *at.with_timezone(&Local).offset());

    // create, photos, pickup, dimensions: delivery was skipped
    assert_eq!(api.call_count(), 4);
    assert!(!api
        .calls()
        .iter()
        .any(|c| matches!(c, MockCall::Update(..))));

    let mut received = Vec::new();
    while let Ok(event) = events.try_recv() {
        received.push(event);
    }
    assert_eq!(received.last(), Some(&event));
}

#[tokio::test]
async fn test_reload_resumes_at_stored_step() {
    let store: SharedStore = Arc::new(MemoryStore::new());
    let api = Arc::new(MockShipmentService::new());

    let first = app(store.clone(), api.clone());
    through_details(&first).await;

    // a new session over the same store
    let second = app(store, api);
    let view = wizard::resume_wizard(&second).unwrap();
    assert_eq!(view.step, 2);
    assert_eq!(view.draft.package_description, "Household goods, 3 boxes");
    assert!(view.draft.id.is_some());
}

#[tokio::test]
async fn test_validation_failure_stays_on_step() {
    let (state, api, _) = fresh();
    wizard::start_shipment(&state, "seafreight".into()).unwrap();

    let err = wizard::submit_details(&state, Some("pallet".into()), "Boxes".into(), false)
        .await
        .unwrap_err();
    assert!(err.contains("10"));
    assert_eq!(api.call_count(), 0);
    assert_eq!(wizard::current_wizard(&state).unwrap().step, 1);

    let err = wizard::submit_details(&state, Some("crate".into()), "Boxes of things".into(), false)
        .await
        .unwrap_err();
    assert!(err.contains("unknown package type"));
}

#[tokio::test]
async fn test_backend_error_is_shown_and_retry_succeeds() {
    let (state, api, _) = fresh();
    through_details(&state).await;

    api.fail_next(500);
    let err = wizard::submit_delivery(
        &state,
        "1 Dock Rd".into(),
        "9 Harbour St".into(),
        "R. Jones".into(),
        "+44 20 0000 0000".into(),
    )
    .await
    .unwrap_err();
    assert!(err.contains("try again"));
    assert_eq!(wizard::current_wizard(&state).unwrap().step, 2);

    let event = wizard::submit_delivery(
        &state,
        "1 Dock Rd".into(),
        "9 Harbour St".into(),
        "R. Jones".into(),
        "+44 20 0000 0000".into(),
    )
    .await
    .unwrap();
    assert_eq!(step_of(&event), 3);
}

#[tokio::test]
async fn test_back_from_first_step_leaves_wizard() {
    let (state, _, _) = fresh();
    wizard::start_shipment(&state, "airfreight".into()).unwrap();

    let offered = options::package_type_options(&state).unwrap();
    assert_eq!(offered.options, vec!["parcel".to_string()]);
    assert!(!offered.description_editable);
    assert!(offered.fixed_description.is_some());

    let event = wizard::go_back(&state).unwrap();
    assert_eq!(event, WizardEvent::LeftWizard);
    assert_eq!(event.navigation(), Some(Navigation::Back));
}

#[tokio::test]
async fn test_airfreight_details_use_fixed_description() {
    let (state, api, _) = fresh();
    wizard::start_shipment(&state, "airfreight".into()).unwrap();

    // nothing chosen: the only option and the fixed text are filled in
    let event = wizard::submit_details(&state, None, String::new(), false)
        .await
        .unwrap();
    assert_eq!(step_of(&event), 2);

    match &api.calls()[0] {
        MockCall::Create(details) => {
            assert_eq!(details.package_type.as_str(), "parcel");
            assert_eq!(details.package_description, "Air freight parcel");
        }
        other => panic!("unexpected call {other:?}"),
    }
}

#[tokio::test]
async fn test_edit_existing_shipment_starts_at_details() {
    let (state, api, _) = fresh();
    through_details(&state).await;
    wizard::skip_step(&state).unwrap();
    let id = wizard::current_wizard(&state)
        .unwrap()
        .draft
        .id
        .unwrap()
        .to_string();

    let view = wizard::edit_shipment(&state, id).await.unwrap();
    assert_eq!(view.step, 1);
    assert!(matches!(api.calls().last(), Some(MockCall::List)));

    let err = wizard::edit_shipment(&state, "shp-404".into())
        .await
        .unwrap_err();
    assert!(err.contains("no longer exists"));

    // the failed edit leaves the current wizard usable
    let event = wizard::submit_details(
        &state,
        Some("pallet".into()),
        "Household goods, 4 boxes".into(),
        true,
    )
    .await
    .unwrap();
    assert_eq!(step_of(&event), 2);
    assert!(matches!(api.calls().last(), Some(MockCall::Update(..))));
}

#[tokio::test]
async fn test_unchanged_step_continues_without_signing_in() {
    let store: SharedStore = Arc::new(MemoryStore::new());
    let mut draft = DraftShipment::new(ServiceType::Seafreight);
    draft.id = Some(ShipmentId::new("shp-12"));
    draft.package_type = Some(PackageType::Pallet);
    draft.package_description = "Household goods, 3 boxes".into();
    draft.fragile = true;
    let saved = DraftState::new(store.clone());
    saved.save_draft(&draft).unwrap();
    saved.save_step(1).unwrap();

    // no API override and no stored token
    let state: SharedState = Arc::new(Mutex::new(AppState::with_store(
        ClientConfig::default(),
        store,
    )));
    wizard::resume_wizard(&state).unwrap();

    let event = wizard::submit_details(
        &state,
        Some("pallet".into()),
        "Household goods, 3 boxes".into(),
        true,
    )
    .await
    .unwrap();
    assert_eq!(step_of(&event), 2);

    wizard::go_back(&state).unwrap();
    let err = wizard::submit_details(
        &state,
        Some("pallet".into()),
        "Household goods, 5 boxes".into(),
        true,
    )
    .await
    .unwrap_err();
    assert!(err.contains("sign in"));

    let view = wizard::current_wizard(&state).unwrap();
    assert_eq!(view.step, 1);
    assert!(!view.submitting);
}

#[tokio::test]
async fn test_gallery_selection_is_capped() {
    let (state, _, _) = fresh();
    let dir = tempfile::tempdir().unwrap();

    let first = photos::add_gallery_photos(&state, gallery_files(&dir, &["1.jpg", "2.jpg", "3.jpg"]))
        .await
        .unwrap();
    assert_eq!(first.added, 3);

    let second = photos::add_gallery_photos(&state, gallery_files(&dir, &["4.png", "5.png"]))
        .await
        .unwrap();
    assert_eq!(second.added, 1);
    assert_eq!(second.remaining, 0);
    assert_eq!(second.file_names, vec!["1.jpg", "2.jpg", "3.jpg", "4.png"]);

    let after = photos::remove_photo(&state, 0).unwrap();
    assert_eq!(after.file_names, vec!["2.jpg", "3.jpg", "4.png"]);
    assert!(photos::remove_photo(&state, 9).is_err());
}

struct Stream(Arc<AtomicUsize>);

impl MediaStream for Stream {
    fn capture_frame(&mut self) -> Result<Frame, CameraError> {
        Ok(Frame {
            bytes: Bytes::from_static(b"\x89PNG"),
            content_type: "image/png".into(),
        })
    }

    fn stop_tracks(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct Camera {
    stops: Arc<AtomicUsize>,
}

#[async_trait]
impl CameraDevice for Camera {
    type Stream = Stream;

    async fn open(&self) -> Result<Stream, CameraError> {
        Ok(Stream(self.stops.clone()))
    }
}

#[tokio::test]
async fn test_camera_capture_adds_photo_and_releases_camera() {
    let (state, _, _) = fresh();
    let camera = Camera::default();

    let summary = photos::capture_photo(&state, &camera).await.unwrap();
    assert_eq!(summary.added, 1);
    assert!(summary.file_names[0].ends_with(".png"));
    assert_eq!(camera.stops.load(Ordering::SeqCst), 1);

    for _ in 0..3 {
        photos::capture_photo(&state, &camera).await.unwrap();
    }
    let err = photos::capture_photo(&state, &camera).await.unwrap_err();
    assert!(err.contains("at most 4"));
    // the camera is not opened once the selection is full
    assert_eq!(camera.stops.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_discard_clears_stored_draft() {
    let (state, _, _) = fresh();
    through_details(&state).await;

    wizard::discard_shipment(&state).unwrap();
    assert!(wizard::current_wizard(&state).is_err());
    assert!(wizard::resume_wizard(&state).is_err());
}
