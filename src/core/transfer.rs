//! Upload and bulk-download flows.
//!
//! [`TransferController`] drives both flows against two seams:
//!
//! - [`Transport`] starts a monitored transfer and hands back a
//!   [`TransferEvents`] stream: progress events, then exactly one settlement.
//! - [`PageHost`] performs the page-level effects: trigger state, notices,
//!   reload, navigation, saving the archive and resetting the selection.
//!
//! Everything runs on the page's single thread. The only guard against a
//! duplicate submission is the disabled trigger plus the phase checks below.

use std::any::Any;
use std::cell::Cell;

use futures::StreamExt;
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use leptos::logging::{log, warn};

use super::error::TransferError;
use super::progress::{ProgressIndicator, ProgressView};
use crate::config::{
    DOWNLOAD_LABEL, DownloadMode, INDETERMINATE_PERCENT, PageConfig, UPLOAD_LABEL, notices,
};
use crate::models::{TransferEvent, TransferKind, TransferProgress, TransferRequest, TransferResponse};
use crate::utils::url::repeated_param_url;

// =============================================================================
// Event Stream
// =============================================================================

/// Receiving end of a monitored transfer.
///
/// May carry a keep-alive guard (e.g. JS callbacks) that must live exactly as
/// long as the transfer is observed.
pub struct TransferEvents {
    events: UnboundedReceiver<TransferEvent>,
    _keep_alive: Option<Box<dyn Any>>,
}

impl TransferEvents {
    pub fn channel() -> (TransferSender, Self) {
        let (tx, rx) = mpsc::unbounded();
        (
            TransferSender(tx),
            Self {
                events: rx,
                _keep_alive: None,
            },
        )
    }

    pub fn keep_alive(mut self, guard: impl Any) -> Self {
        self._keep_alive = Some(Box::new(guard));
        self
    }

    pub async fn next(&mut self) -> Option<TransferEvent> {
        self.events.next().await
    }
}

/// Sending end of a monitored transfer, used by transports.
#[derive(Clone)]
pub struct TransferSender(UnboundedSender<TransferEvent>);

impl TransferSender {
    pub fn progress(&self, progress: TransferProgress) {
        let _ = self.0.unbounded_send(TransferEvent::Progress(progress));
    }

    /// Deliver the settlement and close the stream. Later events are dropped.
    pub fn settle(&self, result: Result<TransferResponse, TransferError>) {
        let _ = self.0.unbounded_send(TransferEvent::Settled(result));
        self.0.close_channel();
    }
}

// =============================================================================
// Seams
// =============================================================================

/// Network side of a monitored transfer.
pub trait Transport {
    /// Upload payload (a multipart form in the browser).
    type Body;

    fn start(&self, request: TransferRequest<Self::Body>) -> Result<TransferEvents, TransferError>;
}

/// Page-level effects of the transfer flows.
pub trait PageHost {
    /// Paths of the currently selected items.
    fn selected_paths(&self) -> Vec<String>;

    /// Deselect everything and leave selection mode.
    fn clear_selection(&self);

    fn set_upload_enabled(&self, enabled: bool);

    /// Show a blocking notice.
    fn notify(&self, message: &str);

    fn reload(&self);

    fn navigate(&self, url: &str);

    /// Offer `payload` to the user as a file download named `file_name`.
    fn save_file(&self, file_name: &str, payload: &[u8]) -> Result<(), TransferError>;
}

// =============================================================================
// Controller
// =============================================================================

/// Upload state machine: Idle -> Validating -> Uploading -> Settled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UploadPhase {
    /// No file chosen.
    #[default]
    Idle,
    /// At least one file chosen; trigger enabled.
    Validating,
    Uploading,
    /// Upload accepted; the page is reloading.
    Settled,
}

/// Download state machine: Idle -> Requesting -> Settled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DownloadPhase {
    #[default]
    Idle,
    Requesting,
    Settled,
}

/// How a bulk download ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Nothing selected.
    Skipped,
    /// Archive received and saved; selection cleared.
    Saved,
    /// Handed to the browser by navigation.
    Navigated,
}

pub struct TransferController<T, H, V> {
    transport: T,
    host: H,
    progress: ProgressIndicator<V>,
    config: PageConfig,
    upload_phase: Cell<UploadPhase>,
    files_chosen: Cell<bool>,
    download_phase: Cell<DownloadPhase>,
}

impl<T, H, V> TransferController<T, H, V>
where
    T: Transport,
    H: PageHost,
    V: ProgressView,
{
    pub fn new(transport: T, host: H, view: V, config: PageConfig) -> Self {
        Self {
            transport,
            host,
            progress: ProgressIndicator::new(view),
            config,
            upload_phase: Cell::new(UploadPhase::Idle),
            files_chosen: Cell::new(false),
            download_phase: Cell::new(DownloadPhase::Idle),
        }
    }

    #[cfg(test)]
    pub fn upload_phase(&self) -> UploadPhase {
        self.upload_phase.get()
    }

    #[cfg(test)]
    pub fn download_phase(&self) -> DownloadPhase {
        self.download_phase.get()
    }

    #[cfg(test)]
    pub fn progress(&self) -> &ProgressIndicator<V> {
        &self.progress
    }

    #[cfg(test)]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// File input changed: enable the trigger iff `count > 0`.
    ///
    /// During an upload the phase stays `Uploading` and the trigger stays
    /// disabled; settling restores it from the latest choice.
    pub fn files_changed(&self, count: usize) -> bool {
        let chosen = count > 0;
        self.files_chosen.set(chosen);
        let uploading = self.upload_phase.get() == UploadPhase::Uploading;
        if !uploading {
            self.upload_phase.set(if chosen {
                UploadPhase::Validating
            } else {
                UploadPhase::Idle
            });
        }
        self.host.set_upload_enabled(chosen && !uploading);
        chosen
    }

    /// Upload `body` to `url` with progress.
    ///
    /// Any 2xx/3xx status reloads the page. Failures hide the progress,
    /// surface a notice and re-enable the trigger for a manual retry.
    pub async fn upload(&self, url: &str, body: T::Body) -> Result<(), TransferError> {
        if self.upload_phase.get() == UploadPhase::Uploading {
            return Err(TransferError::InFlight(TransferKind::Upload));
        }
        if !self.files_chosen.get() {
            self.host.set_upload_enabled(false);
            return Err(TransferError::NoFileChosen);
        }

        self.upload_phase.set(UploadPhase::Uploading);
        self.host.set_upload_enabled(false);
        log!("upload started: {}", url);

        let result = self
            .run(TransferRequest::upload(url, body))
            .await
            .and_then(|response| match response.status {
                200..=399 => Ok(()),
                status => Err(TransferError::Status(status)),
            });
        self.progress.hide();

        match result {
            Ok(()) => {
                log!("upload accepted, reloading listing");
                self.upload_phase.set(UploadPhase::Settled);
                self.host.reload();
                Ok(())
            }
            Err(err) => {
                warn!("upload failed: {}", err);
                self.host.notify(match err {
                    TransferError::Status(_) => notices::UPLOAD_FAILED,
                    _ => notices::UPLOAD_ERROR,
                });
                let chosen = self.files_chosen.get();
                self.upload_phase.set(if chosen {
                    UploadPhase::Validating
                } else {
                    UploadPhase::Idle
                });
                self.host.set_upload_enabled(chosen);
                Err(err)
            }
        }
    }

    /// Bundle URL with one encoded parameter per path.
    pub fn bundle_url(&self, paths: &[String]) -> String {
        repeated_param_url(
            &self.config.bundle_endpoint,
            &self.config.bundle_param,
            paths,
        )
    }

    /// Download the current selection as one archive.
    ///
    /// On success the archive is saved and the selection cleared. On failure
    /// the selection is left intact so the user can retry.
    pub async fn download_selected(&self) -> Result<DownloadOutcome, TransferError> {
        let paths = self.host.selected_paths();
        if paths.is_empty() {
            return Ok(DownloadOutcome::Skipped);
        }
        let url = self.bundle_url(&paths);

        if self.config.download_mode == DownloadMode::Direct {
            log!("download of {} item(s) handed to the browser", paths.len());
            self.host.navigate(&url);
            return Ok(DownloadOutcome::Navigated);
        }

        if self.download_phase.get() == DownloadPhase::Requesting {
            return Err(TransferError::InFlight(TransferKind::Download));
        }
        self.download_phase.set(DownloadPhase::Requesting);
        self.progress.show(DOWNLOAD_LABEL, 0.0);
        log!("download of {} item(s) started", paths.len());

        let result = self
            .run(TransferRequest::download(url))
            .await
            .and_then(|response| match response.status {
                200 => Ok(response),
                status => Err(TransferError::Status(status)),
            })
            .and_then(|response| {
                self.host
                    .save_file(&self.config.archive_name, &response.body)
            });
        self.download_phase.set(DownloadPhase::Settled);
        self.progress.hide();

        match result {
            Ok(()) => {
                log!("archive saved as {}", self.config.archive_name);
                self.host.clear_selection();
                Ok(DownloadOutcome::Saved)
            }
            Err(err) => {
                warn!("download failed: {}", err);
                self.host.notify(match err {
                    TransferError::Status(_) => notices::DOWNLOAD_FAILED,
                    _ => notices::DOWNLOAD_ERROR,
                });
                Err(err)
            }
        }
    }

    async fn run(
        &self,
        request: TransferRequest<T::Body>,
    ) -> Result<TransferResponse, TransferError> {
        let kind = request.kind;
        let mut events = self.transport.start(request)?;

        while let Some(event) = events.next().await {
            match event {
                TransferEvent::Progress(progress) => self.report(kind, progress),
                TransferEvent::Settled(result) => return result,
            }
        }
        Err(TransferError::Interrupted)
    }

    fn report(&self, kind: TransferKind, progress: TransferProgress) {
        match kind {
            TransferKind::Upload => {
                if let Some(percent) = progress.percent() {
                    self.progress.show(UPLOAD_LABEL, percent);
                }
            }
            TransferKind::Download => self.progress.show(
                DOWNLOAD_LABEL,
                progress.percent().unwrap_or(INDETERMINATE_PERCENT),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::core::progress::ProgressState;
    use crate::models::Method;

    // =========================================================================
    // Fakes
    // =========================================================================

    #[derive(Default)]
    struct ScriptedTransport {
        /// Events pushed on start; a script without `Settled` closes early.
        script: RefCell<Vec<TransferEvent>>,
        refuse: Option<TransferError>,
        requests: RefCell<Vec<(TransferKind, Method, String, Option<&'static str>)>>,
    }

    impl ScriptedTransport {
        fn with(events: Vec<TransferEvent>) -> Self {
            Self {
                script: RefCell::new(events),
                ..Self::default()
            }
        }
    }

    impl Transport for ScriptedTransport {
        type Body = &'static str;

        fn start(
            &self,
            request: TransferRequest<Self::Body>,
        ) -> Result<TransferEvents, TransferError> {
            self.requests.borrow_mut().push((
                request.kind,
                request.method,
                request.url.clone(),
                request.body,
            ));
            if let Some(err) = &self.refuse {
                return Err(err.clone());
            }

            let (tx, events) = TransferEvents::channel();
            for event in self.script.borrow_mut().drain(..) {
                match event {
                    TransferEvent::Progress(progress) => tx.progress(progress),
                    TransferEvent::Settled(result) => tx.settle(result),
                }
            }
            Ok(events)
        }
    }

    #[derive(Default)]
    struct FakeHost {
        selected: RefCell<Vec<String>>,
        cleared: Cell<usize>,
        upload_enabled: Cell<Option<bool>>,
        notices: RefCell<Vec<String>>,
        reloads: Cell<usize>,
        navigations: RefCell<Vec<String>>,
        saved: RefCell<Vec<(String, Vec<u8>)>>,
        refuse_save: bool,
    }

    impl FakeHost {
        fn selecting(paths: &[&str]) -> Self {
            Self {
                selected: RefCell::new(paths.iter().map(|p| p.to_string()).collect()),
                ..Self::default()
            }
        }
    }

    impl PageHost for FakeHost {
        fn selected_paths(&self) -> Vec<String> {
            self.selected.borrow().clone()
        }

        fn clear_selection(&self) {
            self.selected.borrow_mut().clear();
            self.cleared.set(self.cleared.get() + 1);
        }

        fn set_upload_enabled(&self, enabled: bool) {
            self.upload_enabled.set(Some(enabled));
        }

        fn notify(&self, message: &str) {
            self.notices.borrow_mut().push(message.to_string());
        }

        fn reload(&self) {
            self.reloads.set(self.reloads.get() + 1);
        }

        fn navigate(&self, url: &str) {
            self.navigations.borrow_mut().push(url.to_string());
        }

        fn save_file(&self, file_name: &str, payload: &[u8]) -> Result<(), TransferError> {
            if self.refuse_save {
                return Err(TransferError::SaveFailed("blocked".to_string()));
            }
            self.saved
                .borrow_mut()
                .push((file_name.to_string(), payload.to_vec()));
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingView(RefCell<Vec<ProgressState>>);

    impl ProgressView for RecordingView {
        fn render(&self, state: &ProgressState) {
            self.0.borrow_mut().push(state.clone());
        }
    }

    /// Keeps the sending end so the test decides when the transfer settles.
    #[derive(Default)]
    struct HeldTransport {
        sender: RefCell<Option<TransferSender>>,
        starts: Cell<usize>,
    }

    impl HeldTransport {
        fn settle(&self, result: Result<TransferResponse, TransferError>) {
            if let Some(sender) = self.sender.borrow_mut().take() {
                sender.settle(result);
            }
        }
    }

    impl Transport for HeldTransport {
        type Body = &'static str;

        fn start(&self, _: TransferRequest<Self::Body>) -> Result<TransferEvents, TransferError> {
            let (tx, events) = TransferEvents::channel();
            *self.sender.borrow_mut() = Some(tx);
            self.starts.set(self.starts.get() + 1);
            Ok(events)
        }
    }

    type Controller<T = ScriptedTransport> = TransferController<T, FakeHost, RecordingView>;

    fn controller(transport: ScriptedTransport, host: FakeHost) -> Controller {
        TransferController::new(transport, host, RecordingView::default(), PageConfig::default())
    }

    fn progress(loaded: u64, total: Option<u64>) -> TransferEvent {
        TransferEvent::Progress(TransferProgress::new(loaded, total))
    }

    fn settled(status: u16, body: &[u8]) -> TransferEvent {
        TransferEvent::Settled(Ok(TransferResponse {
            status,
            body: body.to_vec(),
        }))
    }

    fn renders(controller: &Controller) -> Vec<ProgressState> {
        controller.progress().view().0.borrow().clone()
    }

    // =========================================================================
    // Upload
    // =========================================================================

    #[test]
    fn test_trigger_follows_file_choice() {
        let controller = controller(ScriptedTransport::default(), FakeHost::default());

        for count in [1, 0, 3, 0, 0, 2] {
            let enabled = controller.files_changed(count);
            assert_eq!(enabled, count > 0);
            assert_eq!(controller.host().upload_enabled.get(), Some(count > 0));
        }
        assert_eq!(controller.upload_phase(), UploadPhase::Validating);

        controller.files_changed(0);
        assert_eq!(controller.upload_phase(), UploadPhase::Idle);
    }

    #[tokio::test]
    async fn test_upload_success_reloads() {
        let transport = ScriptedTransport::with(vec![
            progress(25, Some(100)),
            progress(100, Some(100)),
            settled(303, b""),
        ]);
        let controller = controller(transport, FakeHost::default());
        controller.files_changed(1);

        let result = controller.upload("/upload?path=/photos", "form").await;

        assert_eq!(result, Ok(()));
        assert_eq!(controller.upload_phase(), UploadPhase::Settled);
        assert_eq!(controller.host().reloads.get(), 1);
        assert!(controller.host().notices.borrow().is_empty());
        assert!(!controller.progress().state().visible);

        let requests = controller.transport().requests.borrow();
        assert_eq!(
            requests[0],
            (
                TransferKind::Upload,
                Method::Post,
                "/upload?path=/photos".to_string(),
                Some("form")
            )
        );

        let shown: Vec<_> = renders(&controller)
            .into_iter()
            .filter(|s| s.visible)
            .map(|s| (s.label.clone(), s.percent_text()))
            .collect();
        assert_eq!(
            shown,
            vec![
                ("UPLOADING...".to_string(), "25%".to_string()),
                ("UPLOADING...".to_string(), "100%".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_upload_server_error() {
        let transport = ScriptedTransport::with(vec![progress(10, Some(10)), settled(500, b"")]);
        let controller = controller(transport, FakeHost::default());
        controller.files_changed(1);

        let result = controller.upload("/upload", "form").await;

        assert_eq!(result, Err(TransferError::Status(500)));
        assert!(!controller.progress().state().visible);
        assert_eq!(controller.host().upload_enabled.get(), Some(true));
        assert_eq!(*controller.host().notices.borrow(), vec!["Upload failed"]);
        assert_eq!(controller.host().reloads.get(), 0);
        assert_eq!(controller.upload_phase(), UploadPhase::Validating);
    }

    #[tokio::test]
    async fn test_upload_network_error() {
        let transport = ScriptedTransport::with(vec![TransferEvent::Settled(Err(
            TransferError::Network("connection reset".to_string()),
        ))]);
        let controller = controller(transport, FakeHost::default());
        controller.files_changed(2);

        let result = controller.upload("/upload", "form").await;

        assert!(matches!(result, Err(TransferError::Network(_))));
        assert_eq!(*controller.host().notices.borrow(), vec!["Upload error"]);
        assert_eq!(controller.host().upload_enabled.get(), Some(true));
        assert_eq!(controller.host().reloads.get(), 0);
    }

    #[tokio::test]
    async fn test_upload_unknown_length_shows_nothing() {
        let transport = ScriptedTransport::with(vec![progress(10, None), settled(200, b"")]);
        let controller = controller(transport, FakeHost::default());
        controller.files_changed(1);

        controller.upload("/upload", "form").await.unwrap();

        assert!(renders(&controller).iter().all(|s| !s.visible));
    }

    #[tokio::test]
    async fn test_upload_without_file_is_refused() {
        let controller = controller(ScriptedTransport::default(), FakeHost::default());

        let result = controller.upload("/upload", "form").await;

        assert_eq!(result, Err(TransferError::NoFileChosen));
        assert!(controller.transport().requests.borrow().is_empty());
        assert_eq!(controller.host().upload_enabled.get(), Some(false));
    }

    #[tokio::test]
    async fn test_upload_stream_closed_early() {
        let transport = ScriptedTransport::with(vec![progress(1, Some(4))]);
        let controller = controller(transport, FakeHost::default());
        controller.files_changed(1);

        let result = controller.upload("/upload", "form").await;

        assert_eq!(result, Err(TransferError::Interrupted));
        assert!(!controller.progress().state().visible);
        assert_eq!(controller.host().upload_enabled.get(), Some(true));
    }

    // =========================================================================
    // Download
    // =========================================================================

    #[test]
    fn test_bundle_url() {
        let controller = controller(ScriptedTransport::default(), FakeHost::default());
        let paths: Vec<String> = ["/a", "/b/c", "/d e"].iter().map(|p| p.to_string()).collect();

        let url = controller.bundle_url(&paths);

        assert_eq!(url, "/zip?p=%2Fa&p=%2Fb%2Fc&p=%2Fd%20e");
        assert_eq!(url.matches("p=").count(), 3);
    }

    #[tokio::test]
    async fn test_download_nothing_selected() {
        let controller = controller(ScriptedTransport::default(), FakeHost::default());

        assert_eq!(controller.download_selected().await, Ok(DownloadOutcome::Skipped));
        assert!(controller.transport().requests.borrow().is_empty());
        assert!(renders(&controller).is_empty());
    }

    #[tokio::test]
    async fn test_download_success_saves_and_clears() {
        let transport = ScriptedTransport::with(vec![
            progress(512, Some(1024)),
            progress(1024, Some(1024)),
            settled(200, b"PK\x03\x04"),
        ]);
        let controller = controller(transport, FakeHost::selecting(&["/a.txt", "/docs"]));

        let outcome = controller.download_selected().await;

        assert_eq!(outcome, Ok(DownloadOutcome::Saved));
        assert_eq!(
            *controller.host().saved.borrow(),
            vec![("invifiles_bundle.zip".to_string(), b"PK\x03\x04".to_vec())]
        );
        assert_eq!(controller.host().cleared.get(), 1);
        assert!(!controller.progress().state().visible);
        assert_eq!(controller.download_phase(), DownloadPhase::Settled);

        let requests = controller.transport().requests.borrow();
        assert_eq!(requests[0].1, Method::Get);
        assert_eq!(requests[0].2, "/zip?p=%2Fa.txt&p=%2Fdocs");

        let percents: Vec<_> = renders(&controller)
            .into_iter()
            .filter(|s| s.visible)
            .map(|s| s.percent)
            .collect();
        assert_eq!(percents, vec![0.0, 50.0, 100.0]);
    }

    #[tokio::test]
    async fn test_download_unknown_length_stays_visible() {
        let transport = ScriptedTransport::with(vec![
            progress(100, None),
            progress(4000, None),
            progress(9000, None),
            settled(200, b"zip"),
        ]);
        let controller = controller(transport, FakeHost::selecting(&["/big"]));

        controller.download_selected().await.unwrap();

        // First render is the 0% shown on start; every progress event after it
        // must show activity.
        let during: Vec<_> = renders(&controller)
            .into_iter()
            .filter(|s| s.visible)
            .skip(1)
            .collect();
        assert_eq!(during.len(), 3);
        assert!(during.iter().all(|s| s.percent > 0.0 && s.label == "DOWNLOADING..."));
    }

    #[tokio::test]
    async fn test_download_rejected_keeps_selection() {
        let transport = ScriptedTransport::with(vec![settled(404, b"not found")]);
        let controller = controller(transport, FakeHost::selecting(&["/gone"]));

        let outcome = controller.download_selected().await;

        assert_eq!(outcome, Err(TransferError::Status(404)));
        assert_eq!(*controller.host().notices.borrow(), vec!["Download failed"]);
        assert_eq!(controller.host().cleared.get(), 0);
        assert_eq!(controller.host().selected_paths(), vec!["/gone".to_string()]);
        assert!(controller.host().saved.borrow().is_empty());
        assert!(!controller.progress().state().visible);
    }

    #[tokio::test]
    async fn test_download_transport_failure() {
        let transport = ScriptedTransport {
            refuse: Some(TransferError::RequestFailed("blocked".to_string())),
            ..ScriptedTransport::default()
        };
        let controller = controller(transport, FakeHost::selecting(&["/a"]));

        let outcome = controller.download_selected().await;

        assert!(matches!(outcome, Err(TransferError::RequestFailed(_))));
        assert_eq!(*controller.host().notices.borrow(), vec!["Download error"]);
        assert_eq!(controller.host().cleared.get(), 0);
        assert!(!controller.progress().state().visible);
    }

    #[tokio::test]
    async fn test_download_save_failure() {
        let transport = ScriptedTransport::with(vec![settled(200, b"zip")]);
        let host = FakeHost {
            refuse_save: true,
            ..FakeHost::selecting(&["/a"])
        };
        let controller = controller(transport, host);

        let outcome = controller.download_selected().await;

        assert!(matches!(outcome, Err(TransferError::SaveFailed(_))));
        assert_eq!(controller.host().cleared.get(), 0);
        assert_eq!(*controller.host().notices.borrow(), vec!["Download error"]);
    }

    #[tokio::test]
    async fn test_direct_download_navigates() {
        let config = PageConfig {
            download_mode: DownloadMode::Direct,
            ..PageConfig::default()
        };
        let controller = TransferController::new(
            ScriptedTransport::default(),
            FakeHost::selecting(&["/a", "/b"]),
            RecordingView::default(),
            config,
        );

        let outcome = controller.download_selected().await;

        assert_eq!(outcome, Ok(DownloadOutcome::Navigated));
        assert_eq!(
            *controller.host().navigations.borrow(),
            vec!["/zip?p=%2Fa&p=%2Fb".to_string()]
        );
        assert_eq!(controller.host().cleared.get(), 0);
        assert!(controller.transport().requests.borrow().is_empty());
        assert!(controller.progress().view().0.borrow().is_empty());
    }

    // =========================================================================
    // Duplicate submission
    // =========================================================================

    fn held(host: FakeHost) -> Controller<HeldTransport> {
        TransferController::new(
            HeldTransport::default(),
            host,
            RecordingView::default(),
            PageConfig::default(),
        )
    }

    fn ok(status: u16) -> Result<TransferResponse, TransferError> {
        Ok(TransferResponse {
            status,
            body: b"PK".to_vec(),
        })
    }

    #[tokio::test]
    async fn test_trigger_stays_disabled_while_uploading() {
        let controller = held(FakeHost::default());
        controller.files_changed(1);

        let mut first = Box::pin(controller.upload("/upload", "form"));
        assert!(futures::poll!(first.as_mut()).is_pending());
        assert_eq!(controller.upload_phase(), UploadPhase::Uploading);
        assert_eq!(controller.host().upload_enabled.get(), Some(false));

        // Picking another file mid-upload must not re-arm the trigger
        assert!(controller.files_changed(2));
        assert_eq!(controller.upload_phase(), UploadPhase::Uploading);
        assert_eq!(controller.host().upload_enabled.get(), Some(false));

        let second = controller.upload("/upload", "again").await;
        assert_eq!(second, Err(TransferError::InFlight(TransferKind::Upload)));
        assert_eq!(controller.transport().starts.get(), 1);

        controller.transport().settle(ok(500));
        assert_eq!(first.await, Err(TransferError::Status(500)));
        assert_eq!(controller.upload_phase(), UploadPhase::Validating);
        assert_eq!(controller.host().upload_enabled.get(), Some(true));
    }

    #[tokio::test]
    async fn test_cleared_input_during_upload_stays_disabled_after_failure() {
        let controller = held(FakeHost::default());
        controller.files_changed(1);

        let mut upload = Box::pin(controller.upload("/upload", "form"));
        assert!(futures::poll!(upload.as_mut()).is_pending());
        assert!(!controller.files_changed(0));

        controller
            .transport()
            .settle(Err(TransferError::Network("offline".to_string())));
        assert!(upload.await.is_err());
        assert_eq!(controller.upload_phase(), UploadPhase::Idle);
        assert_eq!(controller.host().upload_enabled.get(), Some(false));
    }

    #[tokio::test]
    async fn test_second_download_refused_while_requesting() {
        let controller = held(FakeHost::selecting(&["/a"]));

        let mut first = Box::pin(controller.download_selected());
        assert!(futures::poll!(first.as_mut()).is_pending());
        assert_eq!(controller.download_phase(), DownloadPhase::Requesting);
        assert!(controller.progress().state().visible);

        let second = controller.download_selected().await;
        assert_eq!(second, Err(TransferError::InFlight(TransferKind::Download)));
        assert_eq!(controller.transport().starts.get(), 1);

        controller.transport().settle(ok(200));
        assert_eq!(first.await, Ok(DownloadOutcome::Saved));
        assert_eq!(controller.download_phase(), DownloadPhase::Settled);
        assert_eq!(controller.host().saved.borrow().len(), 1);
        assert_eq!(controller.host().cleared.get(), 1);
    }
}
