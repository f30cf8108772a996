//! Monitored transfers over `XMLHttpRequest`.
//!
//! `fetch` exposes no upload progress, so both flows go through XHR and report
//! progress events into a [`TransferEvents`] stream.

use js_sys::{ArrayBuffer, Uint8Array};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{FormData, ProgressEvent, XmlHttpRequest, XmlHttpRequestResponseType};

use crate::core::error::TransferError;
use crate::core::transfer::{TransferEvents, Transport};
use crate::models::{TransferKind, TransferProgress, TransferRequest, TransferResponse};

/// Request and callbacks of one in-flight transfer.
struct Pending {
    _xhr: XmlHttpRequest,
    _on_progress: Closure<dyn FnMut(ProgressEvent)>,
    _on_load: Closure<dyn FnMut()>,
    _on_error: Closure<dyn FnMut()>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct XhrTransport;

impl Transport for XhrTransport {
    type Body = FormData;

    fn start(&self, request: TransferRequest<FormData>) -> Result<TransferEvents, TransferError> {
        let xhr = XmlHttpRequest::new().map_err(js_request_error)?;
        xhr.open_with_async(request.method.as_str(), &request.url, true)
            .map_err(js_request_error)?;
        if request.kind == TransferKind::Download {
            xhr.set_response_type(XmlHttpRequestResponseType::Arraybuffer);
        }

        let (sender, events) = TransferEvents::channel();

        let on_progress = {
            let sender = sender.clone();
            Closure::wrap(Box::new(move |event: ProgressEvent| {
                sender.progress(progress_of(&event));
            }) as Box<dyn FnMut(ProgressEvent)>)
        };
        match request.kind {
            TransferKind::Upload => xhr
                .upload()
                .map_err(js_request_error)?
                .set_onprogress(Some(on_progress.as_ref().unchecked_ref())),
            TransferKind::Download => xhr.set_onprogress(Some(on_progress.as_ref().unchecked_ref())),
        }

        let on_load = {
            let sender = sender.clone();
            let xhr = xhr.clone();
            let kind = request.kind;
            Closure::wrap(Box::new(move || {
                sender.settle(response_of(&xhr, kind));
            }) as Box<dyn FnMut()>)
        };
        xhr.set_onload(Some(on_load.as_ref().unchecked_ref()));

        let on_error = Closure::wrap(Box::new(move || {
            sender.settle(Err(TransferError::Network("request did not complete".into())));
        }) as Box<dyn FnMut()>);
        xhr.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        xhr.set_onabort(Some(on_error.as_ref().unchecked_ref()));

        match &request.body {
            Some(form) => xhr.send_with_opt_form_data(Some(form)),
            None => xhr.send(),
        }
        .map_err(js_request_error)?;

        Ok(events.keep_alive(Pending {
            _xhr: xhr,
            _on_progress: on_progress,
            _on_load: on_load,
            _on_error: on_error,
        }))
    }
}

fn progress_of(event: &ProgressEvent) -> TransferProgress {
    let total = event.total();
    TransferProgress::new(
        event.loaded().max(0.0) as u64,
        (event.length_computable() && total > 0.0).then_some(total as u64),
    )
}

fn response_of(xhr: &XmlHttpRequest, kind: TransferKind) -> Result<TransferResponse, TransferError> {
    let status = xhr
        .status()
        .map_err(|e| TransferError::Network(format!("{:?}", e)))?;

    let body = match kind {
        TransferKind::Upload => Vec::new(),
        TransferKind::Download => xhr
            .response()
            .ok()
            .and_then(|value| value.dyn_into::<ArrayBuffer>().ok())
            .map(|buffer| Uint8Array::new(&buffer).to_vec())
            .unwrap_or_default(),
    };

    Ok(TransferResponse { status, body })
}

fn js_request_error(err: JsValue) -> TransferError {
    TransferError::RequestFailed(format!("{:?}", err))
}
