use actix_web::{
    http::header::{ContentDisposition, DispositionParam, DispositionType},
    web, HttpResponse,
};
use bytes::Bytes;
use futures_util::StreamExt;
use tokio::sync::{mpsc, oneshot};
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;

use sg_core::errors::RemoteError;
use sg_core::services::DownloadFile;

use crate::app::AppState;
use crate::dto::files::DownloadQuery;
use crate::handlers::{validated, ApiError, IntoApiResult};
use crate::middleware::{Principal, RequestId};

/// Chunks buffered between the remote reader and the client
const STREAM_BUFFER: usize = 8;

/// Handler for GET /files/download
///
/// Headers are committed only once the remote file is open, so a missing
/// file still gets a JSON error. The transfer runs on its own task and is
/// cancelled when the client stops reading the body.
pub async fn download(
    request_id: RequestId,
    principal: Principal,
    state: web::Data<AppState>,
    query: web::Query<DownloadQuery>,
) -> Result<HttpResponse, ApiError> {
    let query = validated(query.into_inner(), &request_id)?;
    let path = state
        .sandbox
        .resolve(Some(&query.path))
        .api_err(&request_id)?;

    let (ready_tx, ready_rx) = oneshot::channel();
    let (tx, mut rx) = mpsc::channel::<Result<Bytes, RemoteError>>(STREAM_BUFFER);
    let cancel = CancellationToken::new();
    // Fires when the handler is dropped before or during streaming
    let guard = cancel.clone().drop_guard();

    let broker = state.broker.clone();
    let task_path = path.clone();
    let task_rid = request_id.clone();
    actix_web::rt::spawn(async move {
        let errors = tx.clone();
        let mut operation = DownloadFile::new(task_path.clone(), ready_tx, tx);
        match broker.with_session_until(&mut operation, &cancel).await {
            Ok(sent) => log::debug!("[{}] Streamed {} bytes of {}", task_rid, sent, task_path),
            Err(RemoteError::Cancelled) => {
                log::info!("[{}] Download of {} cancelled", task_rid, task_path)
            }
            Err(error) => {
                let _ = errors.send(Err(error)).await;
            }
        }
    });

    let meta = match ready_rx.await {
        Ok(meta) => meta,
        Err(_) => {
            // The task ended before opening the file; its error is queued
            let error = match rx.recv().await {
                Some(Err(error)) => error,
                _ => RemoteError::Cancelled,
            };
            return Err(error).api_err(&request_id);
        }
    };

    let filename = meta.path.rsplit('/').next().unwrap_or_default().to_string();
    log::info!(
        "[{}] {} downloading {} ({:?} bytes)",
        request_id,
        principal.username,
        meta.path,
        meta.size
    );

    let body = ReceiverStream::new(rx).map(move |chunk| {
        let _keep_alive = &guard;
        chunk
    });

    let mut response = HttpResponse::Ok();
    response
        .content_type("application/octet-stream")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(filename)],
        });
    if let Some(size) = meta.size {
        response.no_chunking(size);
    }
    Ok(response.streaming(body))
}
