//! Response decoding

use bytes::Bytes;
use reqwest::{Response, StatusCode};

use crate::error::{ClientError, Result};

/// Read the full body; return it for `200 OK`, otherwise fail with the body as message
pub async fn handle_response(response: Response) -> Result<Bytes> {
    let status = response.status();
    let body = response.bytes().await.map_err(ClientError::ReadBody)?;

    if status != StatusCode::OK {
        return Err(ClientError::Status {
            status,
            message: String::from_utf8_lossy(&body).into_owned(),
        });
    }

    Ok(body)
}
